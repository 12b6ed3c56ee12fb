//! Stock-on-hand collection app: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering,
//! backend calls and helpers.
//!
//! The component owns one `WorkflowEngine` restored from `localStorage` on
//! creation, so a reload resumes the session at the step it was left on.

use yew::prelude::*;

mod api;
mod helpers;
mod messages;
mod screens;
mod state;
mod update;
mod view;

use helpers::{install_unload_guard, set_window_dirty_flag, show_toast};
pub use messages::Msg;
pub use state::CollectorComponent;

impl Component for CollectorComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        CollectorComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            install_unload_guard();
            set_window_dirty_flag(self.engine.has_uncommitted_work());
            if self.engine.has_uncommitted_work() {
                show_toast("Your previous session was restored.");
            }
        }
    }
}
