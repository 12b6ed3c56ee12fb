//! View rendering for the collection app.
//!
//! One screen per workflow step (see `screens`), wrapped in a header showing
//! who is logged in and what the session holds. Two sheets sit on top: the
//! confirmation prompt, driven by `engine.pending()`, and the share sheet.

use common::workflow::{Action, Step};
use web_sys::{HtmlInputElement, HtmlTextAreaElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{format_units, prompt_message};
use super::messages::{Field, Msg};
use super::screens;
use super::state::CollectorComponent;
use crate::components::sheet::Sheet;

pub fn view(component: &CollectorComponent, ctx: &Context<CollectorComponent>) -> Html {
    let link = ctx.link();
    let screen = match component.engine.step() {
        Step::Login => screens::login::view(component, link),
        Step::AdminLogin => screens::admin::login_view(component, link),
        Step::AdminDashboard => screens::admin::dashboard_view(component, link),
        Step::Dashboard => screens::dashboard::view(component, link),
        Step::StoreSelect => screens::store_select::view(component, link),
        Step::StockEntry => screens::stock_entry::view(component, link),
        Step::ReviewSingle => screens::review_single::view(component, link),
        Step::ReviewSession => screens::review_session::view(component, link),
    };

    html! {
        <div class="soh-root">
            { build_header(component, link) }
            <main class="screen">{ screen }</main>
            { build_prompt_sheet(component, link) }
            { build_share_sheet(component, link) }
        </div>
    }
}

fn build_header(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let Some(actor) = component.engine.actor() else {
        return html! { <header class="app-header"><h1>{ "Stock on Hand" }</h1></header> };
    };
    if !component.engine.step().needs_actor() {
        return html! { <header class="app-header"><h1>{ "Stock on Hand" }</h1></header> };
    }
    let totals = component.engine.totals();
    html! {
        <header class="app-header">
            <h1>{ "Stock on Hand" }</h1>
            <div class="actor">
                <span class="role-badge">{ actor.role.label() }</span>
                <span>{ format!(" {} ", actor.name) }</span>
                if !actor.region.is_empty() {
                    <span class="muted">{ format!("· {}", actor.region) }</span>
                }
            </div>
            <div class="totals">
                { format!("{} stores · {} units", totals.store_count, format_units(totals.total_units)) }
            </div>
            <button class="link" onclick={link.callback(|_| Msg::Dispatch(Action::Logout))}>
                { "Log out" }
            </button>
        </header>
    }
}

fn build_prompt_sheet(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let pending = component.engine.pending();
    let message = pending.map(prompt_message).unwrap_or_default();
    html! {
        <Sheet open={pending.is_some()} title={"Please confirm".to_string()}>
            <p>{ message }</p>
            <div class="actions">
                <button class="secondary" onclick={link.callback(|_| Msg::Dispatch(Action::DeclinePending))}>
                    { "Cancel" }
                </button>
                <button class="danger" onclick={link.callback(|_| Msg::Dispatch(Action::ConfirmPending))}>
                    { "Yes, continue" }
                </button>
            </div>
        </Sheet>
    }
}

fn build_share_sheet(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let Some(share) = &component.share else {
        return html! { <Sheet open={false} /> };
    };
    let whatsapp = format!(
        "https://wa.me/?text={}",
        String::from(js_sys::encode_uri_component(&share.message))
    );
    html! {
        <Sheet open={true} title={format!("Share {}", share.title)}>
            <p class="muted">{ "Send this whole message. The receiver pastes it into \"Import share code\"." }</p>
            <textarea class="share-code" readonly={true} rows="6" value={share.message.clone()} />
            <div class="actions">
                <a class="button" href={whatsapp} target="_blank" rel="noopener">{ "Send via WhatsApp" }</a>
                <button class="secondary" onclick={link.callback(|_| Msg::CloseShare)}>{ "Close" }</button>
            </div>
        </Sheet>
    }
}

/// `oninput` for a text box bound to `field`.
pub fn on_input(link: &Scope<CollectorComponent>, field: Field) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Input(field, input.value())
    })
}

/// `oninput` for a textarea bound to `field`.
pub fn on_textarea_input(link: &Scope<CollectorComponent>, field: Field) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::Input(field, input.value())
    })
}

pub fn text_input(
    link: &Scope<CollectorComponent>,
    field: Field,
    label: &str,
    value: &str,
    input_type: &'static str,
) -> Html {
    html! {
        <label class="field">
            <span>{ label }</span>
            <input type={input_type} value={value.to_string()} oninput={on_input(link, field)} />
        </label>
    }
}
