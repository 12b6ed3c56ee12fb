use common::model::actor::Role;
use common::workflow::Action;
use web_sys::HtmlSelectElement;
use yew::html::Scope;
use yew::prelude::*;

use super::super::messages::{Field, Msg};
use super::super::state::CollectorComponent;
use super::super::view::text_input;

pub fn view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let on_role = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetLoginRole(Role::from_label(&select.value()))
    });
    let selected = component.login_role.map(Role::label).unwrap_or("");
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::SubmitLogin
    });

    html! {
        <section class="card login">
            <h2>{ "Start a session" }</h2>
            <form onsubmit={on_submit}>
                { text_input(link, Field::LoginName, "Your name", &component.login_name, "text") }
                { text_input(link, Field::LoginRegion, "Region", &component.login_region, "text") }
                <label class="field">
                    <span>{ "Role" }</span>
                    <select onchange={on_role}>
                        <option value="" selected={selected.is_empty()}>{ "Choose…" }</option>
                        <option value="BDE" selected={selected == "BDE"}>{ "BDE (compile several stores)" }</option>
                        <option value="BA" selected={selected == "BA"}>{ "BA (count one store)" }</option>
                    </select>
                </label>
                <button type="submit">{ "Continue" }</button>
            </form>
            <button class="link" onclick={link.callback(|_| Msg::Dispatch(Action::OpenAdmin))}>
                { "Admin access" }
            </button>
        </section>
    }
}
