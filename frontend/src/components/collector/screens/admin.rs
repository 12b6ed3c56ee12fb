//! Admin screens: credential form and the server-side submission list.

use common::model::actor::Role;
use common::model::submission::Submission;
use web_sys::HtmlSelectElement;
use yew::html::Scope;
use yew::prelude::*;

use super::super::helpers::format_units;
use super::super::messages::{Field, Msg};
use super::super::state::CollectorComponent;
use super::super::view::text_input;

pub fn login_view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::SubmitAdminLogin
    });
    html! {
        <section class="card login">
            <h2>{ "Admin login" }</h2>
            <form onsubmit={on_submit}>
                { text_input(link, Field::AdminId, "Admin ID", &component.admin_id, "text") }
                { text_input(link, Field::AdminPassword, "Password", &component.admin_password, "password") }
                <button type="submit" disabled={component.busy}>
                    { if component.busy { "Checking…" } else { "Log in" } }
                </button>
            </form>
            <button class="link" onclick={link.callback(|_| Msg::LeaveAdmin)}>{ "Back" }</button>
        </section>
    }
}

pub fn dashboard_view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let on_role = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::AdminSetRole(Role::from_label(&select.value()))
    });
    let selected = component.admin_role.map(Role::label).unwrap_or("");
    let units: u64 = component.submissions.iter().map(|s| s.total_qty).sum();

    html! {
        <>
            <section class="card">
                <h2>{ "Submissions" }</h2>
                <div class="actions">
                    <select onchange={on_role}>
                        <option value="" selected={selected.is_empty()}>{ "All roles" }</option>
                        <option value="BDE" selected={selected == "BDE"}>{ "BDE" }</option>
                        <option value="BA" selected={selected == "BA"}>{ "BA" }</option>
                    </select>
                    <button class="secondary" disabled={component.busy} onclick={link.callback(|_| Msg::AdminRefresh)}>
                        { "Refresh" }
                    </button>
                    <button
                        disabled={component.submissions.is_empty()}
                        onclick={link.callback(|_| Msg::AdminExport)}
                    >
                        { "Master CSV" }
                    </button>
                </div>
                <div class="muted">
                    { format!("{} submissions · {} units", component.submissions.len(), format_units(units)) }
                </div>
                if component.submissions.is_empty() {
                    <p class="muted">{ if component.busy { "Loading…" } else { "Nothing synced yet." } }</p>
                } else {
                    <table class="counts">
                        <thead>
                            <tr>
                                <th>{ "Date" }</th>
                                <th>{ "Store" }</th>
                                <th>{ "By" }</th>
                                <th class="num">{ "Units" }</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            { for component.submissions.iter().map(|s| submission_row(s, link)) }
                        </tbody>
                    </table>
                }
            </section>

            <div class="actions">
                <button class="link" onclick={link.callback(|_| Msg::LeaveAdmin)}>{ "Leave admin" }</button>
            </div>
        </>
    }
}

fn submission_row(submission: &Submission, link: &Scope<CollectorComponent>) -> Html {
    let share_id = submission.submission_id.clone();
    let delete_id = submission.submission_id.clone();
    html! {
        <tr key={submission.submission_id.clone()}>
            <td>{ submission.date_string.clone() }</td>
            <td>
                { submission.store_name.clone() }
                <span class="muted">{ format!(" · {}", submission.store_id) }</span>
            </td>
            <td>
                { submission.bde_name.clone() }
                <span class="role-badge">{ submission.role.label() }</span>
                if !submission.region.is_empty() {
                    <span class="muted">{ format!(" {}", submission.region) }</span>
                }
            </td>
            <td class="num">{ format_units(submission.total_qty) }</td>
            <td class="row-actions">
                <button class="secondary" onclick={link.callback(move |_| Msg::AdminShare(share_id.clone()))}>
                    { "Share" }
                </button>
                <button class="danger" onclick={link.callback(move |_| Msg::AdminDelete(delete_id.clone()))}>
                    { "Delete" }
                </button>
            </td>
        </tr>
    }
}
