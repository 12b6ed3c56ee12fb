use common::model::audit::AuditRecord;
use common::workflow::Action;
use yew::html::Scope;
use yew::prelude::*;

use super::super::helpers::format_units;
use super::super::messages::{Field, Msg};
use super::super::state::CollectorComponent;
use super::super::view::on_textarea_input;

pub fn view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let records = component.engine.state().audits.records();
    html! {
        <>
            <section class="card">
                <div class="actions">
                    <button onclick={link.callback(|_| Msg::Dispatch(Action::StartAudit))}>
                        { "Audit a store" }
                    </button>
                    <button
                        class="secondary"
                        disabled={records.is_empty()}
                        onclick={link.callback(|_| Msg::Dispatch(Action::FinishSession))}
                    >
                        { "Review session" }
                    </button>
                </div>
            </section>

            <section class="card">
                <h2>{ "Audited stores" }</h2>
                if records.is_empty() {
                    <p class="muted">{ "No store confirmed yet. Audit a store or import a share code." }</p>
                } else {
                    <ul class="record-list">
                        { for records.iter().map(|record| record_row(record, link)) }
                    </ul>
                }
            </section>

            <section class="card">
                <h2>{ "Import share code" }</h2>
                <textarea
                    rows="4"
                    placeholder="Paste the whole message, including CODE:"
                    value={component.import_text.clone()}
                    oninput={on_textarea_input(link, Field::ImportText)}
                />
                <div class="actions">
                    <button
                        disabled={component.import_text.trim().is_empty()}
                        onclick={link.callback(|_| Msg::SubmitImport)}
                    >
                        { "Import" }
                    </button>
                </div>
            </section>
        </>
    }
}

fn record_row(record: &AuditRecord, link: &Scope<CollectorComponent>) -> Html {
    let edit_id = record.id.clone();
    let share_id = record.id.clone();
    let delete_id = record.id.clone();
    html! {
        <li class="record" key={record.id.clone()}>
            <div>
                <strong>{ record.store.name.clone() }</strong>
                <span class="muted">{ format!(" · {}", record.store.bsrn) }</span>
                <div class="muted">
                    { format!(
                        "{} items · {} units",
                        record.stock_data.filled_count(),
                        format_units(record.total_units())
                    ) }
                </div>
            </div>
            <div class="row-actions">
                <button class="secondary" onclick={link.callback(move |_| Msg::Dispatch(Action::EditRecord(edit_id.clone())))}>
                    { "Edit" }
                </button>
                <button class="secondary" onclick={link.callback(move |_| Msg::Dispatch(Action::ShareRecord(share_id.clone())))}>
                    { "Share" }
                </button>
                <button class="danger" onclick={link.callback(move |_| Msg::Dispatch(Action::DeleteRecord(delete_id.clone())))}>
                    { "Delete" }
                </button>
            </div>
        </li>
    }
}
