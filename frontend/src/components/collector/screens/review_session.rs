use common::workflow::Action;
use yew::html::Scope;
use yew::prelude::*;

use super::super::helpers::format_units;
use super::super::messages::Msg;
use super::super::state::CollectorComponent;

pub fn view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let records = component.engine.state().audits.records();
    let totals = component.engine.totals();
    let busy = component.busy;

    html! {
        <>
            <section class="card">
                <h2>{ "Session summary" }</h2>
                <table class="counts">
                    <thead>
                        <tr>
                            <th>{ "Store" }</th>
                            <th>{ "BSRN" }</th>
                            <th class="num">{ "Items" }</th>
                            <th class="num">{ "Units" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for records.iter().map(|record| html! {
                            <tr key={record.id.clone()}>
                                <td>{ record.store.name.clone() }</td>
                                <td class="muted">{ record.store.bsrn.clone() }</td>
                                <td class="num">{ record.stock_data.filled_count() }</td>
                                <td class="num">{ format_units(record.total_units()) }</td>
                            </tr>
                        }) }
                    </tbody>
                    <tfoot>
                        <tr>
                            <th colspan="3">{ format!("{} stores", totals.store_count) }</th>
                            <th class="num">{ format_units(totals.total_units) }</th>
                        </tr>
                    </tfoot>
                </table>
            </section>

            <div class="actions">
                <button class="secondary" onclick={link.callback(|_| Msg::Dispatch(Action::ContinueSession))}>
                    { "Keep auditing" }
                </button>
                <button class="secondary" disabled={records.is_empty()} onclick={link.callback(|_| Msg::ExportSession)}>
                    { "Download CSV" }
                </button>
                <button disabled={busy || records.is_empty()} onclick={link.callback(|_| Msg::SyncSession)}>
                    { if busy { "Syncing…" } else { "Sync to server" } }
                </button>
            </div>
        </>
    }
}
