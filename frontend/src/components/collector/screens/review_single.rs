use common::model::sku::find_sku;
use common::workflow::Action;
use yew::html::Scope;
use yew::prelude::*;

use super::super::helpers::format_units;
use super::super::messages::Msg;
use super::super::state::CollectorComponent;

pub fn view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let state = component.engine.state();
    let Some(store) = state.draft_store.as_ref() else {
        return html! {};
    };
    let catalog = component.engine.catalog();
    let confirmed = state
        .audits
        .find_by_bsrn(&store.bsrn)
        .is_some_and(|record| record.stock_data.filled() == state.draft_stock.filled());

    html! {
        <>
            <section class="card">
                <h2>{ format!("{} · {}", store.name, store.bsrn) }</h2>
                <div class="muted">
                    { format!(
                        "{} items · {} units",
                        state.draft_stock.filled_count(),
                        format_units(state.draft_stock.total_units())
                    ) }
                    if confirmed {
                        <span class="badge">{ "confirmed" }</span>
                    }
                </div>
                if state.draft_stock.filled_count() == 0 {
                    <p class="muted">{ "Nothing counted. Confirming records the store as empty." }</p>
                } else {
                    <table class="counts">
                        <thead>
                            <tr><th>{ "Item" }</th><th>{ "Code" }</th><th class="num">{ "Qty" }</th></tr>
                        </thead>
                        <tbody>
                            { for state.draft_stock.positive().map(|(sku_id, qty)| {
                                let name = find_sku(&catalog, sku_id)
                                    .map(|sku| sku.name.clone())
                                    .unwrap_or_else(|| sku_id.to_string());
                                html! {
                                    <tr key={sku_id.to_string()}>
                                        <td>{ name }</td>
                                        <td class="muted">{ sku_id }</td>
                                        <td class="num">{ qty }</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                }
            </section>

            <div class="actions">
                <button class="secondary" onclick={link.callback(|_| Msg::Dispatch(Action::EditDraft))}>
                    { "Back to counting" }
                </button>
                <button class="secondary" onclick={link.callback(|_| Msg::ExportDraft)}>
                    { "Export this store" }
                </button>
                <button class="secondary" onclick={link.callback(|_| Msg::Dispatch(Action::ShareDraft))}>
                    { "Share" }
                </button>
                if confirmed {
                    <button onclick={link.callback(|_| Msg::Dispatch(Action::FinishReview))}>{ "Done" }</button>
                } else {
                    <button onclick={link.callback(|_| Msg::Dispatch(Action::Confirm))}>{ "Confirm" }</button>
                }
            </div>
        </>
    }
}
