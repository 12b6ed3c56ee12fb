use common::model::sku::{Sku, SkuCategory};
use common::workflow::Action;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::super::helpers::format_units;
use super::super::messages::{Field, Msg};
use super::super::state::CollectorComponent;
use super::super::view::text_input;

const CATEGORIES: [SkuCategory; 5] = [
    SkuCategory::Hair,
    SkuCategory::Skin,
    SkuCategory::Body,
    SkuCategory::Gifting,
    SkuCategory::Other,
];

fn matches_filter(sku: &Sku, filter: &str) -> bool {
    filter.is_empty()
        || sku.name.to_lowercase().contains(filter)
        || sku.id.to_lowercase().contains(filter)
}

pub fn view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let state = component.engine.state();
    let store_name = state.draft_store.as_ref().map(|s| s.name.clone()).unwrap_or_default();
    let filter = component.sku_filter.trim().to_lowercase();
    let catalog: Vec<Sku> = component
        .engine
        .catalog()
        .into_iter()
        .filter(|sku| matches_filter(sku, &filter))
        .collect();

    html! {
        <>
            <section class="card">
                <h2>{ format!("Counting {}", store_name) }</h2>
                <div class="muted">
                    { format!(
                        "{} items counted · {} units",
                        state.draft_stock.filled_count(),
                        format_units(state.draft_stock.total_units())
                    ) }
                </div>
                { text_input(link, Field::SkuFilter, "Search", &component.sku_filter, "search") }
            </section>

            { for CATEGORIES.iter().map(|category| {
                let skus: Vec<&Sku> = catalog.iter().filter(|s| s.category == *category).collect();
                category_block(component, *category, &skus, link)
            }) }

            <section class="card">
                <h2>{ "Item not in the list?" }</h2>
                { text_input(link, Field::SkuCode, "Item code", &component.sku_code, "text") }
                { text_input(link, Field::SkuName, "Item name", &component.sku_name, "text") }
                <div class="actions">
                    <button class="secondary" onclick={link.callback(|_| Msg::SubmitCustomSku)}>{ "Add item" }</button>
                </div>
            </section>

            <div class="actions sticky">
                <button class="secondary" onclick={link.callback(|_| Msg::Dispatch(Action::CancelAudit))}>
                    { "Cancel" }
                </button>
                <button onclick={link.callback(|_| Msg::Dispatch(Action::SubmitCounts))}>{ "Review counts" }</button>
            </div>
        </>
    }
}

fn category_block(
    component: &CollectorComponent,
    category: SkuCategory,
    skus: &[&Sku],
    link: &Scope<CollectorComponent>,
) -> Html {
    if skus.is_empty() {
        return html! {};
    }
    html! {
        <section class="card">
            <h3>{ category.label() }</h3>
            <ul class="sku-list">
                { for skus.iter().map(|sku| sku_row(component, sku, link)) }
            </ul>
        </section>
    }
}

fn sku_row(component: &CollectorComponent, sku: &Sku, link: &Scope<CollectorComponent>) -> Html {
    let draft = &component.engine.state().draft_stock;
    let entered = draft.iter().any(|(id, _)| id == sku.id);
    let count = draft.get(&sku.id);
    // Blank until the counter touches the row, so an explicit 0 stands out.
    let value = if entered { count.to_string() } else { String::new() };

    let dec_id = sku.id.clone();
    let inc_id = sku.id.clone();
    let input_id = sku.id.clone();
    let on_change = link.callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::CountInput {
            sku: input_id.clone(),
            raw: input.value(),
        }
    });

    html! {
        <li class={classes!("sku", (count > 0).then_some("filled"))} key={sku.id.clone()}>
            <div class="sku-name">
                <span>{ sku.name.clone() }</span>
                <span class="muted">{ format!(" {} · {}", sku.id, sku.sku_type.label()) }</span>
            </div>
            <div class="stepper">
                <button class="secondary" onclick={link.callback(move |_| Msg::Dispatch(Action::Decrement(dec_id.clone())))}>
                    { "−" }
                </button>
                <input type="number" min="0" inputmode="numeric" value={value} onchange={on_change} />
                <button class="secondary" onclick={link.callback(move |_| Msg::Dispatch(Action::Increment(inc_id.clone())))}>
                    { "+" }
                </button>
            </div>
        </li>
    }
}
