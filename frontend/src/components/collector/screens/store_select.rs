use common::model::store::Store;
use common::workflow::Action;
use yew::html::Scope;
use yew::prelude::*;

use super::super::messages::{Field, Msg};
use super::super::state::CollectorComponent;
use super::super::view::text_input;

pub fn view(component: &CollectorComponent, link: &Scope<CollectorComponent>) -> Html {
    let saved = component.engine.saved_stores();
    let audited = component.engine.audited_bsrns();
    let can_add = !component.store_name.trim().is_empty() && !component.store_bsrn.trim().is_empty();

    html! {
        <>
            <section class="card">
                <h2>{ "Choose a store" }</h2>
                if saved.is_empty() {
                    <p class="muted">{ "No saved stores on this device yet. Add one below." }</p>
                } else {
                    <ul class="store-list">
                        { for saved.into_iter().map(|store| {
                            let done = audited.iter().any(|b| store.has_bsrn(b));
                            store_row(store, done, link)
                        }) }
                    </ul>
                }
            </section>

            <section class="card">
                <h2>{ "New store" }</h2>
                { text_input(link, Field::StoreName, "Store name", &component.store_name, "text") }
                { text_input(link, Field::StoreBsrn, "BSRN", &component.store_bsrn, "text") }
                <div class="actions">
                    <button
                        class="secondary"
                        disabled={!can_add}
                        onclick={link.callback(|_| Msg::SubmitNewStore { count_now: false })}
                    >
                        { "Save for later" }
                    </button>
                    <button disabled={!can_add} onclick={link.callback(|_| Msg::SubmitNewStore { count_now: true })}>
                        { "Save and count" }
                    </button>
                </div>
            </section>

            <div class="actions">
                <button class="link" onclick={link.callback(|_| Msg::Dispatch(Action::CancelAudit))}>
                    { "Back to dashboard" }
                </button>
            </div>
        </>
    }
}

fn store_row(store: Store, audited: bool, link: &Scope<CollectorComponent>) -> Html {
    let bsrn = store.bsrn.clone();
    let label = format!("{} · {}", store.name, store.bsrn);
    let key = store.bsrn.clone();
    let select = link.callback(move |_| Msg::Dispatch(Action::SelectStore(store.clone())));
    let forget = link.callback(move |_| Msg::Dispatch(Action::ForgetStore(bsrn.clone())));
    html! {
        <li class="store" key={key}>
            <button class="store-pick" onclick={select}>
                { label }
                if audited {
                    <span class="badge">{ "audited" }</span>
                }
            </button>
            <button class="link danger" title="Forget this store" onclick={forget}>{ "✕" }</button>
        </li>
    }
}
