//! Browser-side utilities for the collection app.
//!
//! - **User feedback**: transient toasts and readable texts for engine
//!   rejections and confirmation prompts.
//! - **Close guard**: the `app_dirty` window flag and the `beforeunload`
//!   listener that reads it.
//! - **Downloads**: turning CSV bytes from the backend into a file download.

use js_sys::{Array, Reflect, Uint8Array};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BeforeUnloadEvent, Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Url};

use common::repository::Upsert;
use common::workflow::{Prompt, Rejection, Step};

const DIRTY_FLAG: &str = "app_dirty";

/// Displays a temporary notification at the bottom of the screen. It removes
/// itself after three seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                html_toast.set_class_name("toast");

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Mirrors "closing the tab would lose work" into `window.app_dirty`.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str(DIRTY_FLAG),
            &JsValue::from_bool(dirty),
        );
    }
}

/// Registers a `beforeunload` listener that asks for confirmation while
/// `app_dirty` is set. Call once; the listener lives as long as the page.
pub fn install_unload_guard() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let guard = Closure::<dyn FnMut(BeforeUnloadEvent)>::new(|event: BeforeUnloadEvent| {
        let dirty = web_sys::window()
            .and_then(|w| Reflect::get(&w, &JsValue::from_str(DIRTY_FLAG)).ok())
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if dirty {
            event.prevent_default();
            event.set_return_value("You have counts that are not synced or exported.");
        }
    });
    if window
        .add_event_listener_with_callback("beforeunload", guard.as_ref().unchecked_ref())
        .is_ok()
    {
        guard.forget();
    }
}

/// Saves `bytes` as a file through a temporary object URL.
pub fn download_bytes(file_name: &str, bytes: &[u8], mime: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url)
}

/// The `filename="..."` part of a `Content-Disposition` header.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

pub fn format_units(units: u64) -> String {
    units.to_formatted_string(&Locale::en)
}

pub fn rejection_message(rejection: &Rejection) -> String {
    match rejection {
        Rejection::IllegalInStep(step) => format!("That is not available on the {} screen.", step_title(*step)),
        Rejection::MissingField(field) => format!("Please fill in the {}.", field),
        Rejection::RecordNotFound(_) => "That store is no longer in this session.".to_string(),
        Rejection::InvalidToken => "That share code could not be read. Paste the whole message.".to_string(),
        Rejection::UnknownSku(sku) => format!("{} is not in the catalog.", sku),
        Rejection::DuplicateSku(sku) => format!("An item with code {} already exists.", sku),
        Rejection::DuplicateStore(bsrn) => format!("A store with BSRN {} is already saved.", bsrn),
        Rejection::AccessDenied => "Invalid admin credentials.".to_string(),
        Rejection::NothingPending => "Nothing to confirm.".to_string(),
    }
}

pub fn prompt_message(prompt: &Prompt) -> String {
    match prompt {
        Prompt::DiscardDraft { store_name } => {
            format!("Discard the counts entered for {}?", store_name)
        }
        Prompt::DeleteRecord { store_name, .. } => {
            format!("Remove the audit for {} from this session?", store_name)
        }
        Prompt::EndSession { stores, units } => format!(
            "End the session? {} audited stores ({} units) will be erased from this device. \
             Export or sync first if you still need them.",
            stores,
            format_units(*units)
        ),
    }
}

pub fn import_message(result: Upsert) -> &'static str {
    match result {
        Upsert::Inserted => "Store added from share code.",
        Upsert::Replaced => "Store updated from share code.",
    }
}

pub fn step_title(step: Step) -> &'static str {
    match step {
        Step::Login => "login",
        Step::Dashboard => "dashboard",
        Step::StoreSelect => "store selection",
        Step::StockEntry => "stock entry",
        Step::ReviewSingle => "store review",
        Step::ReviewSession => "session review",
        Step::AdminLogin => "admin login",
        Step::AdminDashboard => "admin dashboard",
    }
}
