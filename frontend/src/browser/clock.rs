use common::workflow::Clock;

/// `Date.now()`; `std::time` is not available on `wasm32-unknown-unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
