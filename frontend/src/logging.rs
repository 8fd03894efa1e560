//! Console logging through `wasm-logger`.
//!
//! Installed once from `start()`. Native unit tests never install it, so
//! log macros are no-ops there.

use log::Level;

/// Debug builds log everything down to `Debug`; release builds stop at `Info`.
pub fn level() -> Level {
    if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    }
}

pub fn init() {
    wasm_logger::init(wasm_logger::Config::new(level()));
}
