//! Component Anatomy WASM Module
//!
//! Annotates arbitrary host content with numbered pins linked to an editable
//! list of definitions. The definition store, link markup and projection
//! rendering are plain Rust; `dom` and `api` adapt them to the browser.

pub mod models;
pub mod store;
pub mod text;
pub mod html_layout;
pub mod widget;
pub mod dom;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use store::DefinitionStore;
pub use widget::{AnatomyWidget, PointerClick};
pub use html_layout::{render, AnatomyView, RenderOptions};
pub use text::{parse_term, Segment};

use std::sync::Once;
use wasm_bindgen::prelude::*;

static INIT: Once = Once::new();

/// Install the panic hook and console logger
///
/// Safe to call any number of times; only the first call has an effect. Host
/// applications that register the custom element themselves call this before
/// the first `ComponentAnatomy` is constructed.
#[wasm_bindgen]
pub fn initialize() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        #[cfg(feature = "console_log")]
        {
            if console_log::init_with_level(log::Level::Debug).is_err() {
                // the host application already installed a logger
                return;
            }
        }

        log::info!("Component anatomy WASM module initialized");
    });
}

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    initialize();
}
