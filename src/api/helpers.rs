//! Shared helpers for WASM API operations
//!
//! This module contains common patterns for console logging and for moving
//! values across the JavaScript boundary.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps become plain objects so the result reads like any other JS literal.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Deserialize an optional payload, treating failure as "no payload"
///
/// Invalid mutation input is not an error for the widget API; it is logged
/// and the mutation is skipped.
pub fn deserialize_lenient<T: DeserializeOwned>(value: JsValue, context: &str) -> Option<T> {
    if value.is_undefined() || value.is_null() {
        wasm_warn!("{}: no payload", context);
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            wasm_warn!("{}: {}", context, e);
            None
        }
    }
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Convert a JS index argument into a list index
///
/// Negative, fractional and non-finite values have no position in the list.
pub fn index_from_js(index: f64) -> Option<usize> {
    if index.is_finite() && index >= 0.0 && index.fract() == 0.0 && index <= usize::MAX as f64 {
        Some(index as usize)
    } else {
        None
    }
}
