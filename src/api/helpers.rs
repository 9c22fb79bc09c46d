//! Shared helpers for the WASM API surface
//!
//! Serialization, deserialization, and error conversion between the core
//! and the JavaScript boundary. Core errors never escape dispatch or
//! persistence calls; the conversions here are for the explicit API
//! entry points the host calls directly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::CoreError;

/// Deserialize a value handed across the JS boundary.
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value for the JS boundary.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Render a caught JS exception as a string for logging and error wrapping.
pub fn js_error_string(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| js_sys::Error::from(err.clone()).message().as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Wrap a caught JS exception as a core engine error.
pub fn engine_error(context: &str, err: JsValue) -> CoreError {
    CoreError::Engine(format!("{}: {}", context, js_error_string(&err)))
}

/// Convert a core error to a JsValue for API entry points.
pub fn to_js_error(err: CoreError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
