//! Conversions between JavaScript values and core types.

use allee_core::IntegrationOptions;
use anyhow::anyhow;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Reads integration options; `undefined` and `null` select the defaults.
/// Missing fields fall back to their default values.
pub(crate) fn options_from_js(options_val: JsValue) -> anyhow::Result<IntegrationOptions> {
    if options_val.is_undefined() || options_val.is_null() {
        return Ok(IntegrationOptions::default());
    }
    from_value(options_val).map_err(|e| anyhow!("Invalid integration options: {}", e))
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Flattens an error chain into a single message for the caller.
pub(crate) fn js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
