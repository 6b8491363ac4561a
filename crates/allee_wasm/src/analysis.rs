//! Stateless entry points: integrate, classify, equilibria.

use crate::convert::{js_error, options_from_js, to_js};
use allee_core::equilibrium::equilibria as core_equilibria;
use allee_core::integrator::integrate as core_integrate;
use allee_core::regime::classify as core_classify;
use allee_core::SimulationParameters;
use anyhow::Context;
use wasm_bindgen::prelude::*;

/// Integrates the model and returns `{ samples, dt, overflowed }`.
#[wasm_bindgen]
pub fn integrate(
    r: f64,
    capacity: f64,
    threshold: f64,
    initial_population: f64,
    horizon_months: u32,
    options_val: JsValue,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let options = options_from_js(options_val).map_err(js_error)?;
    let params = SimulationParameters::new(r, capacity, threshold, initial_population);
    let trajectory = core_integrate(&params, horizon_months, &options)
        .context("Integration failed")
        .map_err(js_error)?;
    to_js(&trajectory)
}

/// Returns `{ id, label, description }` for the scenario.
#[wasm_bindgen]
pub fn classify(initial_population: f64, threshold: f64, capacity: f64) -> Result<JsValue, JsValue> {
    to_js(&core_classify(initial_population, threshold, capacity).report())
}

#[wasm_bindgen]
pub fn equilibria(
    r: f64,
    capacity: f64,
    threshold: f64,
    initial_population: f64,
) -> Result<JsValue, JsValue> {
    let params = SimulationParameters::new(r, capacity, threshold, initial_population);
    let points = core_equilibria(&params)
        .context("Equilibrium analysis failed")
        .map_err(js_error)?;
    to_js(&points)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn integrate_returns_eleven_samples_for_reference_scenario() {
        let value = integrate(0.5, 100.0, 20.0, 30.0, 10, JsValue::UNDEFINED)
            .expect("integration should succeed");
        let trajectory: allee_core::Trajectory =
            serde_wasm_bindgen::from_value(value).expect("trajectory");
        assert_eq!(trajectory.len(), 11);
        assert_eq!(trajectory.samples[0].population, 30.0);
    }

    #[wasm_bindgen_test]
    fn integrate_rejects_zero_horizon() {
        assert!(integrate(0.5, 100.0, 20.0, 30.0, 0, JsValue::NULL).is_err());
    }

    #[wasm_bindgen_test]
    fn classify_reports_identifier() {
        let value = classify(150.0, 20.0, 100.0).expect("classification");
        let id = string_field(&value, "id");
        assert_eq!(id.as_deref(), Some("above_capacity"));
    }

    #[wasm_bindgen_test]
    fn equilibria_rejects_invalid_threshold() {
        assert!(equilibria(0.5, 100.0, 0.0, 30.0).is_err());
    }

    fn string_field(value: &JsValue, key: &str) -> Option<String> {
        let map: std::collections::HashMap<String, String> =
            serde_wasm_bindgen::from_value(value.clone()).ok()?;
        map.get(key).cloned()
    }
}
