//! Stateful simulation handle that keeps the last valid result.

use crate::convert::{js_error, options_from_js, to_js};
use allee_core::integrator::{integrate as core_integrate, IntegrationOptions, Trajectory};
use allee_core::regime::{classify, Regime};
use allee_core::SimulationParameters;
use anyhow::{Context, Result};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSimulation {
    params: SimulationParameters,
    horizon_months: u32,
    options: IntegrationOptions,
    trajectory: Trajectory,
}

impl WasmSimulation {
    pub(crate) fn build(
        params: SimulationParameters,
        horizon_months: u32,
        options: IntegrationOptions,
    ) -> Result<Self> {
        let trajectory = run(&params, horizon_months, &options)?;
        Ok(Self {
            params,
            horizon_months,
            options,
            trajectory,
        })
    }

    /// Re-integrates with new inputs. On failure the previous inputs and
    /// trajectory are left untouched.
    pub(crate) fn rerun(
        &mut self,
        params: SimulationParameters,
        horizon_months: u32,
        options: IntegrationOptions,
    ) -> Result<()> {
        let trajectory = run(&params, horizon_months, &options)?;
        self.params = params;
        self.horizon_months = horizon_months;
        self.options = options;
        self.trajectory = trajectory;
        Ok(())
    }

    pub(crate) fn regime(&self) -> Regime {
        classify(
            self.params.initial_population,
            self.params.threshold,
            self.params.capacity,
        )
    }
}

fn run(
    params: &SimulationParameters,
    horizon_months: u32,
    options: &IntegrationOptions,
) -> Result<Trajectory> {
    core_integrate(params, horizon_months, options).context("Integration failed")
}

#[wasm_bindgen]
impl WasmSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        r: f64,
        capacity: f64,
        threshold: f64,
        initial_population: f64,
        horizon_months: u32,
        options_val: JsValue,
    ) -> Result<WasmSimulation, JsValue> {
        console_error_panic_hook::set_once();

        let options = options_from_js(options_val).map_err(js_error)?;
        let params = SimulationParameters::new(r, capacity, threshold, initial_population);
        WasmSimulation::build(params, horizon_months, options).map_err(js_error)
    }

    pub fn set_parameters(
        &mut self,
        r: f64,
        capacity: f64,
        threshold: f64,
        initial_population: f64,
    ) -> Result<(), JsValue> {
        let params = SimulationParameters::new(r, capacity, threshold, initial_population);
        self.rerun(params, self.horizon_months, self.options)
            .map_err(js_error)
    }

    pub fn set_horizon(&mut self, horizon_months: u32) -> Result<(), JsValue> {
        self.rerun(self.params, horizon_months, self.options)
            .map_err(js_error)
    }

    pub fn set_options(&mut self, options_val: JsValue) -> Result<(), JsValue> {
        let options = options_from_js(options_val).map_err(js_error)?;
        self.rerun(self.params, self.horizon_months, options)
            .map_err(js_error)
    }

    /// Switches between the smooth curve and whole-month narrated steps.
    pub fn set_narrated(&mut self, narrated: bool) -> Result<(), JsValue> {
        let options = if narrated {
            IntegrationOptions {
                equation_format: self.options.equation_format,
                ..IntegrationOptions::narrated()
            }
        } else {
            IntegrationOptions {
                equation_format: self.options.equation_format,
                ..IntegrationOptions::default()
            }
        };
        self.rerun(self.params, self.horizon_months, options)
            .map_err(js_error)
    }

    pub fn get_trajectory(&self) -> Result<JsValue, JsValue> {
        to_js(&self.trajectory)
    }

    pub fn get_regime(&self) -> Result<JsValue, JsValue> {
        to_js(&self.regime().report())
    }

    pub fn regime_id(&self) -> String {
        self.regime().id().to_string()
    }

    pub fn get_months(&self) -> Vec<u32> {
        self.trajectory.samples.iter().map(|s| s.time).collect()
    }

    pub fn get_populations(&self) -> Vec<f64> {
        self.trajectory.populations()
    }

    /// Narrated update equations; empty unless narration is active.
    pub fn get_equations(&self) -> Vec<String> {
        self.trajectory
            .samples
            .iter()
            .filter_map(|s| s.equation.clone())
            .collect()
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    pub fn initial_population(&self) -> f64 {
        self.trajectory.initial_population()
    }

    pub fn final_population(&self) -> f64 {
        self.trajectory.final_population()
    }

    pub fn is_extinct(&self) -> bool {
        self.trajectory.is_extinct()
    }

    pub fn overflowed(&self) -> bool {
        self.trajectory.overflowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> WasmSimulation {
        WasmSimulation::build(
            SimulationParameters::default(),
            10,
            IntegrationOptions::default(),
        )
        .expect("simulation should build")
    }

    #[test]
    fn build_produces_monthly_samples() {
        let simulation = reference();

        assert_eq!(simulation.get_months(), (0..=10).collect::<Vec<u32>>());
        assert_eq!(simulation.get_populations().len(), 11);
        assert_eq!(simulation.initial_population(), 30.0);
        let last = simulation.final_population();
        assert!(last > 30.0 && last < 100.0);
        assert!(!simulation.is_extinct());
        assert!(!simulation.overflowed());
        assert_eq!(simulation.regime_id(), "growing");
    }

    #[test]
    fn build_rejects_invalid_parameters() {
        let params = SimulationParameters::new(0.5, 0.0, 20.0, 30.0);
        let result = WasmSimulation::build(params, 10, IntegrationOptions::default());
        let message = format!("{:#}", result.err().expect("expected failure"));
        assert!(message.contains("Integration failed"));
        assert!(message.contains("invalid parameter K"));
    }

    #[test]
    fn rejected_update_keeps_last_valid_result() {
        let mut simulation = reference();
        let before = simulation.get_populations();

        let bad = SimulationParameters::new(0.5, 100.0, 0.0, 30.0);
        let result = simulation.rerun(bad, 10, IntegrationOptions::default());

        assert!(result.is_err());
        assert_eq!(simulation.get_populations(), before);
        assert_eq!(simulation.regime_id(), "growing");
    }

    #[test]
    fn set_parameters_recomputes_trajectory_and_regime() {
        let mut simulation = reference();
        simulation
            .set_parameters(0.5, 100.0, 20.0, 10.0)
            .expect("valid parameters");

        assert_eq!(simulation.regime_id(), "below_threshold");
        assert_eq!(simulation.initial_population(), 10.0);
        assert!(simulation.final_population() < 10.0);
    }

    #[test]
    fn set_horizon_extends_the_series() {
        let mut simulation = reference();
        simulation.set_horizon(50).expect("valid horizon");

        assert_eq!(simulation.horizon_months(), 50);
        assert_eq!(simulation.get_months().len(), 51);
    }

    #[test]
    fn narration_toggles_equations() {
        let mut simulation = reference();
        assert!(simulation.get_equations().is_empty());

        simulation.set_narrated(true).expect("narrated run");
        let equations = simulation.get_equations();
        assert_eq!(equations.len(), 11);
        assert_eq!(equations[0], "N_{0} = 30.00");
        assert!((simulation.get_populations()[1] - 35.25).abs() < 1e-12);

        simulation.set_narrated(false).expect("smooth run");
        assert!(simulation.get_equations().is_empty());
    }

    #[test]
    fn collapse_is_reported_as_extinct() {
        let mut simulation = reference();
        simulation
            .set_parameters(0.5, 100.0, 20.0, 10.0)
            .expect("valid parameters");
        simulation.set_horizon(50).expect("valid horizon");

        assert_eq!(simulation.final_population(), 0.0);
        assert!(simulation.is_extinct());
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn set_parameters_rejects_zero_capacity() {
        let mut simulation = reference();
        let result = simulation.set_parameters(0.5, 0.0, 20.0, 30.0);
        assert!(result.is_err(), "expected invalid parameter error");
        assert_eq!(simulation.final_population(), reference().final_population());
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn constructor_accepts_missing_options() {
        let simulation = WasmSimulation::new(0.5, 100.0, 20.0, 30.0, 10, JsValue::UNDEFINED)
            .expect("simulation should build");
        assert_eq!(simulation.get_months().len(), 11);
    }
}
