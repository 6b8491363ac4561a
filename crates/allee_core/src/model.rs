use crate::error::{AlleeError, Result};
use crate::traits::{Scalar, ScalarFlow};
use serde::{Deserialize, Serialize};

/// Model parameters for the Allee-extended logistic equation.
///
/// Field names on the wire follow the model symbols (`r`, `K`, `A`, `N0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Intrinsic growth rate.
    pub r: f64,
    /// Carrying capacity.
    #[serde(rename = "K")]
    pub capacity: f64,
    /// Allee threshold.
    #[serde(rename = "A")]
    pub threshold: f64,
    /// Initial population.
    #[serde(rename = "N0")]
    pub initial_population: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            r: 0.5,
            capacity: 100.0,
            threshold: 20.0,
            initial_population: 30.0,
        }
    }
}

impl SimulationParameters {
    pub fn new(r: f64, capacity: f64, threshold: f64, initial_population: f64) -> Self {
        Self {
            r,
            capacity,
            threshold,
            initial_population,
        }
    }

    /// Checks that the rate function is defined for these parameters.
    ///
    /// `A < K` is not required; the integrator still produces a defined
    /// trajectory when the threshold sits at or above the capacity.
    pub fn validate(&self) -> Result<()> {
        if !self.r.is_finite() {
            return Err(AlleeError::invalid("r", self.r, "must be finite"));
        }
        if self.r < 0.0 {
            return Err(AlleeError::invalid("r", self.r, "must not be negative"));
        }
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(AlleeError::invalid(
                "K",
                self.capacity,
                "must be positive and finite",
            ));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(AlleeError::invalid(
                "A",
                self.threshold,
                "must be positive and finite",
            ));
        }
        if !self.initial_population.is_finite() {
            return Err(AlleeError::invalid(
                "N0",
                self.initial_population,
                "must be finite",
            ));
        }
        if self.initial_population < 0.0 {
            return Err(AlleeError::invalid(
                "N0",
                self.initial_population,
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Scalar population dynamics dN/dt = r N (1 - N/K) (N/A - 1).
#[derive(Debug, Clone, Copy)]
pub struct AlleeModel<T: Scalar> {
    pub r: T,
    pub capacity: T,
    pub threshold: T,
}

impl<T: Scalar> AlleeModel<T> {
    /// Builds the model from validated parameters.
    pub fn new(params: &SimulationParameters) -> Result<Self> {
        params.validate()?;
        let cast = |name: &'static str, value: f64| {
            T::from_f64(value).ok_or_else(|| {
                AlleeError::invalid(name, value, "not representable in the scalar type")
            })
        };
        Ok(Self {
            r: cast("r", params.r)?,
            capacity: cast("K", params.capacity)?,
            threshold: cast("A", params.threshold)?,
        })
    }

    /// Instantaneous growth rate f(N).
    pub fn rate(&self, n: T) -> T {
        let one = T::one();
        self.r * n * (one - n / self.capacity) * (n / self.threshold - one)
    }

    /// Derivative f'(N), used for linear stability of equilibria.
    pub fn rate_derivative(&self, n: T) -> T {
        let one = T::one();
        let two = one + one;
        let logistic = n * (one - n / self.capacity);
        let logistic_slope = one - two * n / self.capacity;
        let allee = n / self.threshold - one;
        self.r * (logistic_slope * allee + logistic / self.threshold)
    }
}

impl<T: Scalar> ScalarFlow<T> for AlleeModel<T> {
    fn rate(&self, n: T) -> T {
        AlleeModel::rate(self, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_model() -> AlleeModel<f64> {
        AlleeModel::new(&SimulationParameters::default()).expect("valid parameters")
    }

    #[test]
    fn default_parameters_match_reference_scenario() {
        let params = SimulationParameters::default();
        assert_eq!(params, SimulationParameters::new(0.5, 100.0, 20.0, 30.0));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rate_vanishes_at_equilibria() {
        let model = reference_model();
        for n in [0.0, 20.0, 100.0] {
            assert_eq!(model.rate(n), 0.0, "rate at {n}");
        }
    }

    #[test]
    fn rate_sign_follows_regions() {
        let model = reference_model();
        assert!(model.rate(10.0) < 0.0);
        assert!(model.rate(50.0) > 0.0);
        assert!(model.rate(150.0) < 0.0);
    }

    #[test]
    fn rate_matches_hand_computed_value() {
        let model = reference_model();
        // 0.5 * 30 * 0.7 * 0.5
        assert!((model.rate(30.0) - 5.25).abs() < 1e-12);
    }

    #[test]
    fn rate_derivative_matches_finite_difference() {
        let model = reference_model();
        let h = 1e-6;
        for n in [0.0, 5.0, 20.0, 42.0, 100.0, 130.0] {
            let numeric = (model.rate(n + h) - model.rate(n - h)) / (2.0 * h);
            let analytic = model.rate_derivative(n);
            assert!(
                (numeric - analytic).abs() < 1e-5,
                "n = {n}: numeric {numeric}, analytic {analytic}"
            );
        }
    }

    #[test]
    fn model_is_a_scalar_flow() {
        fn flow_rate(flow: &impl ScalarFlow<f64>, n: f64) -> f64 {
            flow.rate(n)
        }
        let model = reference_model();
        assert!((flow_rate(&model, 30.0) - 5.25).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_non_positive_capacity_and_threshold() {
        let zero_capacity = SimulationParameters::new(0.5, 0.0, 20.0, 30.0);
        assert!(matches!(
            zero_capacity.validate(),
            Err(AlleeError::InvalidParameter { name: "K", .. })
        ));

        let negative_threshold = SimulationParameters::new(0.5, 100.0, -3.0, 30.0);
        assert!(matches!(
            negative_threshold.validate(),
            Err(AlleeError::InvalidParameter { name: "A", .. })
        ));
    }

    #[test]
    fn validate_rejects_non_finite_and_negative_inputs() {
        let nan_rate = SimulationParameters::new(f64::NAN, 100.0, 20.0, 30.0);
        assert!(matches!(
            nan_rate.validate(),
            Err(AlleeError::InvalidParameter { name: "r", .. })
        ));

        let negative_population = SimulationParameters::new(0.5, 100.0, 20.0, -1.0);
        assert!(matches!(
            negative_population.validate(),
            Err(AlleeError::InvalidParameter { name: "N0", .. })
        ));

        let infinite_capacity = SimulationParameters::new(0.5, f64::INFINITY, 20.0, 30.0);
        assert!(infinite_capacity.validate().is_err());
    }

    #[test]
    fn validate_accepts_threshold_above_capacity() {
        let params = SimulationParameters::new(0.5, 50.0, 80.0, 30.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn parameters_use_model_symbols_on_the_wire() {
        let json = serde_json::to_value(SimulationParameters::default()).expect("serialize");
        assert_eq!(json["r"], 0.5);
        assert_eq!(json["K"], 100.0);
        assert_eq!(json["A"], 20.0);
        assert_eq!(json["N0"], 30.0);

        let parsed: SimulationParameters =
            serde_json::from_str(r#"{"r":0.2,"K":150,"A":10,"N0":5}"#).expect("deserialize");
        assert_eq!(parsed, SimulationParameters::new(0.2, 150.0, 10.0, 5.0));
    }
}
