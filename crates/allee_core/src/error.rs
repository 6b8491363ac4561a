//! Error types for the population model.

use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, AlleeError>;

/// Errors reported synchronously by the integrator.
///
/// All variants are deterministic input errors; retrying with the same
/// arguments yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlleeError {
    /// A parameter or option is outside the domain of the model.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The horizon would require more internal steps than allowed.
    #[error("integration requires {requested} internal steps, limit is {limit}")]
    StepBudgetExceeded { requested: u64, limit: usize },

    /// Population left the representable range while the error policy was active.
    #[error("population {value:e} exceeded the overflow bound during month {month}")]
    NumericOverflow { month: u32, value: f64 },
}

impl AlleeError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
