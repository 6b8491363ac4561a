//! The `allee_core` crate provides the numerical engine behind the Allee-effect
//! population explorer. It is pure and synchronous: every call is a function of
//! its arguments, so the presentation layer can re-run it on each slider change.
//!
//! Key components:
//! - **Model**: `SimulationParameters` and the rate function
//!   `f(N) = r N (1 - N/K) (N/A - 1)` as a `ScalarFlow`.
//! - **Integrator**: fixed-step explicit Euler producing one `Sample` per month,
//!   optionally narrating each whole-month update as an equation.
//! - **Regime**: classification of the scenario from `(N0, A, K)`.
//! - **Equilibrium**: the fixed points `{0, A, K}` and their linear stability.
pub mod equation;
pub mod equilibrium;
pub mod error;
pub mod integrator;
pub mod model;
pub mod regime;
pub mod solvers;
pub mod traits;

pub use error::{AlleeError, Result};
pub use integrator::{integrate, IntegrationOptions, Sample, Trajectory};
pub use model::SimulationParameters;
pub use regime::{classify, Regime};
