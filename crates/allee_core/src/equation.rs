//! Text rendering of single Euler updates for step-by-step narration.

use crate::model::SimulationParameters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationFormat {
    /// LaTeX suitable for KaTeX/MathJax.
    #[default]
    Latex,
    /// Plain ASCII arithmetic.
    Plain,
}

/// One narrated Euler update N_next = N + dt * f(N).
#[derive(Debug, Clone, Copy)]
pub struct EulerUpdate {
    pub month: u32,
    pub previous: f64,
    pub next: f64,
    pub dt: f64,
}

/// Renders the initial condition line, e.g. `N_{0} = 30.00`.
pub fn render_initial(format: EquationFormat, initial_population: f64) -> String {
    match format {
        EquationFormat::Latex => format!("N_{{0}} = {initial_population:.2}"),
        EquationFormat::Plain => format!("N_0 = {initial_population:.2}"),
    }
}

/// Renders one update with operands and result to two decimals.
///
/// `K` and `A` are printed in their shortest form since they are usually
/// whole numbers chosen by the user.
pub fn render_update(
    format: EquationFormat,
    params: &SimulationParameters,
    update: &EulerUpdate,
) -> String {
    let EulerUpdate {
        month,
        previous: n,
        next,
        dt,
    } = *update;
    let r = params.r;
    let k = params.capacity;
    let a = params.threshold;

    match format {
        EquationFormat::Latex => format!(
            "N_{{{month}}} = {n:.2} + {dt} \\cdot {r:.2} \\cdot {n:.2} \
             \\left(1 - \\frac{{{n:.2}}}{{{k}}}\\right) \
             \\left(\\frac{{{n:.2}}}{{{a}}} - 1\\right) \\approx {next:.2}"
        ),
        EquationFormat::Plain => format!(
            "N_{month} = {n:.2} + {dt} * {r:.2} * {n:.2} * (1 - {n:.2}/{k}) * ({n:.2}/{a} - 1) ~ {next:.2}"
        ),
    }
}
