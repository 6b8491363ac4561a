use crate::error::Result;
use crate::model::{AlleeModel, SimulationParameters};
use serde::{Deserialize, Serialize};

const DEGENERATE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Unstable,
    /// Zero linearization; stability is decided by higher-order terms.
    Degenerate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub population: f64,
    /// f'(N*), the single eigenvalue of the linearized flow.
    pub eigenvalue: f64,
    pub stability: Stability,
}

impl Equilibrium {
    /// Multiplier of the Euler map N -> N + dt f(N) at this point.
    ///
    /// A stable equilibrium of the flow is approached monotonically by the
    /// discrete scheme only when this lies in [0, 1).
    pub fn euler_multiplier(&self, dt: f64) -> f64 {
        1.0 + dt * self.eigenvalue
    }
}

/// Returns the equilibria {0, A, K} in ascending order with linear stability.
///
/// When `A == K` the two positive equilibria coincide and a single
/// degenerate point is reported.
pub fn equilibria(params: &SimulationParameters) -> Result<Vec<Equilibrium>> {
    let model = AlleeModel::<f64>::new(params)?;

    let mut points = vec![0.0, params.threshold, params.capacity];
    points.sort_by(f64::total_cmp);
    points.dedup();

    Ok(points
        .into_iter()
        .map(|population| {
            let eigenvalue = model.rate_derivative(population);
            Equilibrium {
                population,
                eigenvalue,
                stability: classify_eigenvalue(eigenvalue),
            }
        })
        .collect())
}

fn classify_eigenvalue(eigenvalue: f64) -> Stability {
    if eigenvalue.abs() <= DEGENERATE_TOLERANCE {
        Stability::Degenerate
    } else if eigenvalue < 0.0 {
        Stability::Stable
    } else {
        Stability::Unstable
    }
}
