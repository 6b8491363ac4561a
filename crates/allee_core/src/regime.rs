use serde::{Deserialize, Serialize};

/// Qualitative long-run behavior implied by where N0 sits relative to A and K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    BelowThreshold,
    Growing,
    AboveCapacity,
}

impl Regime {
    pub const ALL: [Regime; 3] = [
        Regime::BelowThreshold,
        Regime::Growing,
        Regime::AboveCapacity,
    ];

    /// Stable identifier used by the presentation layer.
    pub fn id(self) -> &'static str {
        match self {
            Regime::BelowThreshold => "below_threshold",
            Regime::Growing => "growing",
            Regime::AboveCapacity => "above_capacity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Regime::BelowThreshold => "0 < N < A",
            Regime::Growing => "A < N < K",
            Regime::AboveCapacity => "N > K",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Regime::BelowThreshold => "population collapses toward extinction",
            Regime::Growing => "population grows toward carrying capacity",
            Regime::AboveCapacity => "population declines toward carrying capacity",
        }
    }

    /// Equilibrium the trajectory approaches under this regime.
    pub fn long_run_limit(self, capacity: f64) -> f64 {
        match self {
            Regime::BelowThreshold => 0.0,
            Regime::Growing | Regime::AboveCapacity => capacity,
        }
    }

    pub fn report(self) -> RegimeReport {
        RegimeReport {
            id: self.id(),
            label: self.label(),
            description: self.description(),
        }
    }
}

/// Serializable tagged value handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegimeReport {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Classifies the scenario from the initial population and the two thresholds.
///
/// Branches are evaluated in order: `N0 < A`, then `N0 < K`, otherwise above
/// capacity. `N0 == A` is therefore `Growing` and `N0 == K` is `AboveCapacity`.
pub fn classify(initial_population: f64, threshold: f64, capacity: f64) -> Regime {
    if initial_population < threshold {
        Regime::BelowThreshold
    } else if initial_population < capacity {
        Regime::Growing
    } else {
        Regime::AboveCapacity
    }
}
