use crate::equation::{render_initial, render_update, EquationFormat, EulerUpdate};
use crate::error::{AlleeError, Result};
use crate::model::{AlleeModel, SimulationParameters};
use crate::solvers::Euler;
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};

/// Horizon used by the reference scenario.
pub const DEFAULT_HORIZON_MONTHS: u32 = 10;

/// Final populations below this count are shown as an extinct colony.
pub const EXTINCTION_DISPLAY_THRESHOLD: f64 = 1.0;

const SUBSTEP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Clamp to `overflow_bound` and flag the trajectory.
    #[default]
    Clamp,
    /// Abort with `AlleeError::NumericOverflow`.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationOptions {
    /// Requested sub-step in months, in (0, 1].
    pub step_size: f64,
    /// Attach a narrated update equation to each sample when `step_size == 1`.
    pub emit_equation_text: bool,
    pub equation_format: EquationFormat,
    /// Populations below this value are snapped to zero after each step.
    pub extinction_floor: f64,
    pub overflow_bound: f64,
    pub overflow_policy: OverflowPolicy,
    pub max_internal_steps: usize,
}

impl Default for IntegrationOptions {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            emit_equation_text: false,
            equation_format: EquationFormat::Latex,
            extinction_floor: 0.01,
            overflow_bound: 1e12,
            overflow_policy: OverflowPolicy::Clamp,
            max_internal_steps: 1_000_000,
        }
    }
}

impl IntegrationOptions {
    /// One Euler update per reported month, narrated.
    pub fn narrated() -> Self {
        Self {
            step_size: 1.0,
            emit_equation_text: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(AlleeError::invalid(
                "step_size",
                self.step_size,
                "must be positive and finite",
            ));
        }
        if self.step_size > 1.0 {
            return Err(AlleeError::invalid(
                "step_size",
                self.step_size,
                "must not exceed one month",
            ));
        }
        if !(self.extinction_floor.is_finite() && self.extinction_floor >= 0.0) {
            return Err(AlleeError::invalid(
                "extinction_floor",
                self.extinction_floor,
                "must be non-negative and finite",
            ));
        }
        if !(self.overflow_bound.is_finite() && self.overflow_bound > 0.0) {
            return Err(AlleeError::invalid(
                "overflow_bound",
                self.overflow_bound,
                "must be positive and finite",
            ));
        }
        if self.max_internal_steps == 0 {
            return Err(AlleeError::invalid(
                "max_internal_steps",
                0.0,
                "must be at least one",
            ));
        }
        Ok(())
    }

    /// Number of Euler sub-steps per month.
    ///
    /// The effective step is `1 / substeps_per_month()`, which never exceeds
    /// the requested `step_size` and lands exactly on every month boundary.
    pub fn substeps_per_month(&self) -> u64 {
        let ratio = (1.0 / self.step_size - SUBSTEP_TOLERANCE).ceil();
        if ratio >= u64::MAX as f64 {
            u64::MAX
        } else {
            (ratio as u64).max(1)
        }
    }
}

/// One reported point of the trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Month index.
    pub time: u32,
    pub population: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<String>,
}

/// Output of [`integrate`]: one sample per whole month from 0 to the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub samples: Vec<Sample>,
    /// Effective internal step size.
    pub dt: f64,
    /// Set when an update exceeded the overflow bound in magnitude and was clamped.
    pub overflowed: bool,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn populations(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.population).collect()
    }

    pub fn initial_population(&self) -> f64 {
        self.samples.first().map_or(0.0, |s| s.population)
    }

    /// Population at the horizon; drives downstream regime and colony displays.
    pub fn final_population(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.population)
    }

    pub fn peak_population(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.population)
            .fold(0.0, f64::max)
    }

    pub fn is_extinct(&self) -> bool {
        self.final_population() < EXTINCTION_DISPLAY_THRESHOLD
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

/// Integrates the Allee-extended logistic equation with fixed-step explicit Euler.
///
/// Returns `horizon_months + 1` samples at months `0..=horizon_months`. The
/// state is snapped to zero whenever it drops below the extinction floor and
/// reported populations are never negative.
pub fn integrate(
    params: &SimulationParameters,
    horizon_months: u32,
    options: &IntegrationOptions,
) -> Result<Trajectory> {
    params.validate()?;
    options.validate()?;
    if horizon_months == 0 {
        return Err(AlleeError::invalid(
            "horizon_months",
            0.0,
            "must be at least one month",
        ));
    }

    let substeps = options.substeps_per_month();
    let requested = substeps.saturating_mul(u64::from(horizon_months));
    if requested > options.max_internal_steps as u64 {
        return Err(AlleeError::StepBudgetExceeded {
            requested,
            limit: options.max_internal_steps,
        });
    }

    if params.initial_population > options.overflow_bound {
        return Err(AlleeError::invalid(
            "N0",
            params.initial_population,
            "must not exceed the overflow bound",
        ));
    }

    let dt = 1.0 / substeps as f64;
    let narrate = options.emit_equation_text && substeps == 1;
    if options.emit_equation_text && !narrate {
        tracing::warn!(
            step_size = options.step_size,
            "equation text is only produced for unit step size; ignoring"
        );
    }
    tracing::debug!(
        r = params.r,
        capacity = params.capacity,
        threshold = params.threshold,
        initial_population = params.initial_population,
        horizon_months,
        dt,
        "integrating population trajectory"
    );

    let model = AlleeModel::<f64>::new(params)?;
    let solver = Euler;
    let mut guard = PopulationGuard::new(options);
    let mut t = 0.0;
    let mut population = params.initial_population;

    let mut samples = Vec::with_capacity(horizon_months as usize + 1);
    samples.push(Sample {
        time: 0,
        population,
        equation: narrate.then(|| render_initial(options.equation_format, population)),
    });

    for month in 1..=horizon_months {
        let previous = population;
        let mut raw = previous;
        for _ in 0..substeps {
            solver.step(&model, &mut t, &mut population, dt);
            raw = population;
            population = guard.check(population, month)?;
        }

        let equation = narrate.then(|| {
            render_update(
                options.equation_format,
                params,
                &EulerUpdate {
                    month,
                    previous,
                    next: raw,
                    dt,
                },
            )
        });
        samples.push(Sample {
            time: month,
            population: population.max(0.0),
            equation,
        });
    }

    let trajectory = Trajectory {
        samples,
        dt,
        overflowed: guard.overflowed,
    };
    tracing::debug!(
        samples = trajectory.len(),
        final_population = trajectory.final_population(),
        overflowed = trajectory.overflowed,
        "integration finished"
    );
    Ok(trajectory)
}

/// Applies the extinction floor and the overflow policy to the state.
struct PopulationGuard {
    floor: f64,
    bound: f64,
    policy: OverflowPolicy,
    overflowed: bool,
}

impl PopulationGuard {
    fn new(options: &IntegrationOptions) -> Self {
        Self {
            floor: options.extinction_floor,
            bound: options.overflow_bound,
            policy: options.overflow_policy,
            overflowed: false,
        }
    }

    fn check(&mut self, value: f64, month: u32) -> Result<f64> {
        let value = self.limit(value, month)?;
        if value < self.floor {
            Ok(0.0)
        } else {
            Ok(value)
        }
    }

    /// Growth past the bound clamps to `bound`; a collapse past `-bound`
    /// clamps to `-bound` and is then taken to zero by the floor.
    fn limit(&mut self, value: f64, month: u32) -> Result<f64> {
        if !(value.is_nan() || value.abs() > self.bound) {
            return Ok(value);
        }
        match self.policy {
            OverflowPolicy::Error => Err(AlleeError::NumericOverflow { month, value }),
            OverflowPolicy::Clamp => {
                if !self.overflowed {
                    tracing::warn!(month, value, bound = self.bound, "population clamped");
                }
                self.overflowed = true;
                if value < 0.0 {
                    Ok(-self.bound)
                } else {
                    Ok(self.bound)
                }
            }
        }
    }
}
