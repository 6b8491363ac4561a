use crate::traits::{Scalar, ScalarFlow, Steppable};

/// Explicit (forward) Euler solver.
/// N_next = N + dt * f(N)
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl<T: Scalar> Steppable<T> for Euler {
    fn step(&self, flow: &impl ScalarFlow<T>, t: &mut T, state: &mut T, dt: T) {
        *state = *state + dt * flow.rate(*state);
        *t = *t + dt;
    }
}
