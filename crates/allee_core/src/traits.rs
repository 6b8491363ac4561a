use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Floating-point types the model and solvers are generic over.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A one-dimensional autonomous flow `dN/dt = f(N)`.
pub trait ScalarFlow<T: Scalar> {
    fn rate(&self, n: T) -> T;
}

/// Fixed-step integrators for a [`ScalarFlow`].
pub trait Steppable<T: Scalar> {
    /// Advances `state` and `t` in place by one step of size `dt`.
    fn step(&self, flow: &impl ScalarFlow<T>, t: &mut T, state: &mut T, dt: T);
}
