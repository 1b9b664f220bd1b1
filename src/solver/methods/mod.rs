//! Numerical methods for solving differential equations
//!
//! Concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! - **[`EulerSolver`]**: Forward Euler, first order, 1 evaluation per step.
//!   Reference integrator of the trap-memory experiment.
//! - **[`RK4Solver`]**: classical Runge-Kutta, fourth order, 4 evaluations
//!   per step. Used for the exciton rate equation and as the accurate
//!   alternative for the trap balance.
//!
//! Each solver is stateless and can be reused across scenarios. Both publish
//! the current time through [`TIME_KEY`](crate::physics::TIME_KEY) and call
//! [`PhysicalModel::enforce_bounds`](crate::physics::PhysicalModel::enforce_bounds)
//! after every completed step.

mod euler;
mod rk4;

pub use euler::EulerSolver;
pub use rk4::RK4Solver;
