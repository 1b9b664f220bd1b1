//! trapmem-rs: trap-occupancy memory and small photovoltaic device models
//!
//! Simulates how deep traps in a semiconductor remember the carrier density
//! they have seen. A density swept up then down over time drives the trap
//! occupancy through a capture/emission balance; the occupancy lags the
//! density, so a recombination proxy traced against the density shows a
//! hysteresis loop.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define the rate equations ([`physics`], [`models`])
//!    - Numerical solvers integrate them ([`solver`])
//!
//! 2. **One driver for the headline experiment**
//!    - [`experiment::TrapMemoryExperiment`] builds the sweep, runs the
//!      solver and derives the recombination proxy ([`analysis`])
//!
//! # Quick Start
//!
//! ```rust
//! use trapmem_rs::prelude::*;
//!
//! # fn main() -> Result<(), SimulationError> {
//! // 1. Configure the run (defaults are the reference experiment)
//! let config = TrapMemoryConfig::default()
//!     .with_samples(2000)
//!     .with_integrator(Integrator::RungeKutta4);
//!
//! // 2. Run it
//! let run = TrapMemoryExperiment::run(&config)?;
//!
//! // 3. Inspect the loop
//! let hysteresis = run.hysteresis()?;
//! println!("peak gap {:.3e}, area {:.3e}", hysteresis.peak_gap(), hysteresis.area());
//! assert!(run.stability.is_stable());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: State containers and the `PhysicalModel` trait
//! - [`solver`]: Forward Euler and RK4 time integration
//! - [`models`]: Density sweep, trap occupancy, device models
//! - [`analysis`]: Recombination proxy and hysteresis metrics
//! - [`experiment`]: Trap-memory run configuration and driver
//! - [`output`]: Plots (plotters) and CSV export
//! - [`error`]: `SimulationError`
//!
//! # Logging
//!
//! The crate logs through the `log` facade: `debug` per solver run, `info`
//! per experiment, `warn` when the time step is outside the monotone
//! regime. Install any logger in the binary to see them.

// Core modules
pub mod error;
pub mod physics;
pub mod solver;

pub mod models;
pub mod analysis;
pub mod experiment;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use trapmem_rs::prelude::*;
    //! ```
    pub use crate::error::SimulationError;
    pub use crate::physics::{PhysicalData,
                             PhysicalQuantity,
                             PhysicalState,
                             PhysicalModel};
    pub use crate::solver::{Solver,
                            SolverConfiguration,
                            SolverType,
                            Scenario,
                            SimulationResult,
                            EulerSolver,
                            RK4Solver};
    pub use crate::models::{DensitySweep, TrapOccupancy};
    pub use crate::analysis::{HysteresisLoop, RecombinationProxy};
    pub use crate::experiment::{Integrator,
                                TrapMemoryConfig,
                                TrapMemoryExperiment,
                                TrapMemoryRun};
}
