//! Physical models of the photovoltaic experiments
//!
//! Time-dependent models implement the
//! [`PhysicalModel`](crate::physics::PhysicalModel) trait and are integrated
//! by the solvers; the others are closed forms evaluated on a grid.
//!
//! # Trap memory
//!
//! - [`DensitySweep`]: time grid and log-uniform up/down carrier density
//! - [`TrapOccupancy`]: capture/emission balance driven by the sweep, with
//!   its [`StabilityReport`] and [`StepDiagnostics`]
//!
//! The solver writes the current time into the `PhysicalState` metadata
//! before each call to `compute_physics`; [`TrapOccupancy`] turns it into a
//! carrier density through [`DensitySweep::density_at`].
//!
//! # Device models
//!
//! - [`PhotonPumpedExciton`]: exciton rate equation (ODE, RK4)
//! - [`UpconversionGain`]: closed-form gain versus intermediate population
//! - [`JvCurve`]: J–V curve scaled with illumination
//! - [`SrhProfile`]: Gaussian SRH recombination depth profile

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod sweep;
pub mod trap;
pub mod exciton;
pub mod upconversion;
pub mod jv;
pub mod srh;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use sweep::{linspace, DensitySweep};
pub use trap::{StabilityReport, StepDiagnostics, StepRegime, TrapOccupancy};
pub use exciton::PhotonPumpedExciton;
pub use upconversion::UpconversionGain;
pub use jv::{JvCurve, REFERENCE_INTENSITY};
pub use srh::SrhProfile;
