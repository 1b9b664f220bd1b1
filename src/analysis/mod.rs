//! Post-processing of simulated traces
//!
//! - [`RecombinationProxy`]: `R = A·n·f` from density and occupancy
//! - [`HysteresisLoop`]: comparison of the rising and falling legs of a
//!   sweep at equal `log10 n`

pub mod recombination;
pub mod hysteresis;

pub use recombination::RecombinationProxy;
pub use hysteresis::{Branch, HysteresisLoop};
