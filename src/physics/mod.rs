//! Physical models
//!
//! This module provides the containers and the trait every model implements.
//! A physical model encapsulates the equations of a system (a trap
//! capture/emission balance, an exciton rate equation) and nothing else.
//!
//! # Core Concepts
//!
//! - **Physical Model**: Computes the time derivative at a given state
//! - **Physical State**: Container for all physical quantities plus metadata
//! - **Physical Quantity**: Type-safe identifier for physical variables
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to integrate them (numerics)
//!
//! # Example
//!
//! ```rust
//! use trapmem_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
//!
//! /// Plain emission: df/dt = -ke * f
//! struct Emission {
//!     ke: f64,
//! }
//!
//! impl PhysicalModel for Emission {
//!     fn points(&self) -> usize { 1 }
//!
//!     fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
//!         let f = state.scalar(PhysicalQuantity::TrapOccupancy).unwrap_or(0.0);
//!         PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(-self.ke * f))
//!     }
//!
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(1.0))
//!     }
//!
//!     fn name(&self) -> &str { "Emission" }
//! }
//!
//! let model = Emission { ke: 0.4 };
//! let rate = model.compute_physics(&model.setup_initial_state());
//! assert_eq!(rate.scalar(PhysicalQuantity::TrapOccupancy), Some(-0.4));
//! ```

// module declaration
pub mod traits;
pub mod data;

// re-export commonly used types for convenience
pub use data::PhysicalData;
pub use traits::{
    PhysicalModel,
    PhysicalQuantity,
    PhysicalState,
    TIME_KEY,
};
