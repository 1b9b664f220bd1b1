//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all physical models
//! - `PhysicalState`: flexible state container
//! - `PhysicalQuantity`: type-safe quantity identifiers

use std::collections::HashMap;
use std::fmt;

use super::data::PhysicalData;

/// Metadata key under which solvers publish the current simulation time
///
/// Time-dependent models (e.g. a trap balance driven by a density sweep)
/// read it back with [`PhysicalState::time`].
pub const TIME_KEY: &str = "time";

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// # Example
/// ```
/// use trapmem_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let quasi_fermi = PhysicalQuantity::Custom("QuasiFermiLevel");
/// let mut state = PhysicalState::empty();
/// state.set(quasi_fermi, PhysicalData::from_scalar(0.42));
/// assert!(state.get(quasi_fermi).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Fraction of trap sites holding a captured carrier (dimensionless, [0, 1])
    TrapOccupancy,

    /// Free carrier density (cm⁻³)
    CarrierDensity,

    /// Excited-state (exciton) population (cm⁻³)
    ExcitonPopulation,

    /// Recombination rate or proxy (arbitrary units unless stated)
    RecombinationRate,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalQuantity::TrapOccupancy => write!(f, "TrapOccupancy"),
            PhysicalQuantity::CarrierDensity => write!(f, "CarrierDensity"),
            PhysicalQuantity::ExcitonPopulation => write!(f, "ExcitonPopulation"),
            PhysicalQuantity::RecombinationRate => write!(f, "RecombinationRate"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Physical state of the system
///
/// Contains all physical quantities at a given time, plus scalar metadata.
/// Solvers store the current time under [`TIME_KEY`].
///
/// # Example
/// ```
/// use trapmem_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let mut state = PhysicalState::new(
///     PhysicalQuantity::TrapOccupancy,
///     PhysicalData::from_scalar(0.05),
/// );
/// state.set_time(2.5);
/// assert_eq!(state.time(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    pub(crate) quantities: HashMap<PhysicalQuantity, PhysicalData>,

    /// Scalar metadata (time, diagnostics, ...)
    pub(crate) metadata: HashMap<String, f64>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self {
            quantities,
            metadata: HashMap::new(),
        }
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&PhysicalData> {
        self.quantities.get(&quantity)
    }

    /// Get mutable reference to a quantity
    pub fn get_mut(&mut self, quantity: PhysicalQuantity) -> Option<&mut PhysicalData> {
        self.quantities.get_mut(&quantity)
    }

    /// Get a scalar quantity, if present and scalar-valued
    pub fn scalar(&self, quantity: PhysicalQuantity) -> Option<f64> {
        self.get(quantity).and_then(PhysicalData::try_as_scalar)
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: PhysicalData) {
        self.quantities.insert(quantity, value);
    }

    /// List of available physical state quantities
    pub fn available_quantities(&self) -> Vec<PhysicalQuantity> {
        self.quantities.keys().cloned().collect()
    }

    /// Iterate over quantities and their data
    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalQuantity, &PhysicalData)> {
        self.quantities.iter()
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: impl Into<String>, value: f64) {
        self.metadata.insert(key.into(), value);
    }

    /// Simulation time stored by the solver (0.0 when absent)
    pub fn time(&self) -> f64 {
        self.get_metadata(TIME_KEY).unwrap_or(0.0)
    }

    /// Store the simulation time
    pub fn set_time(&mut self, time: f64) {
        self.set_metadata(TIME_KEY, time);
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for PhysicalState {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (quantity, value) in rhs.quantities {
            if let Some(existing_value) = self.quantities.remove(&quantity) {
                self.quantities.insert(quantity, existing_value + value);
            } else {
                self.quantities.insert(quantity, value);
            }
        }
        self
    }
}

impl std::ops::Mul<f64> for PhysicalState {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        self.quantities = self
            .quantities
            .into_iter()
            .map(|(quantity, data)| (quantity, data * scalar))
            .collect();
        self
    }
}

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the right-hand side of a system at a given state.
/// Does NOT integrate it (that's the Solver's job).
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to solve them).
pub trait PhysicalModel: Send + Sync {

    /// Number of state components per quantity
    ///
    /// 1 for lumped (scalar) models.
    fn points(&self) -> usize;

    /// Computes the time derivative at a given state
    ///
    /// Returns `dy/dt = f(y, t)` with the same quantities as `state`.
    /// Time-dependent models read `t` from [`PhysicalState::time`].
    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState;

    /// Creates the initial state for this physical model
    fn setup_initial_state(&self) -> PhysicalState;

    /// Projects a freshly stepped state back into its physical domain
    ///
    /// Called by the solvers after every completed step. Returns `true` when
    /// the state had to be corrected. The default keeps the state untouched.
    fn enforce_bounds(&self, _state: &mut PhysicalState) -> bool {
        false
    }

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_physical_state() {
        let physics = PhysicalState::empty();

        assert_eq!(physics.quantities.len(), 0);
        assert_eq!(physics.metadata.len(), 0);
    }

    #[test]
    fn test_new_physical_state() {
        let quantity = PhysicalQuantity::Custom("Tesla");
        let physics = PhysicalState::new(quantity, PhysicalData::from_vec(vec![1.0, 2.0]));

        assert_eq!(physics.quantities.len(), 1);
        assert!(physics.available_quantities().contains(&quantity));
        assert_eq!(physics.get(quantity).unwrap().len(), 2);
    }

    #[test]
    fn test_scalar_accessor() {
        let state = PhysicalState::new(
            PhysicalQuantity::TrapOccupancy,
            PhysicalData::from_scalar(0.3),
        );
        assert_eq!(state.scalar(PhysicalQuantity::TrapOccupancy), Some(0.3));
        assert_eq!(state.scalar(PhysicalQuantity::CarrierDensity), None);
    }

    #[test]
    fn test_time_metadata() {
        let mut state = PhysicalState::empty();
        assert_eq!(state.time(), 0.0);

        state.set_time(10.0);
        assert_eq!(state.time(), 10.0);
        assert_eq!(state.get_metadata(TIME_KEY), Some(10.0));
    }

    #[test]
    fn test_addition() {
        let occupancy = PhysicalState::new(
            PhysicalQuantity::TrapOccupancy,
            PhysicalData::from_scalar(0.25),
        );
        let increment = PhysicalState::new(
            PhysicalQuantity::TrapOccupancy,
            PhysicalData::from_scalar(0.5),
        );
        let density = PhysicalState::new(
            PhysicalQuantity::CarrierDensity,
            PhysicalData::from_scalar(1.0e15),
        );

        let summed = occupancy.clone() + increment;
        assert_eq!(summed.scalar(PhysicalQuantity::TrapOccupancy), Some(0.75));

        let merged = density + occupancy;
        assert_eq!(merged.scalar(PhysicalQuantity::CarrierDensity), Some(1.0e15));
        assert_eq!(merged.scalar(PhysicalQuantity::TrapOccupancy), Some(0.25));
    }

    #[test]
    fn test_multiplication_keeps_metadata() {
        let mut state = PhysicalState::new(
            PhysicalQuantity::ExcitonPopulation,
            PhysicalData::from_vec(vec![1.0, 2.0]),
        );
        state.set_time(3.0);

        let scaled = state * 10.0;

        assert_eq!(scaled.get(PhysicalQuantity::ExcitonPopulation).unwrap().as_vector()[1], 20.0);
        assert_eq!(scaled.time(), 3.0);
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(PhysicalQuantity::TrapOccupancy.to_string(), "TrapOccupancy");
        assert_eq!(PhysicalQuantity::Custom("Mobility").to_string(), "Mobility");
    }
}
