//! Domain boundaries
//!
//! The crate only integrates lumped ODEs, so a domain is a list of named
//! dimensions where the temporal one carries the initial condition.

use std::fmt;

use crate::error::SimulationError;
use crate::physics::PhysicalState;

// =================================================================================================
// Domain Boundaries
// =================================================================================================

/// Domain boundaries
///
/// Stores boundary states as vectors of `PhysicalState` per dimension.
/// The temporal dimension holds `[initial_state]`.
///
/// # Examples
///
/// ```rust
/// use trapmem_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
/// use trapmem_rs::solver::DomainBoundaries;
///
/// let initial = PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(0.05));
/// let boundaries = DomainBoundaries::temporal(initial);
///
/// assert_eq!(boundaries.ndim(), 1);
/// assert!(boundaries.is_time_dependent());
/// assert!(boundaries.initial_condition().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct DomainBoundaries {
    /// Boundaries for each dimension
    pub dimensions: Vec<DimensionBoundary>,

    /// Convention for identifying the time dimension
    pub convention: TimeAxisConvention,
}

impl DomainBoundaries {
    /// Create with the default convention (time is the last dimension)
    pub fn new(dimensions: Vec<DimensionBoundary>) -> Self {
        Self {
            dimensions,
            convention: TimeAxisConvention::Last,
        }
    }

    /// Create temporal-only domain (ODE)
    pub fn temporal(initial: PhysicalState) -> Self {
        Self::new(vec![DimensionBoundary::new("t", vec![initial])])
    }

    // ===================================== Query methods =========================================

    /// Total number of dimensions
    pub fn ndim(&self) -> usize {
        self.dimensions.len()
    }

    /// Check time dependant equation
    pub fn is_time_dependent(&self) -> bool {
        self.convention != TimeAxisConvention::None
    }

    /// Get time dimension index
    pub fn time_index(&self) -> Option<usize> {
        match self.convention {
            TimeAxisConvention::Last => self.ndim().checked_sub(1),
            TimeAxisConvention::None => None,
        }
    }

    /// Get temporal boundary
    pub fn time_boundary(&self) -> Option<&DimensionBoundary> {
        self.time_index().and_then(|index| self.dimensions.get(index))
    }

    /// Get initial condition as the first physical state of temporal boundary
    pub fn initial_condition(&self) -> Option<&PhysicalState> {
        self.time_boundary().and_then(|boundary| boundary.states.first())
    }

    /// Validate the object contents
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.dimensions.is_empty() {
            return Err(SimulationError::invalid("dimension boundaries cannot be empty"));
        }

        for dimension in &self.dimensions {
            dimension.validate()?;
        }

        let names: Vec<&str> = self.dimensions.iter().map(|d| d.name.as_str()).collect();
        let unique: std::collections::HashSet<&str> = names.iter().copied().collect();

        if unique.len() != names.len() {
            return Err(SimulationError::invalid("two dimensions share the same name"));
        }

        Ok(())
    }
}

impl Default for DomainBoundaries {
    fn default() -> Self {
        Self {
            dimensions: Vec::new(),
            convention: TimeAxisConvention::None,
        }
    }
}

// =================================================================================================
// Dimension Boundary
// =================================================================================================

/// Boundary for one dimension (variable)
#[derive(Debug, Clone)]
pub struct DimensionBoundary {
    /// Dimension name
    pub name: String,

    /// Physical states at boundaries
    pub states: Vec<PhysicalState>,
}

impl DimensionBoundary {
    /// Generic constructor
    pub fn new(name: impl Into<String>, states: Vec<PhysicalState>) -> Self {
        Self { name: name.into(), states }
    }

    /// Verify if there are no boundaries
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Validate dimension
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.is_empty() {
            return Err(SimulationError::invalid(format!(
                "dimension '{}' must have at least one boundary state",
                self.name
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Time Axis Convention
// =================================================================================================

/// Convention for identifying the time variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAxisConvention {
    /// No time dimension (steady-state)
    None,

    /// Last dimension is time
    Last,
}

impl fmt::Display for TimeAxisConvention {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeAxisConvention::None => write!(f, "None"),
            TimeAxisConvention::Last => write!(f, "Last"),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalQuantity};

    fn occupancy(f: f64) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(f))
    }

    #[test]
    fn test_temporal_boundaries() {
        let boundaries = DomainBoundaries::temporal(occupancy(0.05));

        assert_eq!(boundaries.ndim(), 1);
        assert_eq!(boundaries.time_index(), Some(0));
        assert!(boundaries.validate().is_ok());

        let initial = boundaries.initial_condition().unwrap();
        assert_eq!(initial.scalar(PhysicalQuantity::TrapOccupancy), Some(0.05));
    }

    #[test]
    fn test_default_is_invalid() {
        let boundaries = DomainBoundaries::default();
        assert!(!boundaries.is_time_dependent());
        assert!(boundaries.initial_condition().is_none());
        assert!(boundaries.validate().is_err());
    }

    #[test]
    fn test_empty_dimension_is_invalid() {
        let boundaries = DomainBoundaries::new(vec![DimensionBoundary::new("t", vec![])]);
        let err = boundaries.validate().unwrap_err();
        assert!(err.to_string().contains("'t'"));
    }

    #[test]
    fn test_duplicate_names_are_invalid() {
        let boundaries = DomainBoundaries::new(vec![
            DimensionBoundary::new("t", vec![occupancy(0.0)]),
            DimensionBoundary::new("t", vec![occupancy(1.0)]),
        ]);
        assert!(boundaries.validate().is_err());
    }

    #[test]
    fn test_convention_display() {
        assert_eq!(TimeAxisConvention::Last.to_string(), "Last");
        assert_eq!(TimeAxisConvention::None.to_string(), "None");
    }
}
