//! Simulation scenario definition
//!
//! A scenario combines a physical model with boundary conditions.
use crate::error::SimulationError;
use crate::physics::PhysicalModel;
use crate::solver::boundary::DomainBoundaries;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Boundary conditions (initial state)
///
/// The same scenario can be integrated with different numerical methods.
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Conditions and boundaries
    pub conditions: DomainBoundaries,
}

impl Scenario {

    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, conditions: DomainBoundaries) -> Self {
        Self { model, conditions }
    }

    /// Create a scenario starting from the model's own initial state
    pub fn from_model(model: Box<dyn PhysicalModel>) -> Self {
        let conditions = DomainBoundaries::temporal(model.setup_initial_state());
        Self::new(model, conditions)
    }

    /// Verifying scenario content (mainly boundaries)
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.conditions.validate()
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.conditions.ndim()
    }

    /// Time dependant equations
    pub fn is_time_dependent(&self) -> bool {
        self.conditions.is_time_dependent()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("dimension", &self.ndim())
            .field("is time dependent", &self.is_time_dependent())
            .field("Boundaries / conditions", &self.conditions)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalQuantity, PhysicalState};

    struct MockModel;

    impl PhysicalModel for MockModel {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
            state.clone()
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::TrapOccupancy, PhysicalData::from_scalar(0.5))
        }

        fn name(&self) -> &str {
            "MockModel"
        }
    }

    #[test]
    fn test_scenario_creation() {
        let scenario = Scenario::new(Box::new(MockModel), DomainBoundaries::default());
        assert_eq!(scenario.get_model_name(), "MockModel");
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_scenario_from_model() {
        let scenario = Scenario::from_model(Box::new(MockModel));
        assert!(scenario.validate().is_ok());
        assert!(scenario.is_time_dependent());

        let initial = scenario.conditions.initial_condition().unwrap();
        assert_eq!(initial.scalar(PhysicalQuantity::TrapOccupancy), Some(0.5));
    }

    #[test]
    fn test_scenario_debug() {
        let scenario = Scenario::from_model(Box::new(MockModel));
        let rendered = format!("{:?}", scenario);
        assert!(rendered.contains("MockModel"));
    }
}
