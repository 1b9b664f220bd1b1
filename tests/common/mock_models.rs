//! Mock physical models with closed-form solutions

use trapmem_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// `y(t) = y0·exp(−k·t)` on a vector of independent cells
pub struct ExponentialDecay {
    pub points: usize,
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let mut result = state.clone();
        if let Some(density) = result.get_mut(PhysicalQuantity::CarrierDensity) {
            density.apply(|y| -self.decay_rate * y);
        }
        result
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::CarrierDensity,
            PhysicalData::uniform_vector(self.points, 1.0),
        )
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// `y(t) = y0 + c·t`, integrated exactly by both schemes
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl PhysicalModel for ConstantGrowth {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, _state: &PhysicalState) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::ExcitonPopulation,
            PhysicalData::from_scalar(self.growth_rate),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::ExcitonPopulation, PhysicalData::from_scalar(0.0))
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Time Ramp: dy/dt = t
// =================================================================================================

/// `y(t) = t²/2`, only reachable if the solver passes time to the model
pub struct TimeRamp;

impl PhysicalModel for TimeRamp {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::RecombinationRate,
            PhysicalData::from_scalar(state.time()),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::RecombinationRate, PhysicalData::from_scalar(0.0))
    }

    fn name(&self) -> &str {
        "Time Ramp"
    }
}
