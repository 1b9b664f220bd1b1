//! Current-voltage curve scaled with illumination intensity
//!
//! A reference J–V curve measured (or simulated) at `I_ref` is scaled
//! linearly with the incident intensity:
//!
//! ```text
//! J(V, I) = J_ref(V) · I / I_ref
//! ```
//!
//! The scaling assumes the photocurrent dominates and ignores the
//! logarithmic shift of the open-circuit voltage.

use crate::error::SimulationError;

/// Reference illumination (W/m²)
pub const REFERENCE_INTENSITY: f64 = 1000.0;

/// Reference voltage points (V)
const REFERENCE_VOLTAGE: [f64; 10] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.05, 1.1, 1.15, 1.2];

/// Reference current density at 1000 W/m² (mA/cm²)
const REFERENCE_CURRENT: [f64; 10] = [19.2862, 18.95, 18.9, 18.7, 18.5, 18.3, 17.0, 8.0, 1.0, 0.0];

/// Reference J–V curve
#[derive(Debug, Clone, PartialEq)]
pub struct JvCurve {
    reference_intensity: f64,
    voltage: Vec<f64>,
    current_density: Vec<f64>,
}

impl JvCurve {
    /// Create a curve from paired samples
    ///
    /// # Errors
    ///
    /// - [`SimulationError::LengthMismatch`] when the two sequences differ in length
    /// - [`SimulationError::InvalidConfiguration`] for a non-positive reference
    ///   intensity or non-finite samples
    pub fn new(reference_intensity: f64, voltage: Vec<f64>, current_density: Vec<f64>) -> Result<Self, SimulationError> {
        if voltage.len() != current_density.len() {
            return Err(SimulationError::LengthMismatch {
                expected: voltage.len(),
                found: current_density.len(),
            });
        }
        if !reference_intensity.is_finite() || reference_intensity <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "reference intensity must be positive, got {}",
                reference_intensity
            )));
        }
        if voltage.iter().chain(&current_density).any(|x| !x.is_finite()) {
            return Err(SimulationError::invalid("J-V samples must be finite"));
        }

        Ok(Self {
            reference_intensity,
            voltage,
            current_density,
        })
    }

    /// Ten-point reference curve at 1000 W/m²
    pub fn reference() -> Self {
        Self {
            reference_intensity: REFERENCE_INTENSITY,
            voltage: REFERENCE_VOLTAGE.to_vec(),
            current_density: REFERENCE_CURRENT.to_vec(),
        }
    }

    /// Voltage points (V)
    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    /// Current density at the reference intensity (mA/cm²)
    pub fn current_density(&self) -> &[f64] {
        &self.current_density
    }

    /// Intensity of the reference curve (W/m²)
    pub fn reference_intensity(&self) -> f64 {
        self.reference_intensity
    }

    /// Current density at another intensity
    ///
    /// ```rust
    /// use trapmem_rs::models::JvCurve;
    ///
    /// let curve = JvCurve::reference();
    /// let half = curve.scaled(500.0).unwrap();
    /// assert!((half[0] - 19.2862 / 2.0).abs() < 1e-12);
    /// ```
    pub fn scaled(&self, intensity: f64) -> Result<Vec<f64>, SimulationError> {
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(SimulationError::invalid(format!(
                "intensity must be finite and non-negative, got {}",
                intensity
            )));
        }

        let factor = intensity / self.reference_intensity;
        Ok(self.current_density.iter().map(|j| j * factor).collect())
    }

    /// Scaled curves for several intensities, in input order
    pub fn family(&self, intensities: &[f64]) -> Result<Vec<(f64, Vec<f64>)>, SimulationError> {
        intensities
            .iter()
            .map(|intensity| Ok((*intensity, self.scaled(*intensity)?)))
            .collect()
    }
}

impl Default for JvCurve {
    fn default() -> Self {
        Self::reference()
    }
}
