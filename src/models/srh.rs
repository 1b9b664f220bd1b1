//! Depth profile of Shockley-Read-Hall recombination
//!
//! A Gaussian recombination peak in the absorber on top of a uniform
//! background, scaled linearly with illumination:
//!
//! ```text
//! R0(z)   = R_peak · exp(−(z − c)² / (2w²)) + R_bg
//! R(z, I) = R0(z) · I / 1000
//! ```

use crate::error::SimulationError;
use crate::models::jv::REFERENCE_INTENSITY;
use crate::models::linspace;
use crate::physics::{PhysicalData, PhysicalQuantity, PhysicalState};

/// Gaussian SRH recombination profile (depths in nm, rates in m⁻³·s⁻¹)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SrhProfile {
    /// Depth of the peak (nm)
    pub center: f64,
    /// Standard deviation of the peak (nm)
    pub width: f64,
    /// Peak height above background
    pub peak_rate: f64,
    /// Uniform background rate
    pub background_rate: f64,
}

impl Default for SrhProfile {
    fn default() -> Self {
        Self {
            center: 325.0,
            width: 180.0,
            peak_rate: 1.2e28,
            background_rate: 1e27,
        }
    }
}

impl SrhProfile {
    /// Check parameters
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(SimulationError::invalid(format!("peak width must be positive, got {}", self.width)));
        }
        if [self.center, self.peak_rate, self.background_rate].iter().any(|p| !p.is_finite()) {
            return Err(SimulationError::invalid("SRH profile parameters must be finite"));
        }
        Ok(())
    }

    /// Rate at depth `z` under the reference illumination
    pub fn rate_at(&self, depth: f64) -> f64 {
        let offset = depth - self.center;
        self.peak_rate * (-(offset * offset) / (2.0 * self.width * self.width)).exp() + self.background_rate
    }

    /// Profile sampled on `[0, thickness]`
    ///
    /// Returns `(depth, rate)`.
    ///
    /// ```rust
    /// use trapmem_rs::models::SrhProfile;
    ///
    /// let (depth, rate) = SrhProfile::default().profile(650.0, 300).unwrap();
    /// assert_eq!(depth.len(), 300);
    /// assert!(rate.iter().all(|r| *r >= 1e27));
    /// ```
    pub fn profile(&self, thickness: f64, samples: usize) -> Result<(Vec<f64>, Vec<f64>), SimulationError> {
        let depth = self.depth_grid(thickness, samples)?;
        let rate = self.rate_data(&depth);
        Ok((depth, rate.values().collect()))
    }

    /// Profile at intensity `I` as a `RecombinationRate` vector state
    ///
    /// The state carries one rate per depth sample of `[0, thickness]`.
    ///
    /// ```rust
    /// use trapmem_rs::models::SrhProfile;
    /// use trapmem_rs::physics::PhysicalQuantity;
    ///
    /// let state = SrhProfile::default().profile_state(650.0, 300, 500.0).unwrap();
    /// let rate = state.get(PhysicalQuantity::RecombinationRate).unwrap();
    /// assert_eq!(rate.len(), 300);
    /// ```
    pub fn profile_state(
        &self,
        thickness: f64,
        samples: usize,
        intensity: f64,
    ) -> Result<PhysicalState, SimulationError> {
        let factor = illumination_factor(intensity)?;
        let depth = self.depth_grid(thickness, samples)?;
        Ok(PhysicalState::new(
            PhysicalQuantity::RecombinationRate,
            self.rate_data(&depth) * factor,
        ))
    }

    /// Profile scaled to the given intensities (W/m²)
    pub fn intensity_family(
        &self,
        thickness: f64,
        samples: usize,
        intensities: &[f64],
    ) -> Result<(Vec<f64>, Vec<(f64, Vec<f64>)>), SimulationError> {
        let depth = self.depth_grid(thickness, samples)?;
        let rate = self.rate_data(&depth);

        let family = intensities
            .iter()
            .map(|intensity| {
                let factor = illumination_factor(*intensity)?;
                let scaled = rate.clone() * factor;
                Ok((*intensity, scaled.values().collect()))
            })
            .collect::<Result<Vec<_>, SimulationError>>()?;

        Ok((depth, family))
    }

    fn depth_grid(&self, thickness: f64, samples: usize) -> Result<Vec<f64>, SimulationError> {
        self.validate()?;
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "absorber thickness must be positive, got {}",
                thickness
            )));
        }
        Ok(linspace(0.0, thickness, samples))
    }

    /// Reference-illumination rates over `depth`, mapped in place
    fn rate_data(&self, depth: &[f64]) -> PhysicalData {
        let mut rate = PhysicalData::from_vec(depth.to_vec());
        rate.apply(|z| self.rate_at(z));
        rate
    }
}

fn illumination_factor(intensity: f64) -> Result<f64, SimulationError> {
    if !intensity.is_finite() || intensity < 0.0 {
        return Err(SimulationError::invalid(format!(
            "intensity must be finite and non-negative, got {}",
            intensity
        )));
    }
    Ok(intensity / REFERENCE_INTENSITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_location() {
        let (depth, rate) = SrhProfile::default().profile(650.0, 300).unwrap();

        let (peak_index, _) = rate
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, r)| if *r > best.1 { (i, *r) } else { best });

        // 325 nm sits between samples 149 and 150 of a 300-point grid
        assert!((depth[peak_index] - 325.0).abs() < 650.0 / 299.0);
        assert!((SrhProfile::default().rate_at(325.0) - 1.3e28).abs() < 1e13);
    }

    #[test]
    fn test_profile_is_symmetric() {
        let profile = SrhProfile::default();
        let left = profile.rate_at(100.0);
        let right = profile.rate_at(550.0);
        assert!((left - right).abs() / left < 1e-12);
    }

    #[test]
    fn test_intensity_family() {
        let (depth, family) = SrhProfile::default()
            .intensity_family(650.0, 50, &[200.0, 400.0, 600.0, 800.0, 1000.0])
            .unwrap();

        assert_eq!(depth.len(), 50);
        assert_eq!(family.len(), 5);

        let (_, full) = &family[4];
        let (_, fifth) = &family[0];
        for (a, b) in full.iter().zip(fifth) {
            assert!((a / 5.0 - b).abs() / b < 1e-12);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let flat = SrhProfile { width: 0.0, ..Default::default() };
        assert!(flat.profile(650.0, 10).is_err());
        assert!(SrhProfile::default().profile(-1.0, 10).is_err());
        assert!(SrhProfile::default().intensity_family(650.0, 10, &[-200.0]).is_err());
        assert!(SrhProfile::default().profile_state(650.0, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_profile_state_is_vector_rate() {
        let profile = SrhProfile::default();
        let state = profile.profile_state(650.0, 120, 400.0).unwrap();
        let data = state.get(PhysicalQuantity::RecombinationRate).unwrap();

        assert!(data.is_vector());
        assert_eq!(data.len(), 120);

        let (_, reference) = profile.profile(650.0, 120).unwrap();
        for (scaled, full) in data.values().zip(&reference) {
            assert!((scaled - full * 0.4).abs() / full < 1e-12);
        }
    }

    #[test]
    fn test_large_profile_matches_pointwise_rate() {
        // Above the parallel threshold the map runs on the rayon pool
        let profile = SrhProfile::default();
        let (depth, rate) = profile.profile(650.0, 10_000).unwrap();

        assert_eq!(rate.len(), 10_000);
        for (z, r) in depth.iter().zip(&rate).step_by(997) {
            assert_eq!(*r, profile.rate_at(*z));
        }
    }
}
