//! Upconversion gain of a two-step excited-state absorber
//!
//! ```text
//! G(X1) = C · (k2·X1² + k3·X1³) / (1 + knr·τ2)
//! ```
//!
//! - **X1** : intermediate-level population (arbitrary units)
//! - **k2, k3** : two- and three-photon upconversion coefficients
//! - **knr·τ2** : non-radiative loss of the upper level
//! - **C** : collection scale

use crate::error::SimulationError;
use crate::models::linspace;

/// Closed-form upconversion gain
///
/// # Example
///
/// ```rust
/// use trapmem_rs::models::UpconversionGain;
///
/// let model = UpconversionGain::default();
/// // (0.5·4 + 0.08·8) / (1 + 1.2·0.9)
/// assert!((model.gain(2.0) - 2.64 / 2.08).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpconversionGain {
    /// Quadratic coefficient `k2`
    pub k2: f64,
    /// Cubic coefficient `k3`
    pub k3: f64,
    /// Non-radiative rate `knr`
    pub knr: f64,
    /// Upper-level lifetime `τ2`
    pub tau2: f64,
    /// Collection scale `C`
    pub scale: f64,
}

impl Default for UpconversionGain {
    fn default() -> Self {
        Self {
            k2: 0.5,
            k3: 0.08,
            knr: 1.2,
            tau2: 0.9,
            scale: 1.0,
        }
    }
}

impl UpconversionGain {
    /// Check that every parameter is finite and the loss denominator is positive
    pub fn validate(&self) -> Result<(), SimulationError> {
        let parameters = [self.k2, self.k3, self.knr, self.tau2, self.scale];
        if parameters.iter().any(|p| !p.is_finite()) {
            return Err(SimulationError::invalid("upconversion parameters must be finite"));
        }
        if self.loss_factor() <= 0.0 {
            return Err(SimulationError::invalid("1 + knr·τ2 must be positive"));
        }
        Ok(())
    }

    /// Denominator `1 + knr·τ2`
    pub fn loss_factor(&self) -> f64 {
        1.0 + self.knr * self.tau2
    }

    /// Gain at a single population
    pub fn gain(&self, x1: f64) -> f64 {
        self.scale * (self.k2 * x1 * x1 + self.k3 * x1 * x1 * x1) / self.loss_factor()
    }

    /// Gain over a uniform population grid `[0, x_max]`
    ///
    /// Returns `(x1, gain)`.
    pub fn sweep(&self, x_max: f64, samples: usize) -> Result<(Vec<f64>, Vec<f64>), SimulationError> {
        self.validate()?;
        if !x_max.is_finite() || x_max < 0.0 {
            return Err(SimulationError::invalid(format!(
                "population range must be finite and non-negative, got {}",
                x_max
            )));
        }

        let x1 = linspace(0.0, x_max, samples);
        let gain = x1.iter().map(|x| self.gain(*x)).collect();
        Ok((x1, gain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sweep() {
        let (x1, gain) = UpconversionGain::default().sweep(10.0, 500).unwrap();

        assert_eq!(x1.len(), 500);
        assert_eq!(gain[0], 0.0);
        // (0.5·100 + 0.08·1000) / 2.08 = 62.5
        assert!((gain[499] - 62.5).abs() < 1e-12);
        assert!(gain.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_gain_is_linear_in_scale() {
        let base = UpconversionGain::default();
        let doubled = UpconversionGain { scale: 2.0, ..base };
        assert!((doubled.gain(3.3) - 2.0 * base.gain(3.3)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_parameters() {
        let negative_loss = UpconversionGain { knr: -2.0, ..Default::default() };
        assert!(negative_loss.validate().is_err());

        let nan = UpconversionGain { k3: f64::NAN, ..Default::default() };
        assert!(nan.sweep(10.0, 10).is_err());

        assert!(UpconversionGain::default().sweep(-1.0, 10).is_err());
    }
}
