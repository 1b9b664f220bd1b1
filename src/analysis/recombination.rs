//! Recombination-rate proxy
//!
//! ```text
//! R(t) = A · n(t) · f(t)
//! ```
//!
//! Recombination through traps scales with the free-carrier density and the
//! fraction of occupied traps; `A` lumps every other factor into one scale.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SimulationError;
use crate::solver::parallel_threshold;

/// Elementwise `A·n·f`
///
/// # Example
///
/// ```rust
/// use trapmem_rs::analysis::RecombinationProxy;
///
/// let proxy = RecombinationProxy::new(1e-20).unwrap();
/// let rate = proxy.evaluate(&[1e16, 1e17], &[0.5, 1.0]).unwrap();
/// assert_eq!(rate, vec![1e-20 * 1e16 * 0.5, 1e-20 * 1e17 * 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecombinationProxy {
    scale: f64,
}

impl RecombinationProxy {
    /// Create a proxy with scale `A > 0`
    pub fn new(scale: f64) -> Result<Self, SimulationError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "recombination scale must be positive and finite, got {}",
                scale
            )));
        }
        Ok(Self { scale })
    }

    /// Scale `A`
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Proxy at a single sample
    #[inline]
    pub fn rate(&self, density: f64, occupancy: f64) -> f64 {
        self.scale * density * occupancy
    }

    /// Proxy over paired density and occupancy sequences
    ///
    /// # Errors
    ///
    /// [`SimulationError::LengthMismatch`] when the sequences differ in length.
    pub fn evaluate(&self, density: &[f64], occupancy: &[f64]) -> Result<Vec<f64>, SimulationError> {
        if density.len() != occupancy.len() {
            return Err(SimulationError::LengthMismatch {
                expected: density.len(),
                found: occupancy.len(),
            });
        }

        if density.len() > parallel_threshold() {
            #[cfg(feature = "parallel")]
            return Ok(density
                .par_iter()
                .zip(occupancy.par_iter())
                .map(|(n, f)| self.rate(*n, *f))
                .collect());
        }

        Ok(density
            .iter()
            .zip(occupancy)
            .map(|(n, f)| self.rate(*n, *f))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::ThresholdGuard;

    #[test]
    fn test_invalid_scale() {
        assert!(RecombinationProxy::new(0.0).is_err());
        assert!(RecombinationProxy::new(-1e-20).is_err());
        assert!(RecombinationProxy::new(f64::NAN).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let proxy = RecombinationProxy::new(1e-20).unwrap();
        assert_eq!(
            proxy.evaluate(&[1.0, 2.0], &[0.5]),
            Err(SimulationError::LengthMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_empty_input() {
        let proxy = RecombinationProxy::new(1e-20).unwrap();
        assert!(proxy.evaluate(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_large_input_matches_small_path() {
        let proxy = RecombinationProxy::new(2.0).unwrap();
        let density: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let occupancy: Vec<f64> = (0..64).map(|i| 1.0 / (1.0 + i as f64)).collect();

        let sequential = proxy.evaluate(&density, &occupancy).unwrap();
        let _guard = ThresholdGuard::save(8);
        let threshold_path = proxy.evaluate(&density, &occupancy).unwrap();

        assert_eq!(sequential, threshold_path);
    }
}
