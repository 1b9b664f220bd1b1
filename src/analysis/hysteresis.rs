//! Hysteresis between the rising and falling legs of a sweep
//!
//! The trace `R(t)` is split at the turning point of the density sweep and
//! each leg becomes a curve `R(log10 n)`. A memoryless system would retrace
//! the same curve in both directions; a gap between the two curves at the
//! same `log10 n` is the signature of trap memory.
//!
//! ```text
//!   R │        ╭──╮  falling
//!     │      ╭─╯  │
//!     │    ╭─╯ ╭──╯  rising
//!     │  ╭─╯╭──╯
//!     └──┴──┴───────── log10 n
//! ```

use crate::error::SimulationError;
use crate::models::linspace;

// =================================================================================================
// Branch
// =================================================================================================

/// One leg of the loop, stored with ascending abscissa
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// log10 n, non-decreasing
    pub log_density: Vec<f64>,

    /// Value of the traced quantity at each abscissa
    pub value: Vec<f64>,
}

impl Branch {
    fn from_samples(log_density: &[f64], value: &[f64]) -> Self {
        let mut pairs: Vec<(f64, f64)> = log_density.iter().copied().zip(value.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (log_density, value) = pairs.into_iter().unzip();
        Self { log_density, value }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.log_density.len()
    }

    /// True for an empty leg
    pub fn is_empty(&self) -> bool {
        self.log_density.is_empty()
    }

    /// `(min, max)` of the abscissa
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.log_density.first()?, *self.log_density.last()?))
    }

    /// Linear interpolation at `x`, `None` outside the leg
    pub fn interpolate(&self, x: f64) -> Option<f64> {
        let (low, high) = self.range()?;
        if !(low..=high).contains(&x) {
            return None;
        }

        let index = self.log_density.partition_point(|v| *v < x);
        if self.log_density[index] == x {
            return Some(self.value[index]);
        }

        let (x0, x1) = (self.log_density[index - 1], self.log_density[index]);
        let (y0, y1) = (self.value[index - 1], self.value[index]);
        Some(y0 + (x - x0) / (x1 - x0) * (y1 - y0))
    }
}

// =================================================================================================
// Hysteresis Loop
// =================================================================================================

/// Rising and falling legs of a traced quantity against log10 n
///
/// # Example
///
/// ```rust
/// use trapmem_rs::analysis::HysteresisLoop;
///
/// let log_n = [14.0, 15.0, 16.0, 16.0, 15.0, 14.0];
/// let rate = [0.0, 1.0, 2.0, 4.0, 3.0, 2.0];
///
/// let hysteresis = HysteresisLoop::from_sweep(&log_n, &rate, 3).unwrap();
/// assert_eq!(hysteresis.gap_at(15.0), Some(2.0));
/// assert_eq!(hysteresis.gap_at(13.0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HysteresisLoop {
    rising: Branch,
    falling: Branch,
    peak_value: f64,
}

impl HysteresisLoop {
    /// Split a trace at `split`: `[0, split)` is rising, `[split, N)` falling
    ///
    /// # Errors
    ///
    /// - [`SimulationError::LengthMismatch`] when the sequences differ in length
    /// - [`SimulationError::InvalidConfiguration`] when `split > N` or a
    ///   sample is not finite
    pub fn from_sweep(log_density: &[f64], value: &[f64], split: usize) -> Result<Self, SimulationError> {
        if log_density.len() != value.len() {
            return Err(SimulationError::LengthMismatch {
                expected: log_density.len(),
                found: value.len(),
            });
        }
        if split > log_density.len() {
            return Err(SimulationError::invalid(format!(
                "split index {} exceeds trace length {}",
                split,
                log_density.len()
            )));
        }
        if log_density.iter().chain(value).any(|x| !x.is_finite()) {
            return Err(SimulationError::invalid("hysteresis samples must be finite"));
        }

        let peak_value = value.iter().fold(0.0f64, |peak, v| peak.max(v.abs()));

        Ok(Self {
            rising: Branch::from_samples(&log_density[..split], &value[..split]),
            falling: Branch::from_samples(&log_density[split..], &value[split..]),
            peak_value,
        })
    }

    /// Rising leg (first half of the sweep)
    pub fn rising(&self) -> &Branch {
        &self.rising
    }

    /// Falling leg (second half of the sweep)
    pub fn falling(&self) -> &Branch {
        &self.falling
    }

    /// Value on the rising leg at `log10 n = x`
    pub fn rising_at(&self, x: f64) -> Option<f64> {
        self.rising.interpolate(x)
    }

    /// Value on the falling leg at `log10 n = x`
    pub fn falling_at(&self, x: f64) -> Option<f64> {
        self.falling.interpolate(x)
    }

    /// `falling_at(x) − rising_at(x)`
    pub fn gap_at(&self, x: f64) -> Option<f64> {
        Some(self.falling_at(x)? - self.rising_at(x)?)
    }

    /// log10 n interval covered by both legs
    pub fn common_range(&self) -> Option<(f64, f64)> {
        let (rise_low, rise_high) = self.rising.range()?;
        let (fall_low, fall_high) = self.falling.range()?;

        let low = rise_low.max(fall_low);
        let high = rise_high.min(fall_high);
        (low <= high).then_some((low, high))
    }

    /// Largest `|gap|` on a uniform grid of `samples` points over the common range
    ///
    /// 0.0 when the legs do not overlap.
    pub fn max_gap(&self, samples: usize) -> f64 {
        let Some((low, high)) = self.common_range() else {
            return 0.0;
        };

        linspace(low, high, samples)
            .into_iter()
            .filter_map(|x| self.gap_at(x))
            .fold(0.0, |widest, gap| widest.max(gap.abs()))
    }

    /// Largest `|gap|` over every abscissa of either leg
    ///
    /// The gap is piecewise linear between those abscissae, so this is the
    /// exact maximum over the common range.
    pub fn peak_gap(&self) -> f64 {
        self.breakpoints()
            .into_iter()
            .filter_map(|x| self.gap_at(x))
            .fold(0.0, |widest, gap| widest.max(gap.abs()))
    }

    /// Signed area `∫ (falling − rising) d log10 n` over the common range
    pub fn area(&self) -> f64 {
        let points: Vec<(f64, f64)> = self
            .breakpoints()
            .into_iter()
            .filter_map(|x| Some((x, self.gap_at(x)?)))
            .collect();

        points
            .windows(2)
            .map(|w| 0.5 * (w[1].0 - w[0].0) * (w[0].1 + w[1].1))
            .sum()
    }

    /// True when the peak gap is at or below `tolerance · max|value|`
    ///
    /// The bound is inclusive so a trace that is zero everywhere counts as
    /// degenerate.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.peak_gap() <= tolerance * self.peak_value
    }

    /// Sorted, deduplicated abscissae of both legs inside the common range
    fn breakpoints(&self) -> Vec<f64> {
        let Some((low, high)) = self.common_range() else {
            return Vec::new();
        };

        let mut points: Vec<f64> = self
            .rising
            .log_density
            .iter()
            .chain(&self.falling.log_density)
            .copied()
            .filter(|x| (low..=high).contains(x))
            .collect();

        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }
}

// =================================================================================================
// Tests
// =================================================================================================
