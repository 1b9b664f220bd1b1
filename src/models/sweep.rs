//! Synthetic carrier-density sweep
//!
//! Generates the drive signal of the trap-memory experiment: a uniform time
//! grid on `[0, t_end]` and a carrier density that ramps log-uniformly from
//! `10^logn_low` up to `10^logn_high` over the first half of the samples and
//! back down over the second half.
//!
//! ```text
//! log10 n
//!   high ┤        ╱╲
//!        │      ╱    ╲
//!        │    ╱        ╲
//!    low ┤  ╱            ╲
//!        └──────┬──────────── t
//!             split = N/2
//! ```
//!
//! The rising leg holds `N/2` samples and the falling leg `N - N/2`, so for
//! odd `N` the median sample is the first point of the falling leg.

use crate::error::SimulationError;

/// Tolerance (in units of `dt`) under which a time is snapped to a sample
const GRID_SNAP_TOLERANCE: f64 = 1e-9;

/// `n` evenly spaced values on `[start, stop]`, the last one exactly `stop`
///
/// `linspace(a, b, 1) == [a]` and `linspace(a, b, 0)` is empty.
///
/// # Example
///
/// ```rust
/// use trapmem_rs::models::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

// =================================================================================================
// Density Sweep
// =================================================================================================

/// Up-then-down log-uniform carrier-density sweep on a uniform time grid
///
/// # Example
///
/// ```rust
/// use trapmem_rs::models::DensitySweep;
///
/// let sweep = DensitySweep::up_down(20.0, 4000, 14.0, 17.0).unwrap();
///
/// assert_eq!(sweep.len(), 4000);
/// assert_eq!(sweep.split_index(), 2000);
/// assert_eq!(sweep.time()[3999], 20.0);
/// assert_eq!(sweep.log_density()[0], 14.0);
/// assert_eq!(sweep.log_density()[1999], 17.0);
/// assert_eq!(sweep.log_density()[3999], 14.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySweep {
    time: Vec<f64>,
    log_density: Vec<f64>,
    density: Vec<f64>,
    dt: f64,
    split_index: usize,
}

impl DensitySweep {
    /// Build the sweep
    ///
    /// # Arguments
    ///
    /// * `t_end` - simulated duration (s), positive and finite
    /// * `samples` - number of samples `N ≥ 1`
    /// * `logn_low`, `logn_high` - base-10 exponents of the density extremes
    ///   (cm⁻³), finite with `logn_low ≤ logn_high`
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfiguration`] on any invalid argument.
    pub fn up_down(t_end: f64, samples: usize, logn_low: f64, logn_high: f64) -> Result<Self, SimulationError> {
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "t_end must be positive and finite, got {}",
                t_end
            )));
        }
        if samples == 0 {
            return Err(SimulationError::invalid("the sweep needs at least one sample"));
        }
        if !logn_low.is_finite() || !logn_high.is_finite() {
            return Err(SimulationError::invalid("density exponents must be finite"));
        }
        if logn_low > logn_high {
            return Err(SimulationError::invalid(format!(
                "logn_low ({}) must not exceed logn_high ({})",
                logn_low, logn_high
            )));
        }

        let dt = if samples > 1 { t_end / (samples - 1) as f64 } else { 0.0 };

        let mut time: Vec<f64> = (0..samples).map(|i| i as f64 * dt).collect();
        if samples > 1 {
            time[samples - 1] = t_end;
        }

        let split_index = samples / 2;
        let mut log_density = linspace(logn_low, logn_high, split_index);
        log_density.extend(linspace(logn_high, logn_low, samples - split_index));

        let density: Vec<f64> = log_density.iter().map(|x| 10f64.powf(*x)).collect();
        if let Some(bad) = density.iter().find(|n| !n.is_finite() || **n <= 0.0) {
            return Err(SimulationError::invalid(format!(
                "densities 10^[{}, {}] must be positive and finite, got {}",
                logn_low, logn_high, bad
            )));
        }

        Ok(Self {
            time,
            log_density,
            density,
            dt,
            split_index,
        })
    }

    // ===================================== Query methods =========================================

    /// Time grid (s)
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// log10 of the carrier density
    pub fn log_density(&self) -> &[f64] {
        &self.log_density
    }

    /// Carrier density (cm⁻³)
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Grid spacing, 0.0 for a single-sample sweep
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Index of the first sample of the falling leg (`N / 2`)
    pub fn split_index(&self) -> usize {
        self.split_index
    }

    /// Total duration of the sweep
    pub fn duration(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false for a constructed sweep
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    // ======================================= Lookup ==============================================

    /// log10 density at an arbitrary time
    ///
    /// Returns the stored sample when `t` sits on the grid, interpolates
    /// linearly between neighbours otherwise and clamps outside `[0, t_end]`.
    pub fn log_density_at(&self, t: f64) -> f64 {
        match self.locate(t) {
            Location::Sample(index) => self.log_density[index],
            Location::Between(index, fraction) => {
                let a = self.log_density[index];
                let b = self.log_density[index + 1];
                a + fraction * (b - a)
            }
        }
    }

    /// Carrier density at an arbitrary time
    ///
    /// On grid points this is bit-identical to `density()[i]`; between them
    /// it is `10^(interpolated log10 n)`.
    ///
    /// ```rust
    /// use trapmem_rs::models::DensitySweep;
    ///
    /// let sweep = DensitySweep::up_down(10.0, 11, 14.0, 16.0).unwrap();
    /// assert_eq!(sweep.density_at(3.0), sweep.density()[3]);
    /// ```
    pub fn density_at(&self, t: f64) -> f64 {
        match self.locate(t) {
            Location::Sample(index) => self.density[index],
            Location::Between(..) => 10f64.powf(self.log_density_at(t)),
        }
    }

    fn locate(&self, t: f64) -> Location {
        let last = self.len().saturating_sub(1);
        if last == 0 || self.dt <= 0.0 {
            return Location::Sample(0);
        }

        let position = (t / self.dt).clamp(0.0, last as f64);
        let nearest = position.round();

        if (position - nearest).abs() < GRID_SNAP_TOLERANCE {
            return Location::Sample(nearest as usize);
        }

        let index = (position.floor() as usize).min(last - 1);
        Location::Between(index, position - index as f64)
    }
}

/// Position of a time on the sample grid
enum Location {
    Sample(usize),
    Between(usize, f64),
}

// =================================================================================================
// Tests
// =================================================================================================
