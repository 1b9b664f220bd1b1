//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Default palette for multi-curve plots
const PALETTE: [RGBColor; 10] = [
    RED,
    BLUE,
    GREEN,
    MAGENTA,
    CYAN,
    BLACK,
    RGBColor(255, 165, 0),  // Orange
    RGBColor(128, 0, 128),  // Purple
    RGBColor(255, 192, 203), // Pink
    RGBColor(165, 42, 42),  // Brown
];

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use trapmem_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::trap_memory("Slow emission");
/// config.width = 1920;
/// config.line_color = BLACK;
///
/// assert_eq!(config.xlabel, "Time (s)");
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title
    pub title: String,

    /// X-axis label
    pub xlabel: String,

    /// Left Y-axis label
    pub ylabel: String,

    /// Right Y-axis label (dual-axis plots only)
    pub secondary_ylabel: String,

    /// Primary line color (default: BLUE)
    pub line_color: RGBColor,

    /// Secondary line color (right axis, second branch; default: RED)
    pub secondary_color: RGBColor,

    /// Optional colors for curve families, one per curve
    ///
    /// Falls back to the built-in palette when `None` or too short.
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            secondary_ylabel: String::new(),
            line_color: BLUE,
            secondary_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Occupancy and log10 n against time
    ///
    /// ```rust
    /// use trapmem_rs::output::visualization::{PlotConfig, NO_TITLE};
    ///
    /// let config = PlotConfig::trap_memory(NO_TITLE);
    /// assert_eq!(config.title, "Trap Memory");
    /// ```
    pub fn trap_memory(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title().unwrap_or_else(|| "Trap Memory".to_string()),
            xlabel: "Time (s)".to_string(),
            ylabel: "Trap occupancy f".to_string(),
            secondary_ylabel: "log10 n (cm⁻³)".to_string(),
            ..Self::default()
        }
    }

    /// Recombination proxy against log10 n
    pub fn hysteresis(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title().unwrap_or_else(|| "Recombination Hysteresis".to_string()),
            xlabel: "log10 n (cm⁻³)".to_string(),
            ylabel: "Recombination proxy R (a.u.)".to_string(),
            ..Self::default()
        }
    }

    /// Family of curves sharing one abscissa
    pub fn curves(title: impl IntoOptionalTitle, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title.into_optional_title().unwrap_or_else(|| "Curves".to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }

    /// Color of curve `index` in a family
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(color) = self.series_colors.as_ref().and_then(|colors| colors.get(index)) {
            return *color;
        }
        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.show_grid);
    }

    #[test]
    fn test_trap_memory_config() {
        let config = PlotConfig::trap_memory("Reference run");
        assert_eq!(config.title, "Reference run");
        assert_eq!(config.xlabel, "Time (s)");
        assert!(!config.secondary_ylabel.is_empty());
    }

    #[test]
    fn test_hysteresis_config_default_title() {
        let config = PlotConfig::hysteresis(NO_TITLE);
        assert_eq!(config.title, "Recombination Hysteresis");
        assert_eq!(config.xlabel, "log10 n (cm⁻³)");
    }

    #[test]
    fn test_curves_config_with_string() {
        let config = PlotConfig::curves(format!("J-V at {} suns", 1), "Voltage (V)", "J (mA/cm²)");
        assert_eq!(config.title, "J-V at 1 suns");
        assert_eq!(config.ylabel, "J (mA/cm²)");
    }

    #[test]
    fn test_series_colors() {
        let mut config = PlotConfig::default();
        assert_eq!(config.series_color(0), RED);
        assert_eq!(config.series_color(10), RED);

        config.series_colors = Some(vec![BLACK]);
        assert_eq!(config.series_color(0), BLACK);
        assert_eq!(config.series_color(1), BLUE);
    }
}
