//! Families of curves sharing one abscissa
//!
//! Used for the device sweeps: J–V curves at several intensities, SRH depth
//! profiles, upconversion gain.

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use super::traces::extension;
use super::value_range;

/// Plot one line per `(label, values)` pair against `x`
///
/// # Arguments
///
/// * `x`           — Shared abscissa
/// * `curves`      — Legend label and ordinates of each curve, same length as `x`
/// * `output_path` — Output file path (`.svg` → vector, anything else → PNG)
/// * `config`      — Optional plot configuration; colours come from
///                   `config.series_colors` then the default palette
///
/// # Errors
///
/// Returns `Err` if `x` or `curves` is empty, a curve length differs from
/// `x.len()`, or the backend fails.
///
/// # Example
///
/// ```rust,no_run
/// use trapmem_rs::models::JvCurve;
/// use trapmem_rs::output::visualization::{plot_curve_family, PlotConfig};
///
/// let curve = JvCurve::reference();
/// let family: Vec<(String, Vec<f64>)> = curve
///     .family(&[200.0, 600.0, 1000.0])?
///     .into_iter()
///     .map(|(intensity, j)| (format!("{} W/m²", intensity), j))
///     .collect();
///
/// let config = PlotConfig::curves("J-V", "Voltage (V)", "J (mA/cm²)");
/// plot_curve_family(curve.voltage(), &family, "jv.png", Some(&config))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plot_curve_family<S, V>(
    x: &[f64],
    curves: &[(S, V)],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>>
where
    S: AsRef<str>,
    V: AsRef<[f64]>,
{
    if x.is_empty() || curves.is_empty() {
        return Err("curve family needs a non-empty abscissa and at least one curve".into());
    }
    if let Some((label, values)) = curves.iter().find(|(_, v)| v.as_ref().len() != x.len()) {
        return Err(format!(
            "curve '{}' has {} points, abscissa has {}",
            label.as_ref(),
            values.as_ref().len(),
            x.len()
        )
        .into());
    }

    let default_config = PlotConfig::curves(NO_TITLE, "x", "y");
    let config = config.unwrap_or(&default_config);

    match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_curve_family_impl(backend, x, curves, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_curve_family_impl(backend, x, curves, config)
        }
    }
}

fn plot_curve_family_impl<DB, S, V>(
    backend: DB,
    x: &[f64],
    curves: &[(S, V)],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    S: AsRef<str>,
    V: AsRef<[f64]>,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (x_min, x_max) = value_range(x.iter().copied(), 0.0);
    let (y_min, y_max) = value_range(curves.iter().flat_map(|(_, v)| v.as_ref().iter().copied()), 0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let x_format = |v: &f64| format!("{}", v);
    let y_format = |v: &f64| {
        if v.abs() >= 1e4 || (v.abs() < 1e-2 && *v != 0.0) {
            format!("{:.1e}", v)
        } else {
            format!("{:.2}", v)
        }
    };
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&x_format)
        .y_label_formatter(&y_format);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for (index, (label, values)) in curves.iter().enumerate() {
        let color = config.series_color(index);
        chart
            .draw_series(LineSeries::new(
                x.iter().copied().zip(values.as_ref().iter().copied()),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label.as_ref())
            .legend(move |(px, py)| PathElement::new(vec![(px, py), (px + 20, py)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_curve_family_png() {
        let x = vec![0.0, 0.5, 1.0];
        let curves = vec![("a", vec![0.0, 1.0, 2.0]), ("b", vec![2.0, 1.0, 0.0])];
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");

        plot_curve_family(&x, &curves, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_curve_family_svg_with_owned_labels() {
        let x = vec![0.0, 1.0];
        let curves: Vec<(String, Vec<f64>)> = (1..=3).map(|k| (format!("{} suns", k), vec![0.0, k as f64])).collect();
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");

        plot_curve_family(&x, &curves, path.to_str().unwrap(), None).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("3 suns"));
    }

    #[test]
    fn test_plot_curve_family_rejects_bad_input() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        let path = path.to_str().unwrap();

        let empty: Vec<(&str, Vec<f64>)> = Vec::new();
        assert!(plot_curve_family(&[0.0, 1.0], &empty, path, None).is_err());

        let short = vec![("short", vec![1.0])];
        assert!(plot_curve_family(&[0.0, 1.0], &short, path, None).is_err());
    }
}
