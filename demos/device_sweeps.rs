//! Demo: closed-form device sweeps
//!
//! - J–V curve scaled from 200 to 1000 W/m²
//! - SRH recombination depth profile at the same intensities
//! - Upconversion gain against the intermediate population

use trapmem_rs::{
    models::{JvCurve, SrhProfile, UpconversionGain},
    output::{export_series_csv, plot_curve_family, PlotConfig},
};

const INTENSITIES: [f64; 5] = [200.0, 400.0, 600.0, 800.0, 1000.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {

    println!("═══════════════════════════════════════════════════════");
    println!("  Device Sweeps");
    println!("═══════════════════════════════════════════════════════\n");

    let out_dir = std::env::temp_dir();

    // ====== J–V versus intensity ======

    let jv = JvCurve::reference();
    let family: Vec<(String, Vec<f64>)> = jv
        .family(&INTENSITIES)?
        .into_iter()
        .map(|(intensity, j)| (format!("{} W/m²", intensity), j))
        .collect();

    println!("J–V (reference at {} W/m²):", jv.reference_intensity());
    for (label, j) in &family {
        println!("  {:<10} Jsc = {:>7.3} mA/cm²", label, j[0]);
    }

    let jv_path = out_dir.join("jv_intensity.png");
    plot_curve_family(
        jv.voltage(),
        &family,
        &jv_path.to_string_lossy(),
        Some(&PlotConfig::curves("J-V versus intensity", "Voltage (V)", "J (mA/cm²)")),
    )?;

    // ====== SRH depth profile ======

    let srh = SrhProfile::default();
    let (depth, profiles) = srh.intensity_family(650.0, 300, &INTENSITIES)?;

    println!("\nSRH profile:");
    println!("  peak at {} nm, width {} nm", srh.center, srh.width);
    println!("  R(peak, 1000 W/m²) = {:.3e} m⁻³·s⁻¹", srh.rate_at(srh.center));

    let labelled: Vec<(String, Vec<f64>)> = profiles
        .into_iter()
        .map(|(intensity, rate)| (format!("{} W/m²", intensity), rate))
        .collect();

    let srh_path = out_dir.join("srh_profile.png");
    plot_curve_family(
        &depth,
        &labelled,
        &srh_path.to_string_lossy(),
        Some(&PlotConfig::curves("SRH recombination", "Depth (nm)", "R (m⁻³·s⁻¹)")),
    )?;

    let columns: Vec<(&str, &[f64])> = labelled.iter().map(|(label, rate)| (label.as_str(), rate.as_slice())).collect();
    let srh_csv = out_dir.join("srh_profile.csv");
    export_series_csv("depth_nm", &depth, &columns, &srh_csv.to_string_lossy(), None)?;

    // ====== Upconversion gain ======

    let upconversion = UpconversionGain::default();
    let (x1, gain) = upconversion.sweep(10.0, 500)?;

    println!("\nUpconversion:");
    println!("  1 + knr·τ2 = {}", upconversion.loss_factor());
    println!("  G(10)      = {:.3}", gain.last().copied().unwrap_or(0.0));

    let gain_path = out_dir.join("upconversion_gain.svg");
    plot_curve_family(
        &x1,
        &[("G(X1)", gain.as_slice())],
        &gain_path.to_string_lossy(),
        Some(&PlotConfig::curves("Upconversion gain", "X1 (a.u.)", "G (a.u.)")),
    )?;

    println!("\nFiles:");
    for path in [&jv_path, &srh_path, &srh_csv, &gain_path] {
        println!("  {}", path.display());
    }

    Ok(())
}
