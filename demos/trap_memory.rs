//! Demo: trap memory under an up/down carrier-density sweep
//!
//! Runs the reference experiment with forward Euler and RK4, compares the
//! hysteresis of the recombination proxy, then shows what happens when the
//! time grid is too coarse for the capture rate.
//!
//! **Parameters** (reference experiment):
//! - 4000 samples over 20 s
//! - n swept log-uniformly 1e14 → 1e17 → 1e14 cm⁻³
//! - kc = 5e-18 cm³/s, ke = 0.4 s⁻¹, f0 = 0.05
//! - R = 1e-20 · n · f

use trapmem_rs::{
    experiment::{Integrator, TrapMemoryConfig, TrapMemoryExperiment, TrapMemoryRun},
    output::{
        export::{export_trap_memory_csv, CsvConfig, CsvMetadata},
        plot_hysteresis_loop, plot_trap_memory, PlotConfig,
    },
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    println!("═══════════════════════════════════════════════════════");
    println!("  Trap Memory - Up/Down Density Sweep");
    println!("═══════════════════════════════════════════════════════\n");

    let reference = TrapMemoryConfig::default();

    println!("Parameters:");
    println!("  t_end          : {} s", reference.t_end);
    println!("  samples        : {}", reference.samples);
    println!("  log10 n        : {} → {} → {}", reference.logn_low, reference.logn_high, reference.logn_low);
    println!("  kc             : {:e} cm³/s", reference.capture_coefficient);
    println!("  ke             : {} 1/s", reference.emission_rate);
    println!("  f0             : {}", reference.initial_occupancy);
    println!("  A              : {:e}\n", reference.recombination_scale);

    let out_dir = std::env::temp_dir();

    // =============================================================================================
    // Euler vs RK4
    // =============================================================================================

    println!("═══════════════════════════════════════════════════════");
    println!("  Running: Forward Euler and Runge-Kutta 4");
    println!("═══════════════════════════════════════════════════════\n");

    let mut runs: Vec<(TrapMemoryConfig, TrapMemoryRun, f64)> = Vec::new();

    for integrator in [Integrator::ForwardEuler, Integrator::RungeKutta4] {
        let config = reference.clone().with_integrator(integrator);

        let start = Instant::now();
        let run = TrapMemoryExperiment::run(&config)?;
        let elapsed = start.elapsed().as_secs_f64() * 1e3;

        println!("  {:<14} ✓ {:.2} ms", integrator.to_string(), elapsed);
        runs.push((config, run, elapsed));
    }

    println!("\n{:<14} {:>10} {:>12} {:>12} {:>12}", "Solver", "f(t_end)", "R gap @16", "Peak gap", "Loop area");
    println!("{:-<64}", "");

    for (_, run, _) in &runs {
        let hysteresis = run.hysteresis()?;
        println!(
            "{:<14} {:>10.5} {:>12.3e} {:>12.3e} {:>12.3e}",
            run.solver_name,
            run.final_occupancy().unwrap_or(f64::NAN),
            hysteresis.gap_at(16.0).unwrap_or(f64::NAN),
            hysteresis.peak_gap(),
            hysteresis.area(),
        );
    }

    let (euler, rk4) = (&runs[0].1, &runs[1].1);
    let max_diff = euler
        .occupancy
        .iter()
        .zip(&rk4.occupancy)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("\n  max |f_Euler − f_RK4| = {:.3e}", max_diff);
    println!("  step factor λ_max    = {:.4} ({:?})", euler.stability.max_step_factor, euler.stability.regime());

    // =============================================================================================
    // Output
    // =============================================================================================

    let (config, run, _) = &runs[0];

    let trace_path = out_dir.join("trap_memory.png");
    let loop_path = out_dir.join("trap_memory_hysteresis.png");
    let csv_path = out_dir.join("trap_memory.csv");

    plot_trap_memory(run, &trace_path.to_string_lossy(), None)?;
    plot_hysteresis_loop(run, &loop_path.to_string_lossy(), Some(&PlotConfig::hysteresis("R = A·n·f")))?;

    let csv = CsvConfig::default().with_metadata(CsvMetadata::from_trap_memory(config, run));
    export_trap_memory_csv(run, &csv_path.to_string_lossy(), Some(&csv))?;

    println!("\nFiles:");
    println!("  {}", trace_path.display());
    println!("  {}", loop_path.display());
    println!("  {}", csv_path.display());

    // =============================================================================================
    // Coarse grid
    // =============================================================================================

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Coarse Grid: 40 samples, kc = 5e-17 cm³/s");
    println!("═══════════════════════════════════════════════════════\n");

    let coarse = TrapMemoryConfig::default().with_samples(40).with_rates(5e-17, 0.4);
    let run = TrapMemoryExperiment::run(&coarse)?;

    println!("  λ_max            : {:.3} at step {:?}", run.stability.max_step_factor, run.stability.worst_step);
    println!("  regime           : {:?}", run.stability.regime());
    println!("  oscillatory steps: {}", run.stability.oscillatory_steps);
    println!("  divergent steps  : {}", run.stability.divergent_steps);
    println!("  clamped steps    : {}", run.diagnostics.clamped_steps);
    println!("  max |Δf| per step: {:.3}", run.diagnostics.max_increment);

    let coarse_path = out_dir.join("trap_memory_coarse.svg");
    plot_trap_memory(&run, &coarse_path.to_string_lossy(), Some(&PlotConfig::trap_memory("Coarse grid")))?;
    println!("\n  {}", coarse_path.display());

    Ok(())
}
