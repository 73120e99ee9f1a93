//! Command-line front end: argument dispatch for sweeps and single-trial exports.

use std::error::Error;

use crate::io::{save_trajectory, TrajectoryFormat};
use crate::simulation::RecordPolicy;
use crate::sweep::{export_summary_csv, SweepConfig, SweepRunner};

pub const MIN_THREADS: usize = 1;
pub const THREADS_LEAVE_FREE: usize = 1;

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Global pool with threads = max(1, cores - 1)
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(THREADS_LEAVE_FREE)
        .max(MIN_THREADS);
    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        log::warn!("could not configure rayon pool: {}", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "generate" => generate_config(&args[2..]),
        "list" => list_trials(&args[2..]),
        "sweep" => run_sweep(&args[2..]),
        "trajectory" => export_trajectory(&args[2..]),
        other => {
            println!("Unknown command: {}", other);
            print_usage();
            return;
        }
    };

    if let Err(e) = result {
        println!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("\n╔══════════════════════════════════════════════════════════╗");
    println!("║  Ion Trap Simulator - planar RF trap confinement sweeps  ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");
    println!("Usage: ion_trap_sim <command> [options]\n");
    println!("Commands:");
    println!("  generate    <config.toml>                    Write the default sweep configuration");
    println!("  list        <config.toml>                    List the swept values");
    println!("  sweep       <config.toml> [summary.csv]      Run every trial and report confinement");
    println!("  trajectory  <config.toml> <value> <out>      Run one trial and export its full trajectory\n");
    println!("Trajectory output format follows the extension: .txt/.dat (space separated), .csv, .json, .bin;");
    println!("append .gz to compress. Set RUST_LOG=info for progress logging.\n");
}

fn generate_config(args: &[String]) -> Result<(), Box<dyn Error>> {
    let output_file = args
        .first()
        .ok_or("please specify output file name: generate <config.toml>")?;
    let config = SweepConfig::default();
    config.to_file(output_file)?;
    println!("✅ Sweep configuration generated: {}", output_file);
    println!("📊 Total trials: {}", config.values()?.len());
    Ok(())
}

fn list_trials(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config_file = args
        .first()
        .ok_or("please specify sweep configuration file: list <config.toml>")?;
    let runner = SweepRunner::new(SweepConfig::from_file(config_file)?)?;
    runner.list_trials()?;
    Ok(())
}

fn run_sweep(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config_file = args
        .first()
        .ok_or("please specify sweep configuration file: sweep <config.toml> [summary.csv]")?;
    let runner = SweepRunner::new(SweepConfig::from_file(config_file)?)?;
    let results = runner.run_all()?;
    runner.report(&results);
    if let Some(summary) = args.get(1) {
        export_summary_csv(summary, runner.config(), &results)?;
    }
    Ok(())
}

fn export_trajectory(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.len() < 3 {
        return Err("usage: trajectory <config.toml> <value> <out>".into());
    }
    let value: f64 = args[1]
        .parse()
        .map_err(|e| format!("invalid swept value '{}': {}", args[1], e))?;
    let out = &args[2];

    let runner = SweepRunner::new(SweepConfig::from_file(&args[0])?)?;
    let (result, trap) = runner.run_trial(value, RecordPolicy::EveryStep)?;
    println!("{}", result.report_line(runner.config().parameter.unit()));
    save_trajectory(out, trap.trajectory(), TrajectoryFormat::from_path(out))?;
    println!("✓ Wrote {} samples to {}", trap.trajectory().len(), out);
    Ok(())
}
