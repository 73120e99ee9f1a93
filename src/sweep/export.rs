//! Export sweep results to CSV for spreadsheet analysis
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::config::SweepConfig;
use super::runner::TrialResult;
use crate::error::TrapError;
use crate::units::SECONDS_TO_MICROS;

pub const SUMMARY_HEADER: &str = "Value,Unit,Outcome,Last_Time_s,Last_Time_us,Samples";

pub fn write_summary<W: Write>(
    mut out: W,
    config: &SweepConfig,
    results: &[TrialResult],
) -> std::io::Result<()> {
    writeln!(out, "# Study: {}", config.study_name)?;
    writeln!(out, "# Particle: {}", config.particle.label())?;
    writeln!(out, "# Duration_s: {:e}", config.duration)?;
    writeln!(out, "# Step_s: {:e}", config.step)?;
    writeln!(out, "{}", SUMMARY_HEADER)?;
    let unit = config.parameter.unit();
    for r in results {
        let t = r.outcome.last_time();
        writeln!(
            out,
            "{},{},{},{:e},{},{}",
            r.value,
            unit,
            r.outcome.label(),
            t,
            t * SECONDS_TO_MICROS,
            r.samples_recorded
        )?;
    }
    Ok(())
}

/// Write the per-trial summary, creating the parent directory if needed.
pub fn export_summary_csv<P: AsRef<Path>>(
    path: P,
    config: &SweepConfig,
    results: &[TrialResult],
) -> Result<(), TrapError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = BufWriter::new(File::create(path)?);
    write_summary(&mut file, config, results)?;
    file.flush()?;
    println!("✓ Exported sweep summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::RunOutcome;

    #[test]
    fn summary_has_one_row_per_trial() {
        let cfg = SweepConfig::default();
        let results = [
            TrialResult { value: 1.0, outcome: RunOutcome::Lost { time: 1.5e-6 }, samples_recorded: 3 },
            TrialResult { value: 2.0, outcome: RunOutcome::Confined { last_time: 1e-2 }, samples_recorded: 10 },
        ];
        let mut buf = Vec::new();
        write_summary(&mut buf, &cfg, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let rows: Vec<_> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows[0], SUMMARY_HEADER);
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("1,V,lost,1.5e-6,"));
        assert!(rows[2].starts_with("2,V,confined,1e-2,"));
        assert!(rows[2].ends_with(",10"));
    }
}
