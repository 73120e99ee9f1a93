use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use crate::error::TrapError;
use crate::simulation::TrajectorySample;

/// On-disk layout of an exported trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrajectoryFormat {
    /// Space separated `time x y vx vy ax ay`, scientific notation, no header
    Text,
    /// Same columns as `Text` with a header row
    Csv,
    Json,
    /// bincode
    Binary,
}

impl TrajectoryFormat {
    /// Pick a format from the file name, ignoring a trailing `.gz`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".csv") {
            TrajectoryFormat::Csv
        } else if name.ends_with(".json") {
            TrajectoryFormat::Json
        } else if name.ends_with(".bin") {
            TrajectoryFormat::Binary
        } else {
            TrajectoryFormat::Text
        }
    }
}

pub const CSV_HEADER: &str = "time,x,y,vx,vy,ax,ay";

/// Write one sample per row, seven-digit mantissas.
pub fn write_rows<W: Write>(mut out: W, samples: &[TrajectorySample], sep: char) -> std::io::Result<()> {
    for s in samples {
        writeln!(
            out,
            "{:.6e}{sep}{:.6e}{sep}{:.6e}{sep}{:.6e}{sep}{:.6e}{sep}{:.6e}{sep}{:.6e}",
            s.time,
            s.position.x,
            s.position.y,
            s.velocity.x,
            s.velocity.y,
            s.acceleration.x,
            s.acceleration.y,
            sep = sep
        )?;
    }
    Ok(())
}

fn write_encoded<W: Write>(
    mut writer: W,
    samples: &[TrajectorySample],
    format: TrajectoryFormat,
) -> Result<(), TrapError> {
    match format {
        TrajectoryFormat::Text => write_rows(&mut writer, samples, ' ')?,
        TrajectoryFormat::Csv => {
            writeln!(writer, "{}", CSV_HEADER)?;
            write_rows(&mut writer, samples, ',')?;
        }
        TrajectoryFormat::Json => serde_json::to_writer(&mut writer, samples)?,
        TrajectoryFormat::Binary => bincode::serialize_into(&mut writer, samples)?,
    }
    writer.flush()?;
    Ok(())
}

/// Export a trajectory. A `.gz` suffix compresses the output.
pub fn save_trajectory<P: AsRef<Path>>(
    path: P,
    samples: &[TrajectorySample],
    format: TrajectoryFormat,
) -> Result<(), TrapError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let gzip = path.extension().map_or(false, |e| e == "gz");

    // Write to a temporary file first so an interrupted export never truncates an old one
    let tmp_path = path.with_extension({
        let mut os = path.extension().map(|e| e.to_os_string()).unwrap_or_default();
        os.push(".tmp");
        os
    });
    let result = write_file(&tmp_path, samples, format, gzip)
        .and_then(|()| std::fs::rename(&tmp_path, path).map_err(TrapError::from));
    if let Err(e) = result {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            log::debug!("could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(e);
    }
    log::info!("exported {} samples to {}", samples.len(), path.display());
    Ok(())
}

fn write_file(
    path: &Path,
    samples: &[TrajectorySample],
    format: TrajectoryFormat,
    gzip: bool,
) -> Result<(), TrapError> {
    let writer = BufWriter::new(std::fs::File::create(path)?);
    if gzip {
        let mut encoder = GzEncoder::new(writer, Compression::fast());
        write_encoded(&mut encoder, samples, format)?;
        encoder.finish()?.flush()?;
    } else {
        write_encoded(writer, samples, format)?;
    }
    Ok(())
}

/// Read back a trajectory written as JSON or bincode, gzip detected by magic bytes.
pub fn load_trajectory<P: AsRef<Path>>(path: P) -> Result<Vec<TrajectorySample>, TrapError> {
    let data = std::fs::read(path.as_ref())?;
    match maybe_decompress_gzip(&data)? {
        Some(decoded) => parse_trajectory_bytes(&decoded),
        None => parse_trajectory_bytes(&data),
    }
}

fn parse_trajectory_bytes(bytes: &[u8]) -> Result<Vec<TrajectorySample>, TrapError> {
    if let Ok(samples) = serde_json::from_slice::<Vec<TrajectorySample>>(bytes) {
        return Ok(samples);
    }
    bincode::deserialize::<Vec<TrajectorySample>>(bytes).map_err(|_| {
        TrapError::Export("failed to parse trajectory: not valid JSON or binary format".to_string())
    })
}

fn maybe_decompress_gzip(data: &[u8]) -> std::io::Result<Option<Vec<u8>>> {
    if data.len() < 2 || data[0] != 0x1f || data[1] != 0x8b {
        return Ok(None);
    }
    let mut decoder = GzDecoder::new(Cursor::new(data));
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(Some(decoded))
}
