use crate::error::Result;
use evodrive_core::GenomeArchive;
use evodrive_data::GenerationSummary;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Appends one JSON line per completed generation.
pub struct GenerationLogger {
    file: BufWriter<File>,
}

impl GenerationLogger {
    pub fn new_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    pub fn log_summary(&mut self, summary: &GenerationSummary) -> Result<()> {
        let json = serde_json::to_string(summary)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()?;
        Ok(())
    }
}

impl GenomeArchive for GenerationLogger {
    fn record_summary(&mut self, summary: &GenerationSummary) -> evodrive_core::Result<()> {
        self.log_summary(summary)?;
        Ok(())
    }
}

/// Reads back every summary in a history file, skipping malformed lines.
///
/// A missing file reads as an empty history.
pub fn read_history<P: AsRef<Path>>(path: P) -> Result<Vec<GenerationSummary>> {
    let file = match File::open(path.as_ref()) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };
    let mut summaries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        match serde_json::from_str::<GenerationSummary>(&line) {
            Ok(summary) => summaries.push(summary),
            Err(e) => tracing::debug!(error = %e, "Skipping malformed history line"),
        }
    }
    Ok(summaries)
}
