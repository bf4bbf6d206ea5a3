//! Best-genome weight files.
//!
//! One file per generation at `<directory>/<prefix><generation>.txt`,
//! holding a single line of comma-separated decimal values in canonical
//! network layout order.

use crate::error::{IoError, Result};
use evodrive_core::config::StorageConfig;
use evodrive_core::GenomeArchive;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WeightStore {
    directory: PathBuf,
    prefix: String,
}

impl WeightStore {
    /// Opens (creating if needed) a store rooted at `directory`.
    pub fn new<P: AsRef<Path>>(directory: P, prefix: &str) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| {
            IoError::from(e).with_context(format!("creating {}", directory.display()))
        })?;
        Ok(Self {
            directory,
            prefix: prefix.to_string(),
        })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Self::new(&config.directory, &config.file_prefix)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn path_for(&self, generation: u64) -> PathBuf {
        self.directory
            .join(format!("{}{}.txt", self.prefix, generation))
    }

    /// Writes `weights` as the best genome of `generation`, replacing any
    /// previous file for that generation.
    pub fn save(&self, generation: u64, weights: &[f32]) -> Result<PathBuf> {
        let path = self.path_for(generation);
        let line = weights
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "{}", line)?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), values = weights.len(), "Saved weights");
        Ok(path)
    }

    /// Reads the weights stored for `generation`.
    ///
    /// A missing or empty file is reported and yields `Ok(None)`.
    pub fn load(&self, generation: u64) -> Result<Option<Vec<f32>>> {
        let path = self.path_for(generation);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Weight file does not exist");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut line = String::new();
        BufReader::new(file).read_line(&mut line)?;
        let line = line.trim();
        if line.is_empty() {
            tracing::warn!(path = %path.display(), "Weight file is empty");
            return Ok(None);
        }

        let weights = parse_line(line)
            .map_err(|e| e.with_context(format!("reading {}", path.display())))?;
        tracing::debug!(path = %path.display(), values = weights.len(), "Loaded weights");
        Ok(Some(weights))
    }

    /// Highest generation number with a stored file, if any.
    pub fn latest_generation(&self) -> Result<Option<u64>> {
        let mut latest = None;
        for entry in fs::read_dir(&self.directory)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let generation = name
                .strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_suffix(".txt"))
                .and_then(|digits| digits.parse::<u64>().ok());
            if let Some(g) = generation {
                latest = Some(latest.map_or(g, |l: u64| l.max(g)));
            }
        }
        Ok(latest)
    }
}

fn parse_line(line: &str) -> Result<Vec<f32>> {
    line.split(',')
        .enumerate()
        .map(|(i, field)| {
            field
                .trim()
                .parse::<f32>()
                .map_err(|e| IoError::parse(format!("value {i} ({field:?}): {e}")))
        })
        .collect()
}

impl GenomeArchive for WeightStore {
    fn archive_best(&mut self, generation: u64, parameters: &[f32]) -> evodrive_core::Result<()> {
        let path = self.save(generation, parameters)?;
        tracing::info!(generation, path = %path.display(), "Archived best genome");
        Ok(())
    }
}
