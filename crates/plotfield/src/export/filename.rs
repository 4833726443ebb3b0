//! Export filename convention.
//!
//! All exports share the pattern
//! `<algorithm>[-<mode>][-<seed>][-i<iteration>]-<timestamp>.<ext>` with a
//! millisecond Unix timestamp, so back-to-back exports get distinct names.
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in milliseconds.
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Builder for export filenames.
#[derive(Clone, Debug)]
pub struct ExportFilename {
    algorithm: String,
    extension: String,
    mode: Option<String>,
    seed: Option<u64>,
    iteration: Option<u32>,
}

impl ExportFilename {
    pub fn new(algorithm: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            extension: extension.into(),
            mode: None,
            seed: None,
            iteration: None,
        }
    }

    /// Sets the export mode segment.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets the seed segment.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the iteration segment.
    pub fn with_iteration(mut self, iteration: u32) -> Self {
        self.iteration = Some(iteration);
        self
    }

    /// Builds the filename with the current timestamp.
    pub fn build(&self) -> String {
        self.build_at(unix_millis())
    }

    /// Builds the filename with an explicit timestamp.
    pub fn build_at(&self, timestamp_ms: u128) -> String {
        let mut name = self.algorithm.clone();
        if let Some(mode) = &self.mode {
            name.push('-');
            name.push_str(mode);
        }
        if let Some(seed) = self.seed {
            name.push_str(&format!("-{seed}"));
        }
        if let Some(iteration) = self.iteration {
            name.push_str(&format!("-i{iteration}"));
        }
        name.push_str(&format!("-{timestamp_ms}.{}", self.extension));
        name
    }
}
