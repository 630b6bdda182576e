//! Configuration file support.
//!
//! Config lives in `calltrace.toml` in the working directory (or wherever
//! `--config` points). Every section has defaults, so a missing file is not
//! an error unless an explicit path was given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "calltrace.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Trace emission settings.
    pub trace: TraceConfig,
    /// Demo flow settings.
    pub demo: DemoConfig,
}

/// Trace emission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Sink kind: "log" (rendered lines via the subscriber) or "jsonl".
    pub sink: String,
    /// Output path when the jsonl sink is selected.
    pub path: PathBuf,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            sink: "log".to_string(),
            path: PathBuf::from("traces.jsonl"),
        }
    }
}

impl TraceConfig {
    /// The JSONL output path, when that sink is selected.
    pub fn jsonl_path(&self) -> Option<PathBuf> {
        (self.sink == "jsonl").then(|| self.path.clone())
    }
}

/// Demo flow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated save duration in milliseconds.
    pub save_delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { save_delay_ms: 1000 }
    }
}

impl Config {
    /// Load config from `path`, or from [`CONFIG_FILE`] in the working
    /// directory. Falls back to defaults when no file exists; an explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(CONFIG_FILE),
        };

        if !candidate.exists() {
            if path.is_some() {
                anyhow::bail!("config file not found: {}", candidate.display());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&candidate)
            .with_context(|| format!("failed to read {}", candidate.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", candidate.display()))
    }
}
