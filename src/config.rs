//! Report writer configuration.
//!
//! Resolution order is defaults, then an optional JSON config file, then
//! environment overrides. CLI flags are applied last by the binary.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Report file used when nothing else is configured, relative to the cwd.
pub const DEFAULT_REPORT_PATH: &str = "ATOMLout.txt";

/// Overrides `report_path`.
pub const REPORT_PATH_ENV: &str = "ATOML_REPORT_PATH";
/// Overrides `strict_stages`; accepts `1`/`true`/`yes`/`on` and their negations.
pub const STRICT_STAGES_ENV: &str = "ATOML_REPORT_STRICT";

/// Where reports go and how unknown stage ids are treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Append-only report file shared by all stages.
    pub report_path: PathBuf,
    /// Reject unknown stage ids instead of skipping them.
    pub strict_stages: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            strict_stages: false,
        }
    }
}

impl ReportConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay `ATOML_REPORT_PATH` / `ATOML_REPORT_STRICT` when set.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = env::var(REPORT_PATH_ENV) {
            self.report_path = PathBuf::from(path);
        }
        if let Ok(flag) = env::var(STRICT_STAGES_ENV) {
            self.strict_stages = parse_flag(&flag)
                .with_context(|| format!("parse {STRICT_STAGES_ENV}"))?;
        }
        Ok(())
    }
}

/// Load a config from a JSON file; omitted keys keep their defaults.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ReportConfig =
        serde_json::from_slice(&bytes).context("parse report config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject configs that cannot name a report file.
pub fn validate_config(config: &ReportConfig) -> Result<()> {
    if config.report_path.as_os_str().is_empty() {
        return Err(anyhow!("report_path must be non-empty"));
    }
    Ok(())
}

fn parse_flag(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("expected a boolean flag (got {other:?})")),
    }
}
