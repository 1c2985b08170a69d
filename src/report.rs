//! Append-only report writer for pipeline stages.
//!
//! Each call renders one section entirely in memory, then opens the shared
//! report file in append mode, writes the section with a single
//! `write_all`, and closes the handle. Record problems are detected before
//! the file is touched, so a failed call never leaves half a section behind.
//!
//! Section layout:
//!
//! ```text
//! Output from atoml.<stage>. Run on <stamp>
//! <body lines>
//!
//! End of <stage> function.
//! ␠
//! ```
mod data_setup;
mod fingerprint;
mod predict;

pub use data_setup::{pad_splits, DataSetupStage};
pub use fingerprint::FingerprintStage;
pub use predict::PredictStage;

use crate::config::ReportConfig;
use crate::record::{Record, RecordError};
use crate::stamp::RunStamp;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Entry-point family a stage id is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageFamily {
    /// `write_data_setup` stages.
    DataSetup,
    /// `write_fingerprint_setup` stages.
    Fingerprint,
    /// `write_predict` stages.
    Predict,
}

impl StageFamily {
    /// Return the stable family name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageFamily::DataSetup => "data_setup",
            StageFamily::Fingerprint => "fingerprint_setup",
            StageFamily::Predict => "predict",
        }
    }
}

impl std::fmt::Display for StageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a report call did to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A section was appended.
    Written {
        /// Stage id the section was rendered for.
        stage: &'static str,
        /// Bytes appended, header and footer included.
        bytes: usize,
    },
    /// The stage id is not part of the family; nothing was appended.
    Skipped {
        /// The unrecognized id.
        stage: String,
    },
}

impl WriteOutcome {
    /// True when a section reached the report file.
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }
}

/// Raised for unknown stage ids when strict stage checking is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage {
    /// Entry point the id was passed to.
    pub family: StageFamily,
    /// The id as given by the caller.
    pub stage: String,
}

impl std::fmt::Display for UnknownStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} stage {:?}", self.family, self.stage)
    }
}

impl std::error::Error for UnknownStage {}

/// A family's closed stage vocabulary and its body templates.
pub(crate) trait StageTemplate: Sized + Copy {
    const FAMILY: StageFamily;

    fn parse(id: &str) -> Option<Self>;

    fn name(self) -> &'static str;

    /// Render the section body. Every line, including the last, ends in `\n`.
    fn render_body(self, record: &Record) -> Result<String, RecordError>;
}

/// Render a complete section: header, body, footer.
pub fn render_section(stage: &str, stamp: &RunStamp, body: &str) -> String {
    format!("Output from atoml.{stage}. Run on {stamp}\n{body}\nEnd of {stage} function.\n \n")
}

/// Join body lines, terminating each with a newline.
pub(crate) fn body_from_lines(lines: Vec<String>) -> String {
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// Writes stage sections to one report file under one run stamp.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
    stamp: RunStamp,
    strict_stages: bool,
}

impl ReportWriter {
    /// Build a writer stamped with the current local time.
    pub fn new(config: &ReportConfig) -> Self {
        Self::with_stamp(config, RunStamp::now())
    }

    /// Build a writer with an explicit run stamp (replays, fixtures).
    pub fn with_stamp(config: &ReportConfig, stamp: RunStamp) -> Self {
        Self {
            path: config.report_path.clone(),
            stamp,
            strict_stages: config.strict_stages,
        }
    }

    /// Return the report file this writer appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the stamp shared by every section of this run.
    pub fn stamp(&self) -> &RunStamp {
        &self.stamp
    }

    /// Report a data setup stage (`get_unique`, `get_train`, `data_split`,
    /// `remove_outliers`, `target_standardize`).
    pub fn write_data_setup(&self, stage: &str, record: &Record) -> Result<WriteOutcome> {
        self.write_stage::<DataSetupStage>(stage, record)
    }

    /// Report a fingerprint stage (`return_fpv`, `standardize`, `normalize`,
    /// `sure_independence_screening`, `iterative_sis`).
    pub fn write_fingerprint_setup(&self, stage: &str, record: &Record) -> Result<WriteOutcome> {
        self.write_stage::<FingerprintStage>(stage, record)
    }

    /// Report a prediction stage (`get_predictions`).
    pub fn write_predict(&self, stage: &str, record: &Record) -> Result<WriteOutcome> {
        self.write_stage::<PredictStage>(stage, record)
    }

    fn write_stage<S: StageTemplate>(&self, stage: &str, record: &Record) -> Result<WriteOutcome> {
        let Some(template) = S::parse(stage) else {
            return self.skip_unknown(S::FAMILY, stage);
        };
        let name = template.name();
        let body = template.render_body(record)?;
        let section = render_section(name, &self.stamp, &body);

        let mut file = self.open_report()?;
        file.write_all(section.as_bytes())
            .with_context(|| format!("write {name} section to {}", self.path.display()))?;

        tracing::debug!(
            stage = name,
            bytes = section.len(),
            path = %self.path.display(),
            "appended report section"
        );
        Ok(WriteOutcome::Written {
            stage: name,
            bytes: section.len(),
        })
    }

    fn skip_unknown(&self, family: StageFamily, stage: &str) -> Result<WriteOutcome> {
        if self.strict_stages {
            return Err(UnknownStage {
                family,
                stage: stage.to_string(),
            }
            .into());
        }
        // The report file is still created on first touch.
        self.open_report()?;
        tracing::warn!(%family, stage, "unknown stage id; no report section written");
        Ok(WriteOutcome::Skipped {
            stage: stage.to_string(),
        })
    }

    fn open_report(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open report file for append: {}", self.path.display()))
    }
}
