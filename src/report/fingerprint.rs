//! Section templates for fingerprint generation and feature screening.
use super::{body_from_lines, StageFamily, StageTemplate};
use crate::record::{Record, RecordError};

/// Stages reported through `write_fingerprint_setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintStage {
    /// Generator names and whether a prior is used.
    ReturnFpv,
    /// Per-feature mean and standard deviation.
    Standardize,
    /// Per-feature mean and range.
    Normalize,
    /// One-shot correlation screening.
    SureIndependenceScreening,
    /// Iterated correlation screening.
    IterativeSis,
}

impl FingerprintStage {
    /// Look up a stage id; ids are case-sensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "return_fpv" => Some(FingerprintStage::ReturnFpv),
            "standardize" => Some(FingerprintStage::Standardize),
            "normalize" => Some(FingerprintStage::Normalize),
            "sure_independence_screening" => Some(FingerprintStage::SureIndependenceScreening),
            "iterative_sis" => Some(FingerprintStage::IterativeSis),
            _ => None,
        }
    }

    /// Return the stage id used in headers and footers.
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerprintStage::ReturnFpv => "return_fpv",
            FingerprintStage::Standardize => "standardize",
            FingerprintStage::Normalize => "normalize",
            FingerprintStage::SureIndependenceScreening => "sure_independence_screening",
            FingerprintStage::IterativeSis => "iterative_sis",
        }
    }
}

impl StageTemplate for FingerprintStage {
    const FAMILY: StageFamily = StageFamily::Fingerprint;

    fn parse(id: &str) -> Option<Self> {
        Self::from_id(id)
    }

    fn name(self) -> &'static str {
        self.as_str()
    }

    fn render_body(self, record: &Record) -> Result<String, RecordError> {
        let stage = self.as_str();
        match self {
            FingerprintStage::ReturnFpv => {
                let prior = record.require(stage, "prior")?;
                let first = prior
                    .as_seq()
                    .and_then(|items| items.first())
                    .ok_or_else(|| RecordError::shape(stage, "prior", "non-empty sequence", prior))?;
                let names = record.require(stage, "names")?;
                Ok(body_from_lines(vec![
                    format!("Use prior: {first}"),
                    "Generator names:".to_string(),
                    names.to_string(),
                ]))
            }
            FingerprintStage::Standardize => {
                feature_stats(record, stage, "std", "Feature standard deviation is:")
            }
            FingerprintStage::Normalize => {
                feature_stats(record, stage, "dif", "Feature difference is:")
            }
            FingerprintStage::SureIndependenceScreening => {
                screening(record, stage, "ordered_corr")
            }
            FingerprintStage::IterativeSis => screening(record, stage, "correlation"),
        }
    }
}

/// Per-feature mean followed by a spread statistic.
fn feature_stats(
    record: &Record,
    stage: &str,
    spread_field: &str,
    spread_label: &str,
) -> Result<String, RecordError> {
    let mean = record.require(stage, "mean")?;
    let spread = record.require(stage, spread_field)?;
    Ok(body_from_lines(vec![
        "Feature mean is:".to_string(),
        mean.to_string(),
        spread_label.to_string(),
        spread.to_string(),
    ]))
}

/// Correlations, then the accepted/rejected feature lists when present.
fn screening(record: &Record, stage: &str, corr_field: &str) -> Result<String, RecordError> {
    let correlation = record.require(stage, corr_field)?;
    let mut lines = vec!["Correlation is:".to_string(), correlation.to_string()];
    if let Some(accepted) = record.get("accepted") {
        lines.push("Accepted features are:".to_string());
        lines.push(accepted.to_string());
    }
    if let Some(rejected) = record.get("rejected") {
        lines.push("Rejected features are:".to_string());
        lines.push(rejected.to_string());
    }
    Ok(body_from_lines(lines))
}
