//! Human-readable, append-only reports for ML data-preparation stages.
//!
//! A [`ReportWriter`] turns a stage id plus its [`Record`] into a text
//! section and appends it to the shared report file (`ATOMLout.txt` by
//! default). Every section written by one writer carries the same run stamp.
//!
//! ```no_run
//! use atoml_report::{Record, ReportConfig, ReportWriter};
//!
//! let writer = ReportWriter::new(&ReportConfig::default());
//! let record = Record::new().with("mean", 0.5).with("std", 1.25);
//! writer.write_data_setup("target_standardize", &record)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
pub mod config;
pub mod record;
pub mod report;
pub mod stamp;
pub mod value;

pub use config::{load_config, validate_config, ReportConfig, DEFAULT_REPORT_PATH};
pub use record::{Record, RecordError};
pub use report::{
    pad_splits, render_section, DataSetupStage, FingerprintStage, PredictStage, ReportWriter,
    StageFamily, UnknownStage, WriteOutcome,
};
pub use stamp::RunStamp;
pub use value::Value;
