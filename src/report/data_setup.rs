//! Section templates for data setup stages.
use super::{body_from_lines, StageFamily, StageTemplate};
use crate::record::{Record, RecordError};
use crate::value::Value;

/// Stages reported through `write_data_setup`.
///
/// The closed set keeps a typo in a stage id from selecting a template by
/// accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSetupStage {
    /// De-duplicated candidates and their targets.
    GetUnique,
    /// Training subset in selection order.
    GetTrain,
    /// Side-by-side table of every train/test split.
    DataSplit,
    /// Indices dropped as outliers.
    RemoveOutliers,
    /// Target mean and standard deviation.
    TargetStandardize,
}

impl DataSetupStage {
    /// Look up a stage id; ids are case-sensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "get_unique" => Some(DataSetupStage::GetUnique),
            "get_train" => Some(DataSetupStage::GetTrain),
            "data_split" => Some(DataSetupStage::DataSplit),
            "remove_outliers" => Some(DataSetupStage::RemoveOutliers),
            "target_standardize" => Some(DataSetupStage::TargetStandardize),
            _ => None,
        }
    }

    /// Return the stage id used in headers and footers.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSetupStage::GetUnique => "get_unique",
            DataSetupStage::GetTrain => "get_train",
            DataSetupStage::DataSplit => "data_split",
            DataSetupStage::RemoveOutliers => "remove_outliers",
            DataSetupStage::TargetStandardize => "target_standardize",
        }
    }
}

impl StageTemplate for DataSetupStage {
    const FAMILY: StageFamily = StageFamily::DataSetup;

    fn parse(id: &str) -> Option<Self> {
        Self::from_id(id)
    }

    fn name(self) -> &'static str {
        self.as_str()
    }

    fn render_body(self, record: &Record) -> Result<String, RecordError> {
        let stage = self.as_str();
        match self {
            DataSetupStage::GetUnique => paired_targets(record, stage, "taken"),
            DataSetupStage::GetTrain => paired_targets(record, stage, "order"),
            DataSetupStage::DataSplit => split_table(record, stage),
            DataSetupStage::RemoveOutliers => {
                let removed = record.require(stage, "removed")?;
                Ok(body_from_lines(vec![
                    "Index of candidates removed:".to_string(),
                    removed.to_string(),
                ]))
            }
            DataSetupStage::TargetStandardize => {
                let mean = record.require(stage, "mean")?;
                let std = record.require(stage, "std")?;
                Ok(body_from_lines(vec![
                    format!("Target mean is: {mean}"),
                    format!("Target standard deviation is: {std}"),
                ]))
            }
        }
    }
}

/// `index, target` listing. The size line counts `index_field`, while the
/// rows stop at the shorter of the two sequences.
fn paired_targets(record: &Record, stage: &str, index_field: &str) -> Result<String, RecordError> {
    let indices = record.require_seq(stage, index_field)?;
    let targets = record.require_seq(stage, "target")?;

    let mut lines = vec![
        "index, target".to_string(),
        format!("(training size is {})", indices.len()),
    ];
    lines.extend(
        indices
            .iter()
            .zip(targets)
            .map(|(index, target)| format!("{index}, {target}")),
    );
    Ok(body_from_lines(lines))
}

fn split_table(record: &Record, stage: &str) -> Result<String, RecordError> {
    let candidates = record.require_nested_seq(stage, "split_cand")?;
    let index = record.require_nested_seq(stage, "index")?;
    let target = record.require_nested_seq(stage, "target")?;

    let splits = candidates.len().max(1);
    let rows = candidates.first().map_or(0, |first| first.len());
    let index = pad_splits(&index, splits, rows);
    let target = pad_splits(&target, splits, rows);

    let header = (1..=splits)
        .map(|set| format!("index set_{set}, target set_{set}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sizes = Value::Seq(
        candidates
            .iter()
            .map(|split| Value::Int(split.len() as i128))
            .collect(),
    );

    let mut lines = vec![header, format!("(training size is {sizes})")];
    for row in 0..rows {
        let cells = index
            .iter()
            .zip(&target)
            .map(|(index_col, target_col)| format!("{}, {}", index_col[row], target_col[row]))
            .collect::<Vec<_>>();
        lines.push(cells.join(", "));
    }
    Ok(body_from_lines(lines))
}

/// Copy the first `splits` columns of a split table, padding each one with
/// `Value::Null` up to `rows` entries. Missing splits become all-null
/// columns; the input is left untouched.
pub fn pad_splits(columns: &[&[Value]], splits: usize, rows: usize) -> Vec<Vec<Value>> {
    (0..splits)
        .map(|split| {
            let mut column = columns.get(split).map_or_else(Vec::new, |c| c.to_vec());
            if column.len() < rows {
                column.resize(rows, Value::Null);
            }
            column
        })
        .collect()
}
