//! Section template for model predictions.
use super::{body_from_lines, StageFamily, StageTemplate};
use crate::record::{Record, RecordError};
use crate::value::Value;

/// Stages reported through `write_predict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictStage {
    /// Training error plus per-candidate prediction table.
    GetPredictions,
}

impl PredictStage {
    /// Look up a stage id; ids are case-sensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "get_predictions" => Some(PredictStage::GetPredictions),
            _ => None,
        }
    }

    /// Return the stage id used in headers and footers.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictStage::GetPredictions => "get_predictions",
        }
    }
}

impl StageTemplate for PredictStage {
    const FAMILY: StageFamily = StageFamily::Predict;

    fn parse(id: &str) -> Option<Self> {
        Self::from_id(id)
    }

    fn name(self) -> &'static str {
        self.as_str()
    }

    fn render_body(self, record: &Record) -> Result<String, RecordError> {
        match self {
            PredictStage::GetPredictions => predictions(record, self.as_str()),
        }
    }
}

/// Training error, then a prediction/error table with an uncertainty
/// column when the record carries one. Rows stop at the shortest column.
fn predictions(record: &Record, stage: &str) -> Result<String, RecordError> {
    let prediction = record.require_seq(stage, "prediction")?;
    let average = record.require_entry(stage, "training_rmse", "average")?;
    let errors = seq_entry(record, stage, "validation_rmse", "all")?;

    let mut lines = vec![format!("Training error is: {average}")];
    match record.get("uncertainty") {
        Some(uncertainty) => {
            let uncertainty = uncertainty
                .as_seq()
                .ok_or_else(|| RecordError::shape(stage, "uncertainty", "sequence", uncertainty))?;
            lines.push("prediction, error, uncertainty".to_string());
            lines.extend(
                prediction
                    .iter()
                    .zip(errors)
                    .zip(uncertainty)
                    .map(|((p, e), u)| format!("{p}, {e}, {u}")),
            );
        }
        None => {
            lines.push("prediction, error".to_string());
            lines.extend(
                prediction
                    .iter()
                    .zip(errors)
                    .map(|(p, e)| format!("{p}, {e}")),
            );
        }
    }
    Ok(body_from_lines(lines))
}

fn seq_entry<'a>(
    record: &'a Record,
    stage: &str,
    field: &str,
    key: &str,
) -> Result<&'a [Value], RecordError> {
    let value = record.require_entry(stage, field, key)?;
    value
        .as_seq()
        .ok_or_else(|| RecordError::shape(stage, &format!("{field}.{key}"), "sequence", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Record {
        Record::from_json(json).unwrap()
    }

    #[test]
    fn two_column_table_without_uncertainty() {
        let record = record(
            r#"{"prediction": [1.5, 2.5],
                "training_rmse": {"average": 0.1},
                "validation_rmse": {"average": 0.3, "all": [0.2, 0.4]}}"#,
        );
        assert_eq!(
            PredictStage::GetPredictions.render_body(&record).unwrap(),
            "Training error is: 0.1\nprediction, error\n1.5, 0.2\n2.5, 0.4\n"
        );
    }

    #[test]
    fn three_column_table_stops_at_shortest() {
        let record = record(
            r#"{"prediction": [1.5, 2.5, 3.5],
                "training_rmse": {"average": 0.1},
                "validation_rmse": {"all": [0.2, 0.4, 0.6]},
                "uncertainty": [0.01, 0.02]}"#,
        );
        assert_eq!(
            PredictStage::GetPredictions.render_body(&record).unwrap(),
            "Training error is: 0.1\n\
             prediction, error, uncertainty\n\
             1.5, 0.2, 0.01\n\
             2.5, 0.4, 0.02\n"
        );
    }

    #[test]
    fn validation_rmse_needs_all_sequence() {
        let record = record(
            r#"{"prediction": [1.0],
                "training_rmse": {"average": 0.1},
                "validation_rmse": {"all": 0.2}}"#,
        );
        let err = PredictStage::GetPredictions.render_body(&record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "get_predictions record field `validation_rmse.all` must be a sequence (got float)"
        );
    }
}
