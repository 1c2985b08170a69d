//! Integration tests for the append-only report file.
//!
//! Each test writes into its own temporary directory and inspects the raw
//! file contents the way a pipeline user would read them.

mod common;

use atoml_report::{Record, ReportConfig, ReportWriter, RunStamp, WriteOutcome};
use common::Fixture;
use std::fs;

fn predictions_record(with_uncertainty: bool) -> Record {
    let mut record = Record::from_json(
        r#"{"prediction": [1.25, 2.5],
            "training_rmse": {"average": 0.3},
            "validation_rmse": {"average": 0.4, "all": [0.1, 0.2]}}"#,
    )
    .expect("parse record");
    if with_uncertainty {
        record.insert("uncertainty", vec![0.05, 0.06]);
    }
    record
}

#[test]
fn every_valid_call_grows_the_file() {
    let fixture = Fixture::new();
    let writer = fixture.writer();

    let calls: Vec<(&str, Record)> = vec![
        (
            "get_unique",
            Record::new()
                .with("taken", vec![1, 2])
                .with("target", vec![0.5, 0.7]),
        ),
        ("remove_outliers", Record::new().with("removed", vec![4])),
        (
            "target_standardize",
            Record::new().with("mean", 3.0).with("std", 0.5),
        ),
    ];

    let mut previous = fixture.report_len();
    for (stage, record) in &calls {
        writer.write_data_setup(stage, record).expect("write section");
        let current = fixture.report_len();
        assert!(current > previous, "{stage} did not grow the report");
        previous = current;
    }
}

#[test]
fn sections_end_with_stage_footer() {
    let fixture = Fixture::new();
    let writer = fixture.writer();

    writer
        .write_fingerprint_setup(
            "normalize",
            &Record::new()
                .with("mean", vec![1.0])
                .with("dif", vec![2.0]),
        )
        .expect("write normalize");
    assert!(fixture
        .contents()
        .ends_with("\nEnd of normalize function.\n \n"));

    writer
        .write_predict("get_predictions", &predictions_record(false))
        .expect("write predictions");
    assert!(fixture
        .contents()
        .ends_with("\nEnd of get_predictions function.\n \n"));
}

#[test]
fn run_stamp_is_shared_by_all_sections() {
    let fixture = Fixture::new();
    let writer = fixture.writer();
    let record = Record::new().with("removed", vec![1]);

    writer.write_data_setup("remove_outliers", &record).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));
    writer.write_data_setup("remove_outliers", &record).unwrap();

    let contents = fixture.contents();
    let stamps: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.split_once(" Run on "))
        .map(|(_, stamp)| stamp)
        .collect();
    assert_eq!(stamps.len(), 2);
    assert_eq!(stamps[0], stamps[1]);
    assert_eq!(stamps[0], writer.stamp().as_str());
}

#[test]
fn data_split_writes_padded_rows_and_keeps_record() {
    let fixture = Fixture::new();
    let config = ReportConfig {
        report_path: fixture.path.clone(),
        strict_stages: false,
    };
    let writer = ReportWriter::with_stamp(&config, RunStamp::fixed("Tue Mar  7 10:00:00 2017"));
    let record = Record::from_json(
        r#"{"split_cand": [[0, 1], [2]],
            "index": [[10, 11], [20]],
            "target": [[0.1, 0.2], [0.3]]}"#,
    )
    .unwrap();
    let before = record.clone();

    writer.write_data_setup("data_split", &record).unwrap();

    assert_eq!(
        fixture.contents(),
        "Output from atoml.data_split. Run on Tue Mar  7 10:00:00 2017\n\
         index set_1, target set_1, index set_2, target set_2\n\
         (training size is [2, 1])\n\
         10, 0.1, 20, 0.3\n\
         11, 0.2, None, None\n\
         \n\
         End of data_split function.\n \n"
    );
    assert_eq!(record, before);
}

#[test]
fn get_unique_header_counts_all_taken() {
    let fixture = Fixture::new();
    let writer = fixture.writer();
    let record = Record::new()
        .with("taken", vec![1, 2, 3])
        .with("target", vec![0.1, 0.2]);

    writer.write_data_setup("get_unique", &record).unwrap();

    let contents = fixture.contents();
    assert!(contents.contains("(training size is 3)\n"));
    let data_lines: Vec<&str> = contents
        .lines()
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .collect();
    assert_eq!(data_lines, vec!["1, 0.1", "2, 0.2"]);
}

#[test]
fn unknown_stage_touches_file_but_appends_nothing() {
    let fixture = Fixture::new();
    let writer = fixture.writer();
    assert!(!fixture.path.exists());

    for outcome in [
        writer.write_data_setup("bogus", &Record::new()),
        writer.write_fingerprint_setup("bogus", &Record::new()),
        writer.write_predict("bogus", &Record::new()),
    ] {
        assert_eq!(
            outcome.expect("unknown stage is not an error"),
            WriteOutcome::Skipped {
                stage: "bogus".to_string()
            }
        );
    }
    assert!(fixture.path.exists());
    assert_eq!(fixture.contents(), "");
}

#[test]
fn prediction_table_header_tracks_uncertainty() {
    let fixture = Fixture::new();
    let writer = fixture.writer();

    writer
        .write_predict("get_predictions", &predictions_record(false))
        .unwrap();
    writer
        .write_predict("get_predictions", &predictions_record(true))
        .unwrap();

    let headers: Vec<String> = fixture
        .contents()
        .lines()
        .filter(|line| line.starts_with("prediction"))
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec!["prediction, error", "prediction, error, uncertainty"]
    );
    assert!(fixture.contents().contains("2.5, 0.2, 0.06\n"));
}

#[test]
fn existing_content_is_never_truncated() {
    let fixture = Fixture::new();
    fs::write(&fixture.path, "earlier run\n").unwrap();

    fixture
        .writer()
        .write_data_setup("remove_outliers", &Record::new().with("removed", vec![2]))
        .unwrap();

    let contents = fixture.contents();
    assert!(contents.starts_with("earlier run\nOutput from atoml.remove_outliers. Run on "));
}

#[test]
fn unwritable_path_propagates_io_error() {
    let fixture = Fixture::new();
    let config = ReportConfig {
        report_path: fixture.path.join("missing-dir").join("ATOMLout.txt"),
        strict_stages: false,
    };
    let err = ReportWriter::new(&config)
        .write_data_setup("remove_outliers", &Record::new().with("removed", vec![2]))
        .unwrap_err();
    assert!(err.to_string().contains("open report file for append"));
}
