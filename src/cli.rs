//! CLI argument parsing for the report writer.
//!
//! One subcommand per entry-point family; records arrive as JSON objects.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
///
/// Report location flags are global so they read naturally before or after
/// the subcommand.
#[derive(Parser, Debug)]
#[command(
    name = "atoml-report",
    version,
    about = "Append pipeline stage reports to the shared ATOML report file",
    after_help = "Examples:\n  atoml-report data-setup --stage get_unique --record unique.json\n  atoml-report fingerprint --stage standardize --record - < stats.json\n  atoml-report --out run.txt predict --stage get_predictions --record preds.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Report file to append to (overrides config and ATOML_REPORT_PATH)
    #[arg(long, value_name = "PATH", global = true)]
    pub out: Option<PathBuf>,

    /// JSON config file with `report_path` / `strict_stages`
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Fail on unknown stage ids instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per report entry point.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report a data setup stage (get_unique, get_train, data_split, ...)
    DataSetup(StageArgs),
    /// Report a fingerprint stage (return_fpv, standardize, normalize, ...)
    Fingerprint(StageArgs),
    /// Report a prediction stage (get_predictions)
    Predict(StageArgs),
}

/// Stage selection and record input shared by every subcommand.
#[derive(Parser, Debug)]
pub struct StageArgs {
    /// Stage id selecting the section template
    #[arg(long)]
    pub stage: String,

    /// JSON object holding the stage record, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub record: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        RootArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = RootArgs::try_parse_from([
            "atoml-report",
            "predict",
            "--stage",
            "get_predictions",
            "--record",
            "-",
            "--strict",
            "--out",
            "run.txt",
        ])
        .unwrap();
        assert!(args.strict);
        assert_eq!(args.out, Some(PathBuf::from("run.txt")));
        match args.command {
            Command::Predict(stage) => {
                assert_eq!(stage.stage, "get_predictions");
                assert_eq!(stage.record, PathBuf::from("-"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
