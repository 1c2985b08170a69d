use anyhow::{Context, Result};
use atoml_report::{
    load_config, validate_config, Record, ReportConfig, ReportWriter, WriteOutcome,
};
use clap::Parser;
use std::io::Read;
use std::path::Path;

mod cli;
use cli::{Command, RootArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = RootArgs::parse();
    let config = resolve_config(&args)?;
    let writer = ReportWriter::new(&config);

    let outcome = match &args.command {
        Command::DataSetup(stage) => {
            writer.write_data_setup(&stage.stage, &read_record(&stage.record)?)?
        }
        Command::Fingerprint(stage) => {
            writer.write_fingerprint_setup(&stage.stage, &read_record(&stage.record)?)?
        }
        Command::Predict(stage) => {
            writer.write_predict(&stage.stage, &read_record(&stage.record)?)?
        }
    };

    match outcome {
        WriteOutcome::Written { stage, bytes } => {
            tracing::info!(stage, bytes, "report section written");
            println!(
                "Appended {stage} section ({bytes} bytes) to {}",
                writer.path().display()
            );
        }
        WriteOutcome::Skipped { stage } => {
            println!("No section written: unknown stage {stage:?}");
        }
    }
    Ok(())
}

/// Defaults, then the config file (if any), then environment, then flags.
fn resolve_config(args: &RootArgs) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = load_config(path)?;
            config.apply_env()?;
            config
        }
        None => ReportConfig::from_env()?,
    };
    if let Some(out) = &args.out {
        config.report_path = out.clone();
    }
    if args.strict {
        config.strict_stages = true;
    }
    validate_config(&config)?;
    Ok(config)
}

fn read_record(path: &Path) -> Result<Record> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read record from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("read record {}", path.display()))?
    };
    Record::from_json(&text).context("parse record JSON object")
}
