//! Shared test infrastructure for integration tests.

use atoml_report::{ReportConfig, ReportWriter};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temporary working directory holding one report file.
pub struct Fixture {
    dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("ATOMLout.txt");
        Self { dir, path }
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    #[allow(dead_code)]
    pub fn writer(&self) -> ReportWriter {
        let config = ReportConfig {
            report_path: self.path.clone(),
            strict_stages: false,
        };
        ReportWriter::new(&config)
    }

    pub fn contents(&self) -> String {
        fs::read_to_string(&self.path).expect("read report file")
    }

    #[allow(dead_code)]
    pub fn report_len(&self) -> u64 {
        fs::metadata(&self.path).map(|meta| meta.len()).unwrap_or(0)
    }

    /// Write a JSON record file next to the report and return its path.
    #[allow(dead_code)]
    pub fn record_file(&self, name: &str, json: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, json).expect("write record file");
        path
    }

    /// Run the CLI with the fixture directory as cwd and a clean report env.
    #[allow(dead_code)]
    pub fn run_cli(&self, args: &[&str]) -> Output {
        self.run_cli_with_env(args, &[])
    }

    /// Run the CLI with the given report env vars set on top of a clean env.
    #[allow(dead_code)]
    pub fn run_cli_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_atoml-report"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("ATOML_REPORT_PATH")
            .env_remove("ATOML_REPORT_STRICT")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .output()
            .expect("run atoml-report")
    }
}
