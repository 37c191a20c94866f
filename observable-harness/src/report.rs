use crate::context::ScenarioReport;
use crate::suite::SuiteOutcome;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
  pub total: usize,
  pub passed: usize,
  pub failed: usize,
  pub all_passed: bool,
}

/// Machine-readable record of one suite run. Results keep the order scenarios ran in.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
  pub schema_version: u32,
  pub summary: Summary,
  pub results: Vec<ScenarioReport>,
}

impl SuiteReport {
  pub fn from_outcome(outcome: &SuiteOutcome) -> Self {
    let passed = outcome.scenarios.iter().filter(|s| s.verdict).count();
    Self {
      schema_version: REPORT_SCHEMA_VERSION,
      summary: Summary {
        total: outcome.scenarios.len(),
        passed,
        failed: outcome.scenarios.len() - passed,
        all_passed: outcome.passed,
      },
      results: outcome.scenarios.clone(),
    }
  }
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> anyhow::Result<String> {
  serde_json::to_string_pretty(value).context("format JSON report")
}

/// Write `report` as pretty JSON to `path`, creating parent directories as needed.
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> anyhow::Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
  }

  let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
  let mut writer = BufWriter::new(file);
  write_json_report_to_writer(&mut writer, report)
    .with_context(|| format!("write report to {}", path.display()))?;
  writer
    .flush()
    .with_context(|| format!("flush {}", path.display()))?;
  Ok(())
}

pub fn write_json_report_to_writer<W: Write, T: Serialize>(
  writer: &mut W,
  report: &T,
) -> anyhow::Result<()> {
  serde_json::to_writer_pretty(&mut *writer, report).context("write JSON report")?;
  writeln!(&mut *writer).context("write JSON report")?;
  Ok(())
}

pub fn write_json_report_to_stdout<T: Serialize>(report: &T) -> anyhow::Result<()> {
  let stdout = io::stdout();
  let mut handle = stdout.lock();
  write_json_report_to_writer(&mut handle, report)
}
