//! Grading harness for stream transformation exercises.
//!
//! A candidate implements each exercise's transformation ([`Solutions`]); the harness feeds the
//! same fixtures to the candidate and to [`ReferenceSolutions`], compares the two output streams
//! position by position, reports a pass/fail line per scenario, and folds every verdict into one
//! suite result.
//!
//! Evaluation runs on a virtual-time [`Scheduler`](observable_js::Scheduler), so timed fixtures
//! and the per-scenario timeout cost no wall-clock time.

use thiserror::Error;

pub mod compare;
pub mod context;
pub mod data;
pub mod debug;
pub mod evaluate;
pub mod exercises;
pub mod fail_on;
pub mod fixture;
pub mod reference;
pub mod report;
pub mod reporter;
pub mod sink;
pub mod suite;
pub mod value;
pub mod workbook;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
  #[error("end_group called with no open group")]
  UnbalancedGroup,
  #[error("{0} report group(s) left open")]
  UnclosedGroups(usize),
  #[error("suite settled without producing a verdict")]
  NoVerdict,
}

pub use compare::structurally_equal;
pub use context::Diagnostic;
pub use context::ReportContext;
pub use context::ScenarioReport;
pub use debug::log_everything;
pub use debug::LogFlags;
pub use evaluate::error_sentinel;
pub use evaluate::ComparisonMode;
pub use evaluate::SequenceEvaluator;
pub use evaluate::DEFAULT_TIMEOUT;
pub use exercises::Exercise;
pub use exercises::Solutions;
pub use fail_on::FailOn;
pub use fixture::failing_at;
pub use fixture::point_stream;
pub use fixture::sequence_stream;
pub use reference::ReferenceSolutions;
pub use report::SuiteReport;
pub use report::REPORT_SCHEMA_VERSION;
pub use reporter::report;
pub use sink::ConsoleSink;
pub use sink::RecordingSink;
pub use sink::ReportSink;
pub use sink::SinkEvent;
pub use sink::Style;
pub use suite::aggregate;
pub use suite::run_suite;
pub use suite::Harness;
pub use suite::SuiteOutcome;
pub use value::Kind;
pub use value::Value;
pub use workbook::Workbook;
