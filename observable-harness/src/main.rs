use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use observable_harness::report::write_json_report;
use observable_harness::report::write_json_report_to_stdout;
use observable_harness::run_suite;
use observable_harness::ConsoleSink;
use observable_harness::Exercise;
use observable_harness::FailOn;
use observable_harness::Harness;
use observable_harness::ReferenceSolutions;
use observable_harness::ReportContext;
use observable_harness::Solutions;
use observable_harness::SuiteReport;
use observable_harness::Workbook;
use observable_harness::DEFAULT_TIMEOUT;
use observable_js::Scheduler;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
enum Candidate {
  /// The trusted solutions graded against themselves
  Reference,
  /// The starter workbook
  #[default]
  Workbook,
}

#[derive(Parser)]
#[command(author, version, about = "Grade stream transformation exercises", long_about = None)]
struct Cli {
  /// Which set of solutions to grade
  #[arg(long, value_enum, default_value_t = Candidate::Workbook)]
  candidate: Candidate,

  /// Run only these exercises (repeatable); defaults to all, in authoring order
  #[arg(long, value_enum)]
  exercise: Vec<Exercise>,

  /// Time units a scenario may take before it fails
  #[arg(long, default_value_t = DEFAULT_TIMEOUT)]
  timeout: u64,

  /// Narrate every pairwise comparison
  #[arg(long)]
  log_comparisons: bool,

  /// Write a JSON report to PATH (`-` for stdout)
  #[arg(long, value_name = "PATH")]
  json: Option<PathBuf>,

  /// Disable ANSI colours in the console report
  #[arg(long)]
  no_color: bool,

  /// Enable tracing output from the harness
  #[arg(long)]
  trace: bool,

  /// Which outcomes produce a non-zero exit status
  #[arg(long, value_enum, default_value_t = FailOn::Any)]
  fail_on: FailOn,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.trace);
  match run(&cli) {
    Ok(code) => code,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::from(2)
    }
  }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
  let exercises = if cli.exercise.is_empty() {
    Exercise::ALL.to_vec()
  } else {
    Exercise::ALL
      .into_iter()
      .filter(|exercise| cli.exercise.contains(exercise))
      .collect()
  };

  // Keep stdout clean for the JSON report when it goes there.
  let json_to_stdout = cli.json.as_deref().is_some_and(|path| path.as_os_str() == "-");
  let sink = if json_to_stdout {
    ConsoleSink::new(Box::new(io::stderr()), !cli.no_color)
  } else {
    ConsoleSink::stdout(!cli.no_color)
  };

  let scheduler = Scheduler::new();
  let context = ReportContext::new(sink);
  let harness = Harness::new(&scheduler, &context)
    .with_timeout(cli.timeout)
    .with_comparison_logging(cli.log_comparisons);
  let candidate: Box<dyn Solutions> = match cli.candidate {
    Candidate::Reference => Box::new(ReferenceSolutions),
    Candidate::Workbook => Box::new(Workbook::new(&context)),
  };

  let outcome = run_suite(&harness, &exercises, candidate.as_ref()).context("run suite")?;
  let report = SuiteReport::from_outcome(&outcome);
  match cli.json.as_deref() {
    Some(_) if json_to_stdout => write_json_report_to_stdout(&report)?,
    Some(path) => write_json_report(path, &report)?,
    None => {}
  }

  if cli.fail_on.should_fail(report.summary.failed) {
    Ok(ExitCode::from(1))
  } else {
    Ok(ExitCode::SUCCESS)
  }
}

fn init_tracing(enable: bool) {
  if !enable {
    return;
  }

  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
  let builder = fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr);
  if let Err(err) = builder.try_init() {
    eprintln!("failed to install tracing subscriber: {err}");
  }
}
