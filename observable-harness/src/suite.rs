use crate::context::ReportContext;
use crate::context::ScenarioReport;
use crate::evaluate::SequenceEvaluator;
use crate::exercises::Exercise;
use crate::exercises::Solutions;
use crate::reporter::report;
use crate::sink::Style;
use crate::value::Value;
use crate::HarnessError;
use crate::Result;
use observable_js::Notification;
use observable_js::Observable;
use observable_js::Scheduler;
use std::cell::Cell;
use std::rc::Rc;

/// Run `verdicts` one after another and AND them together, starting from `true`.
///
/// Each verdict stream is only subscribed once the previous one has completed, so scenarios never
/// overlap. No verdicts at all yields `true`.
pub fn aggregate(verdicts: Vec<Observable<bool>>) -> Observable<bool> {
  Observable::concat(verdicts).reduce(true, |all, pass| all && pass)
}

/// Everything a driver needs to turn candidate and reference streams into reported verdicts.
#[derive(Debug, Clone)]
pub struct Harness {
  scheduler: Scheduler,
  context: ReportContext,
  evaluator: SequenceEvaluator,
}

impl Harness {
  pub fn new(scheduler: &Scheduler, context: &ReportContext) -> Self {
    Self {
      scheduler: scheduler.clone(),
      context: context.clone(),
      evaluator: SequenceEvaluator::new(scheduler, context),
    }
  }

  pub fn with_timeout(mut self, timeout: u64) -> Self {
    self.evaluator = self.evaluator.with_timeout(timeout);
    self
  }

  pub fn with_comparison_logging(mut self, enabled: bool) -> Self {
    self.evaluator = self.evaluator.with_comparison_logging(enabled);
    self
  }

  pub fn scheduler(&self) -> &Scheduler {
    &self.scheduler
  }

  pub fn context(&self) -> &ReportContext {
    &self.context
  }

  pub fn evaluator(&self) -> &SequenceEvaluator {
    &self.evaluator
  }

  /// A reported scenario in which any failure is a failed scenario.
  pub fn compare_success<T: 'static>(
    &self,
    name: impl Into<String>,
    candidate: Observable<T>,
    reference: Observable<T>,
  ) -> Observable<bool>
  where
    Value: From<T>,
  {
    report(
      &self.context,
      name,
      self.evaluator.evaluate_success(candidate, reference),
    )
  }

  /// A reported scenario in which both sides are expected to fail at the same position.
  pub fn compare_failure<T: 'static>(
    &self,
    name: impl Into<String>,
    candidate: Observable<T>,
    reference: Observable<T>,
  ) -> Observable<bool>
  where
    Value: From<T>,
  {
    report(
      &self.context,
      name,
      self.evaluator.evaluate_error_tolerant(candidate, reference),
    )
  }

  pub fn all_pass(&self, verdicts: Vec<Observable<bool>>) -> Observable<bool> {
    aggregate(verdicts)
  }
}

#[derive(Debug, Clone)]
pub struct SuiteOutcome {
  pub passed: bool,
  pub scenarios: Vec<ScenarioReport>,
}

/// Run `exercises` in order against `candidate`, driving the scheduler until the suite settles.
pub fn run_suite(
  harness: &Harness,
  exercises: &[Exercise],
  candidate: &dyn Solutions,
) -> Result<SuiteOutcome> {
  let context = harness.context();
  context.line(Style::Headline, "Beginning Tests");

  let verdicts = exercises
    .iter()
    .map(|exercise| exercise.drive(harness, candidate))
    .collect();
  let result = Rc::new(Cell::new(None));
  let sink = result.clone();
  let subscription = aggregate(verdicts).subscribe(move |n| {
    if let Notification::Next(passed) = n {
      sink.set(Some(passed));
    }
  });
  let ran = harness.scheduler().run_until_idle();
  subscription.unsubscribe();
  tracing::debug!(ran, now = harness.scheduler().now(), "suite settled");

  let passed = result.get().ok_or(HarnessError::NoVerdict)?;
  let headline = if passed { "All Passed" } else { "Attention Required" };
  context.line(Style::for_outcome(passed), headline);
  context.ensure_balanced()?;
  Ok(SuiteOutcome {
    passed,
    scenarios: context.scenarios(),
  })
}
