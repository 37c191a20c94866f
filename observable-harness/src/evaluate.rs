//! Positional comparison of a candidate stream against a reference stream.

use crate::compare::structurally_equal;
use crate::context::ReportContext;
use crate::sink::Style;
use crate::value::Value;
use observable_js::Observable;
use observable_js::Scheduler;

/// Time units an evaluation may take before it is abandoned with verdict `false`.
pub const DEFAULT_TIMEOUT: u64 = 1000;

/// How stream failures affect a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
  /// A failure on either side ends the evaluation with verdict `false` and an error diagnostic.
  StrictSuccess,
  /// A failure on either side is replaced by [`error_sentinel`] and compared like any other value,
  /// so two streams failing at the same position are equal there.
  ErrorTolerant,
}

/// The value substituted for a failure in [`ComparisonMode::ErrorTolerant`].
#[allow(clippy::approx_constant)]
pub fn error_sentinel() -> Value {
  Value::record([(
    "q",
    Value::array([Value::from("t"), Value::from(3.14)]),
  )])
}

/// Produces one verdict stream per scenario.
///
/// Verdict streams are cold: nothing is compared until the verdict is subscribed, and both the
/// candidate and the reference are subscribed afresh each time.
#[derive(Debug, Clone)]
pub struct SequenceEvaluator {
  scheduler: Scheduler,
  context: ReportContext,
  timeout: u64,
  log_comparisons: bool,
}

impl SequenceEvaluator {
  pub fn new(scheduler: &Scheduler, context: &ReportContext) -> Self {
    Self {
      scheduler: scheduler.clone(),
      context: context.clone(),
      timeout: DEFAULT_TIMEOUT,
      log_comparisons: false,
    }
  }

  pub fn with_timeout(mut self, timeout: u64) -> Self {
    self.timeout = timeout;
    self
  }

  /// Narrate every pairwise comparison into the scenario's diagnostics.
  pub fn with_comparison_logging(mut self, enabled: bool) -> Self {
    self.log_comparisons = enabled;
    self
  }

  pub fn timeout(&self) -> u64 {
    self.timeout
  }

  pub fn evaluate_success<T: 'static>(
    &self,
    candidate: Observable<T>,
    reference: Observable<T>,
  ) -> Observable<bool>
  where
    Value: From<T>,
  {
    self.evaluate(ComparisonMode::StrictSuccess, candidate, reference)
  }

  pub fn evaluate_error_tolerant<T: 'static>(
    &self,
    candidate: Observable<T>,
    reference: Observable<T>,
  ) -> Observable<bool>
  where
    Value: From<T>,
  {
    self.evaluate(ComparisonMode::ErrorTolerant, candidate, reference)
  }

  /// Emits exactly one verdict, then completes. Never fails: timeouts and strict-mode failures
  /// become `false` plus an error diagnostic on the context.
  pub fn evaluate<T: 'static>(
    &self,
    mode: ComparisonMode,
    candidate: Observable<T>,
    reference: Observable<T>,
  ) -> Observable<bool>
  where
    Value: From<T>,
  {
    let mut candidate = candidate.map(Value::from);
    let mut reference = reference.map(Value::from);
    if mode == ComparisonMode::ErrorTolerant {
      candidate = candidate.on_error_return(error_sentinel());
      reference = reference.on_error_return(error_sentinel());
    }

    let context = self.context.clone();
    let log_comparisons = self.log_comparisons;
    let comparer = move |expected: &Value, actual: &Value| {
      let equal = structurally_equal(expected, actual);
      tracing::trace!(%expected, %actual, equal, "compared emissions");
      if log_comparisons {
        context.note(Style::Info, format!("Comparing {expected} with {actual}: {equal}"));
      }
      equal
    };

    let context = self.context.clone();
    reference
      .sequence_equal(candidate, comparer)
      .timeout(&self.scheduler, self.timeout)
      .catch_error(move |err| {
        tracing::debug!(%err, ?mode, "evaluation failed");
        context.note(Style::Error, err.to_string());
        Observable::just(false)
      })
  }
}
