use crate::sink::ReportSink;
use crate::sink::Style;
use crate::HarnessError;
use crate::Result;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One narrated line attached to a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub style: Style,
  pub text: String,
}

/// Outcome of one named scenario, in the order the suite ran it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
  pub name: String,
  pub verdict: bool,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub diagnostics: Vec<Diagnostic>,
}

struct ContextState {
  sink: Box<dyn ReportSink>,
  depth: usize,
  pending: Vec<Diagnostic>,
  scenarios: Vec<ScenarioReport>,
}

/// Shared handle threaded through the evaluator and reporter in place of a process-wide group
/// stack. Owns the sink, tracks how many groups are open, buffers diagnostics produced while a
/// scenario is still being evaluated, and collects finished [`ScenarioReport`]s.
#[derive(Clone)]
pub struct ReportContext {
  state: Rc<RefCell<ContextState>>,
}

impl fmt::Debug for ReportContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.borrow();
    f.debug_struct("ReportContext")
      .field("depth", &state.depth)
      .field("pending", &state.pending.len())
      .field("scenarios", &state.scenarios.len())
      .finish()
  }
}

impl ReportContext {
  pub fn new(sink: impl ReportSink + 'static) -> Self {
    Self {
      state: Rc::new(RefCell::new(ContextState {
        sink: Box::new(sink),
        depth: 0,
        pending: Vec::new(),
        scenarios: Vec::new(),
      })),
    }
  }

  pub fn begin_group(&self, title: &str) {
    let mut state = self.state.borrow_mut();
    state.sink.begin_group(title);
    state.depth += 1;
  }

  pub fn end_group(&self) -> Result<()> {
    let mut state = self.state.borrow_mut();
    if state.depth == 0 {
      tracing::warn!("end_group called with no open group");
      return Err(HarnessError::UnbalancedGroup);
    }
    state.depth -= 1;
    state.sink.end_group();
    Ok(())
  }

  pub fn line(&self, style: Style, text: &str) {
    self.state.borrow_mut().sink.line(style, text);
  }

  /// Buffer a diagnostic for the scenario currently being evaluated.
  pub fn note(&self, style: Style, text: impl Into<String>) {
    self.state.borrow_mut().pending.push(Diagnostic {
      style,
      text: text.into(),
    });
  }

  pub fn take_pending(&self) -> Vec<Diagnostic> {
    std::mem::take(&mut self.state.borrow_mut().pending)
  }

  pub fn record(&self, report: ScenarioReport) {
    self.state.borrow_mut().scenarios.push(report);
  }

  pub fn scenarios(&self) -> Vec<ScenarioReport> {
    self.state.borrow().scenarios.clone()
  }

  pub fn depth(&self) -> usize {
    self.state.borrow().depth
  }

  /// Fails if any group is still open.
  pub fn ensure_balanced(&self) -> Result<()> {
    match self.depth() {
      0 => Ok(()),
      open => Err(HarnessError::UnclosedGroups(open)),
    }
  }
}
