//! Report sinks: where scenario narration ends up.

use colored::Colorize;
use serde::Serialize;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Visual treatment requested for a line. Rendering is up to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
  Plain,
  Info,
  Warn,
  Error,
  /// Affirmative styling for a passing outcome.
  Pass,
  /// Attention styling for a failing outcome.
  Fail,
  Headline,
}

impl Style {
  pub fn for_outcome(pass: bool) -> Self {
    if pass {
      Style::Pass
    } else {
      Style::Fail
    }
  }
}

/// Receiver of the harness's narration.
///
/// Calls arrive strictly nested: every `begin_group` is matched by exactly one later `end_group`.
pub trait ReportSink {
  fn begin_group(&mut self, title: &str);
  fn end_group(&mut self);
  fn line(&mut self, style: Style, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SinkEvent {
  BeginGroup { title: String },
  EndGroup,
  Line { style: Style, text: String },
}

/// Keeps every event in memory. Clones share the same event log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
  events: Rc<RefCell<Vec<SinkEvent>>>,
}

impl RecordingSink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> Vec<SinkEvent> {
    self.events.borrow().clone()
  }

  /// Text of every line event, in order.
  pub fn lines(&self) -> Vec<String> {
    self
      .events
      .borrow()
      .iter()
      .filter_map(|event| match event {
        SinkEvent::Line { text, .. } => Some(text.clone()),
        _ => None,
      })
      .collect()
  }
}

impl ReportSink for RecordingSink {
  fn begin_group(&mut self, title: &str) {
    self.events.borrow_mut().push(SinkEvent::BeginGroup {
      title: title.to_string(),
    });
  }

  fn end_group(&mut self) {
    self.events.borrow_mut().push(SinkEvent::EndGroup);
  }

  fn line(&mut self, style: Style, text: &str) {
    self.events.borrow_mut().push(SinkEvent::Line {
      style,
      text: text.to_string(),
    });
  }
}

/// Renders to a terminal (or any writer), indenting two spaces per open group.
pub struct ConsoleSink {
  out: Box<dyn Write>,
  color: bool,
  depth: usize,
}

impl ConsoleSink {
  pub fn stdout(color: bool) -> Self {
    Self::new(Box::new(io::stdout()), color)
  }

  pub fn new(out: Box<dyn Write>, color: bool) -> Self {
    Self {
      out,
      color,
      depth: 0,
    }
  }

  fn render(&self, style: Style, text: &str) -> String {
    let text = match style {
      Style::Error => format!("\u{26d4} {text}"),
      Style::Warn => format!("\u{26a0} {text}"),
      _ => text.to_string(),
    };
    if !self.color {
      return text;
    }
    match style {
      Style::Plain => text,
      Style::Info => text.dimmed().to_string(),
      Style::Warn => text.yellow().to_string(),
      Style::Error => text.red().to_string(),
      Style::Pass => text.green().to_string(),
      Style::Fail => text.red().bold().to_string(),
      Style::Headline => text.bold().to_string(),
    }
  }

  fn write_line(&mut self, text: &str) {
    let indent = "  ".repeat(self.depth);
    if let Err(err) = writeln!(self.out, "{indent}{text}") {
      tracing::warn!(%err, "failed to write report line");
    }
  }
}

impl ReportSink for ConsoleSink {
  fn begin_group(&mut self, title: &str) {
    let title = if self.color {
      title.bold().underline().to_string()
    } else {
      title.to_string()
    };
    self.write_line(&title);
    self.depth += 1;
  }

  fn end_group(&mut self) {
    self.depth = self.depth.saturating_sub(1);
    if let Err(err) = self.out.flush() {
      tracing::warn!(%err, "failed to flush report output");
    }
  }

  fn line(&mut self, style: Style, text: &str) {
    let rendered = self.render(style, text);
    self.write_line(&rendered);
  }
}
