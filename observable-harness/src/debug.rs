use crate::context::ReportContext;
use crate::sink::Style;
use crate::value::Value;
use observable_js::Notification;
use observable_js::Observable;

/// Which notifications [`log_everything`] narrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFlags {
  pub next: bool,
  pub error: bool,
  pub complete: bool,
}

impl LogFlags {
  pub const ALL: LogFlags = LogFlags {
    next: true,
    error: true,
    complete: true,
  };
  pub const NEXT_ONLY: LogFlags = LogFlags {
    next: true,
    error: false,
    complete: false,
  };
}

impl Default for LogFlags {
  fn default() -> Self {
    LogFlags::ALL
  }
}

/// Narrate every notification passing this point of a pipeline into the current scenario's
/// diagnostics, labelled with `title`. The stream itself is untouched.
///
/// Meant for debugging a candidate pipeline; the output gets noisy quickly.
pub fn log_everything<T>(
  source: &Observable<T>,
  context: &ReportContext,
  title: &str,
  flags: LogFlags,
) -> Observable<T>
where
  T: Clone + 'static,
  Value: From<T>,
{
  let context = context.clone();
  let title = title.to_string();
  source.tap(move |n| match n {
    Notification::Next(value) if flags.next => {
      let value = Value::from(value.clone());
      context.note(Style::Info, format!("{title} next {value}"));
    }
    Notification::Error(err) if flags.error => {
      context.note(Style::Error, format!("{title} error {err}"));
    }
    Notification::Complete if flags.complete => {
      context.note(Style::Info, format!("{title} complete"));
    }
    _ => {}
  })
}
