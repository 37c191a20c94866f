use crate::context::ReportContext;
use crate::context::ScenarioReport;
use crate::sink::Style;
use observable_js::Notification;
use observable_js::Observable;
use observable_js::Subscriber;
use std::cell::Cell;
use std::rc::Rc;

/// Pass `verdict` through unchanged while narrating it under a group titled `name`.
///
/// The group opens lazily when the verdict arrives, receives the diagnostics buffered on the
/// context during evaluation followed by the `"{name}: {pass}"` line, and closes when the verdict
/// stream terminates or the subscription is dropped. A scenario that never produces a verdict
/// leaves no group behind.
pub fn report(
  context: &ReportContext,
  name: impl Into<String>,
  verdict: Observable<bool>,
) -> Observable<bool> {
  let name: Rc<str> = name.into().into();
  let context = context.clone();
  Observable::new(move |downstream| {
    let opened = Rc::new(Cell::new(false));
    {
      let context = context.clone();
      let opened = opened.clone();
      downstream.add_teardown(move || close_group(&context, &opened));
    }

    let context = context.clone();
    let name = name.clone();
    let out = downstream.clone();
    let upstream = Subscriber::new(move |n| match n {
      Notification::Next(pass) => {
        if !opened.replace(true) {
          tracing::debug!(scenario = %name, "opening scenario group");
          context.begin_group(&name);
        }
        let diagnostics = context.take_pending();
        for diagnostic in &diagnostics {
          context.line(diagnostic.style, &diagnostic.text);
        }
        context.line(Style::for_outcome(pass), &format!("{name}: {pass}"));
        tracing::debug!(scenario = %name, pass, "scenario settled");
        context.record(ScenarioReport {
          name: name.to_string(),
          verdict: pass,
          diagnostics,
        });
        out.next(pass);
      }
      Notification::Error(err) => {
        close_group(&context, &opened);
        out.error(err);
      }
      Notification::Complete => {
        close_group(&context, &opened);
        out.complete();
      }
    });
    downstream.add(upstream.subscription().clone());
    verdict.subscribe_with(upstream);
  })
}

fn close_group(context: &ReportContext, opened: &Cell<bool>) {
  if !opened.replace(false) {
    return;
  }
  if let Err(err) = context.end_group() {
    tracing::warn!(%err, "scenario group was already closed");
  }
}
