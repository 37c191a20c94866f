use observable_harness::aggregate;
use observable_harness::run_suite;
use observable_harness::sequence_stream;
use observable_harness::Exercise;
use observable_harness::Harness;
use observable_harness::RecordingSink;
use observable_harness::ReferenceSolutions;
use observable_harness::ReportContext;
use observable_harness::SinkEvent;
use observable_harness::Style;
use observable_harness::Workbook;
use observable_js::Notification;
use observable_js::Observable;
use observable_js::Scheduler;
use std::cell::RefCell;
use std::rc::Rc;

fn setup() -> (Scheduler, RecordingSink, Harness) {
  let scheduler = Scheduler::new();
  let sink = RecordingSink::new();
  let context = ReportContext::new(sink.clone());
  let harness = Harness::new(&scheduler, &context);
  (scheduler, sink, harness)
}

fn final_value(scheduler: &Scheduler, stream: &Observable<bool>) -> Option<bool> {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let sink = seen.clone();
  stream.subscribe(move |n| {
    if let Notification::Next(v) = n {
      sink.borrow_mut().push(v);
    }
  });
  scheduler.run_until_idle();
  let seen = seen.take();
  assert!(seen.len() <= 1, "aggregate emitted more than once: {seen:?}");
  seen.first().copied()
}

/// Checks that groups nest properly and returns the titles in the order they opened.
fn group_titles(events: &[SinkEvent]) -> Vec<String> {
  let mut depth = 0usize;
  let mut titles = Vec::new();
  for event in events {
    match event {
      SinkEvent::BeginGroup { title } => {
        assert_eq!(depth, 0, "scenario groups must not nest: {title}");
        depth += 1;
        titles.push(title.clone());
      }
      SinkEvent::EndGroup => {
        assert!(depth > 0, "unbalanced end_group");
        depth -= 1;
      }
      SinkEvent::Line { .. } => {}
    }
  }
  assert_eq!(depth, 0);
  titles
}

#[test]
fn aggregate_ands_in_order_starting_from_true() {
  let scheduler = Scheduler::new();
  assert_eq!(final_value(&scheduler, &aggregate(Vec::new())), Some(true));
  assert_eq!(
    final_value(
      &scheduler,
      &aggregate(vec![
        Observable::just(true),
        Observable::just(false),
        Observable::just(true)
      ])
    ),
    Some(false)
  );
}

#[test]
fn aggregate_starts_each_verdict_after_the_previous_completes() {
  let scheduler = Scheduler::new();
  let starts = Rc::new(RefCell::new(Vec::new()));
  let verdicts = (0..3u64)
    .map(|index| {
      let starts = starts.clone();
      let clock = scheduler.clone();
      let inner = sequence_stream(&scheduler, vec![true], Some(10));
      Observable::defer(move || {
        starts.borrow_mut().push((index, clock.now()));
        inner.clone()
      })
    })
    .collect();
  assert_eq!(final_value(&scheduler, &aggregate(verdicts)), Some(true));
  assert_eq!(*starts.borrow(), [(0, 0), (1, 10), (2, 20)]);
}

#[test]
fn scenario_groups_never_interleave() {
  let (scheduler, sink, harness) = setup();
  let slow = sequence_stream(&scheduler, vec![1, 2], Some(40));
  let fast = sequence_stream(&scheduler, vec![1], None);
  let suite = harness.all_pass(vec![
    harness.compare_success("slow", slow.clone(), slow),
    harness.compare_success("fast", fast.clone(), Observable::never()),
  ]);
  assert_eq!(final_value(&scheduler, &suite), Some(false));

  let events = sink.events();
  assert_eq!(group_titles(&events), ["slow", "fast"]);
  assert_eq!(
    sink.lines(),
    [
      "slow: true",
      "timeout has occurred after 1000 time units",
      "fast: false"
    ]
  );
  assert_eq!(harness.context().depth(), 0);
}

#[test]
fn reference_graded_against_itself_passes_everything() {
  let (_scheduler, sink, harness) = setup();
  let outcome = run_suite(&harness, &Exercise::ALL, &ReferenceSolutions).unwrap();
  assert!(outcome.passed);
  assert_eq!(outcome.scenarios.len(), 27);
  assert!(outcome.scenarios.iter().all(|s| s.verdict));

  let names: Vec<_> = outcome.scenarios.iter().map(|s| s.name.as_str()).collect();
  assert_eq!(names.first(), Some(&"Example Echo Single"));
  assert_eq!(names.last(), Some(&"Not Chunky"));
  let twins = names.iter().position(|n| *n == "Twins 1").unwrap();
  let aesop = names.iter().position(|n| *n == "Aesop 1").unwrap();
  assert!(twins < aesop);

  let events = sink.events();
  assert_eq!(group_titles(&events).len(), 27);
  assert_eq!(
    events.first(),
    Some(&SinkEvent::Line {
      style: Style::Headline,
      text: "Beginning Tests".into()
    })
  );
  assert_eq!(
    events.last(),
    Some(&SinkEvent::Line {
      style: Style::Pass,
      text: "All Passed".into()
    })
  );
}

#[test]
fn starter_workbook_needs_attention() {
  let (_scheduler, sink, harness) = setup();
  let workbook = Workbook::new(harness.context());
  let outcome = run_suite(&harness, &Exercise::ALL, &workbook).unwrap();
  assert!(!outcome.passed);

  let echo: Vec<_> = outcome
    .scenarios
    .iter()
    .filter(|s| s.name.starts_with("Example Echo"))
    .collect();
  assert_eq!(echo.len(), 3);
  assert!(echo.iter().all(|s| s.verdict));
  assert!(echo[0]
    .diagnostics
    .iter()
    .any(|d| d.text == r#"Before Echo next "Hello""#));
  assert!(outcome
    .scenarios
    .iter()
    .filter(|s| !s.name.starts_with("Example Echo"))
    .all(|s| !s.verdict));

  assert_eq!(sink.lines().last().map(String::as_str), Some("Attention Required"));
}

#[test]
fn selected_exercises_run_alone() {
  let (_scheduler, _sink, harness) = setup();
  let outcome = run_suite(&harness, &[Exercise::Aesop], &ReferenceSolutions).unwrap();
  let names: Vec<_> = outcome.scenarios.iter().map(|s| s.name.clone()).collect();
  assert_eq!(names, ["Aesop 1", "Aesop 2"]);
}

#[test]
fn comparison_logging_narrates_into_each_group() {
  let scheduler = Scheduler::new();
  let sink = RecordingSink::new();
  let context = ReportContext::new(sink.clone());
  let harness = Harness::new(&scheduler, &context).with_comparison_logging(true);
  let outcome = run_suite(&harness, &[Exercise::Reunion], &ReferenceSolutions).unwrap();
  assert!(outcome.passed);
  let diagnostics = &outcome.scenarios[0].diagnostics;
  assert_eq!(diagnostics.len(), 3);
  assert!(diagnostics[0].text.starts_with("Comparing { owner: \"DanTori\""));
}
