use super::strings;
use super::Solutions;
use crate::fixture::failing_at;
use crate::fixture::point_stream;
use crate::fixture::sequence_stream;
use crate::reference::ReferenceSolutions;
use crate::suite::Harness;
use observable_js::Observable;

pub(super) fn example_echo(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let single = point_stream(scheduler, "Hello".to_string());
  let multiple = sequence_stream(scheduler, strings(&["Blue", "Green", "Red"]), None);
  let failing = failing_at(
    sequence_stream(scheduler, strings(&["-)", "-|", "-("]), None),
    |face| face == "-(",
    "Internal Failure: Sound.exe has stopped unexpectedly",
  );
  let reference = ReferenceSolutions;

  harness.all_pass(vec![
    harness.compare_success(
      "Example Echo Single",
      candidate.example_echo(single.clone()),
      reference.example_echo(single),
    ),
    harness.compare_success(
      "Example Echo Multiple",
      candidate.example_echo(multiple.clone()),
      reference.example_echo(multiple),
    ),
    harness.compare_failure(
      "Example Echo Failure",
      candidate.example_echo(failing.clone()),
      reference.example_echo(failing),
    ),
  ])
}

pub(super) fn newline_tokenization(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let single = point_stream(
    scheduler,
    "This is line one.\nThis is line two\nAnd I am line three!".to_string(),
  );
  let multiple = sequence_stream(scheduler, strings(&["1:1\n1:2\n1:3", "2:1\n2:2", "3:1"]), None);
  let reference = ReferenceSolutions;

  harness.all_pass(vec![
    harness.compare_success(
      "NewlineTokenization Single",
      candidate.newline_tokenization(single.clone()),
      reference.newline_tokenization(single),
    ),
    harness.compare_success(
      "NewlineTokenization Multiple",
      candidate.newline_tokenization(multiple.clone()),
      reference.newline_tokenization(multiple),
    ),
  ])
}

pub(super) fn multiply(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let numbers = sequence_stream(scheduler, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)], None);
  let mixed = sequence_stream(scheduler, vec![Some(1.0), None, Some(4.0), None, Some(8.0)], None);
  let absent = point_stream(scheduler, None);
  let fraction = point_stream(scheduler, Some(0.6180339887));
  let reference = ReferenceSolutions;

  let scenarios: Vec<(&str, Observable<Option<f64>>)> = vec![
    ("Multiply Numbers", numbers),
    ("Multiply Mixed", mixed),
    ("Multiply NaN", absent),
    ("Multiply Fraction", fraction),
  ];
  harness.all_pass(
    scenarios
      .into_iter()
      .map(|(name, source)| {
        harness.compare_success(name, candidate.multiply(source.clone()), reference.multiply(source))
      })
      .collect(),
  )
}

pub(super) fn twins(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let fixtures: [Vec<f64>; 5] = [
    vec![1.0, 1.0],
    vec![10.0, 20.0, 10.0],
    vec![10.0, -10.0, 10.0],
    vec![0.0],
    vec![3.5, 42.25],
  ];
  let reference = ReferenceSolutions;

  harness.all_pass(
    fixtures
      .into_iter()
      .enumerate()
      .map(|(index, values)| {
        let source = sequence_stream(scheduler, values, None);
        harness.compare_success(
          format!("Twins {}", index + 1),
          candidate.twins(source.clone()),
          reference.twins(source),
        )
      })
      .collect(),
  )
}
