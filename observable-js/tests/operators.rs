use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use observable_js::Notification;
use observable_js::Observable;
use observable_js::Scheduler;
use observable_js::StreamError;

type Log<T> = Rc<RefCell<Vec<(u64, Notification<T>)>>>;

fn record<T: 'static>(scheduler: &Scheduler, source: &Observable<T>) -> Log<T> {
  let log: Log<T> = Rc::new(RefCell::new(Vec::new()));
  let sink = log.clone();
  let clock = scheduler.clone();
  source.subscribe(move |n| sink.borrow_mut().push((clock.now(), n)));
  scheduler.run_until_idle();
  log
}

fn values<T: Clone + 'static>(scheduler: &Scheduler, source: &Observable<T>) -> Vec<T> {
  record(scheduler, source)
    .borrow()
    .iter()
    .filter_map(|(_, n)| match n {
      Notification::Next(v) => Some(v.clone()),
      _ => None,
    })
    .collect()
}

/// Emits each `(at, value)` at the given absolute time, then completes with the last one.
fn timed<T: Clone + 'static>(scheduler: &Scheduler, items: &[(u64, T)]) -> Observable<T> {
  let items: Rc<[(u64, T)]> = items.to_vec().into();
  let scheduler = scheduler.clone();
  Observable::new(move |subscriber| {
    let last = items.len();
    if last == 0 {
      subscriber.complete();
      return;
    }
    for (index, (at, value)) in items.iter().enumerate() {
      let target = subscriber.clone();
      let value = value.clone();
      let task = scheduler.schedule_after(*at, move || {
        target.next(value);
        if index + 1 == last {
          target.complete();
        }
      });
      subscriber.add_task(task);
    }
  })
}

#[test]
fn map_filter_and_filter_map() {
  let scheduler = Scheduler::new();
  let source = Observable::of([Some(1), None, Some(4), None, Some(8)]);
  assert_eq!(
    values(&scheduler, &source.filter_map(|x| x.map(|n| n * 10))),
    [10, 40, 80]
  );
  assert_eq!(
    values(
      &scheduler,
      &Observable::of([1, 2, 3, 4]).filter(|n| n % 2 == 0).map(|n| n + 1)
    ),
    [3, 5]
  );
}

#[test]
fn try_map_fails_at_the_offending_value() {
  let scheduler = Scheduler::new();
  let parsed = Observable::of(["1", "x", "3"]).try_map(|s: &str| {
    s.parse::<i32>()
      .map_err(|_| StreamError::thrown(format!("bad number {s}")))
  });
  let log = record(&scheduler, &parsed);
  assert_eq!(
    log.borrow().iter().map(|(_, n)| n.clone()).collect::<Vec<_>>(),
    [
      Notification::Next(1),
      Notification::Error(StreamError::thrown("bad number x"))
    ]
  );
}

#[test]
fn scan_reduce_and_pairwise() {
  let scheduler = Scheduler::new();
  let source = Observable::of([1, 2, 3]);
  assert_eq!(values(&scheduler, &source.scan(0, |a, b| a + b)), [1, 3, 6]);
  assert_eq!(values(&scheduler, &source.reduce(0, |a, b| a + b)), [6]);
  assert_eq!(
    values(&scheduler, &Observable::<i32>::empty().reduce(true, |a, _| a)),
    [true]
  );
  assert_eq!(
    values(&scheduler, &source.start_with([6]).pairwise()),
    [(6, 1), (1, 2), (2, 3)]
  );
}

#[test]
fn take_releases_the_source() {
  let scheduler = Scheduler::new();
  let source = timed(&scheduler, &[(1, 'a'), (2, 'b'), (3, 'c')]);
  let log = record(&scheduler, &source.take(2));
  assert_eq!(
    &*log.borrow(),
    &[
      (1, Notification::Next('a')),
      (2, Notification::Next('b')),
      (2, Notification::Complete)
    ]
  );
  assert!(scheduler.is_idle());
  assert_eq!(values(&scheduler, &source.take(0)), Vec::<char>::new());
}

#[test]
fn concat_subscribes_sequentially() {
  let scheduler = Scheduler::new();
  let second_started_at = Rc::new(Cell::new(None));
  let first = timed(&scheduler, &[(10, 1), (20, 2)]);
  let second = {
    let started = second_started_at.clone();
    let clock = scheduler.clone();
    let inner = timed(&scheduler, &[(5, 3)]);
    Observable::defer(move || {
      started.set(Some(clock.now()));
      inner.clone()
    })
  };

  let log = record(&scheduler, &Observable::concat(vec![first, second]));
  assert_eq!(second_started_at.get(), Some(20));
  assert_eq!(
    &*log.borrow(),
    &[
      (10, Notification::Next(1)),
      (20, Notification::Next(2)),
      (25, Notification::Next(3)),
      (25, Notification::Complete)
    ]
  );
}

#[test]
fn merge_interleaves_by_time_and_waits_for_all() {
  let scheduler = Scheduler::new();
  let a = timed(&scheduler, &[(5, "a1"), (15, "a2")]);
  let b = timed(&scheduler, &[(10, "b1")]);
  let log = record(&scheduler, &a.merge_with(b));
  assert_eq!(
    &*log.borrow(),
    &[
      (5, Notification::Next("a1")),
      (10, Notification::Next("b1")),
      (15, Notification::Next("a2")),
      (15, Notification::Complete)
    ]
  );
}

#[test]
fn zip_pairs_positionally_and_stops_at_the_shorter_side() {
  let scheduler = Scheduler::new();
  let owners = timed(&scheduler, &[(1, "DanTori"), (2, "LeeDani"), (3, "Chritchell")]);
  let pets = timed(&scheduler, &[(5, "Peaches"), (6, "CocoMaya")]);
  let log = record(&scheduler, &owners.zip_with(pets));
  assert_eq!(
    &*log.borrow(),
    &[
      (5, Notification::Next(("DanTori", "Peaches"))),
      (6, Notification::Next(("LeeDani", "CocoMaya"))),
      (6, Notification::Complete)
    ]
  );
}

#[test]
fn fork_join_emits_last_values_once_all_complete() {
  let scheduler = Scheduler::new();
  let joined = Observable::fork_join(vec![
    timed(&scheduler, &[(1, true), (4, false)]),
    timed(&scheduler, &[(2, true)]),
  ]);
  let log = record(&scheduler, &joined);
  assert_eq!(
    &*log.borrow(),
    &[
      (4, Notification::Next(vec![false, true])),
      (4, Notification::Complete)
    ]
  );

  let silent = Observable::fork_join(vec![Observable::just(1), Observable::empty()]);
  assert!(values(&scheduler, &silent).is_empty());
}

#[test]
fn race_mirrors_the_first_to_notify_and_drops_the_rest() {
  let scheduler = Scheduler::new();
  let slow = timed(&scheduler, &[(30, "slow")]);
  let fast = timed(&scheduler, &[(20, "fast"), (40, "fast-again")]);
  let log = record(&scheduler, &Observable::race(vec![slow, fast]));
  assert_eq!(
    &*log.borrow(),
    &[
      (20, Notification::Next("fast")),
      (40, Notification::Next("fast-again")),
      (40, Notification::Complete)
    ]
  );
}

#[test]
fn switch_map_and_merge_map_flatten_inner_streams() {
  let scheduler = Scheduler::new();
  let lines = Observable::of(["a\nb", "c"])
    .switch_map(|text: &str| Observable::of(text.split('\n').map(str::to_owned).collect::<Vec<_>>()));
  assert_eq!(values(&scheduler, &lines), ["a", "b", "c"]);

  let source = timed(&scheduler, &[(0, 1u64), (1, 2u64)]);
  let clock = scheduler.clone();
  let switched = source.switch_map(move |n| timed(&clock, &[(10, n)]));
  assert_eq!(values(&scheduler, &switched), [2]);

  let source = timed(&scheduler, &[(0, 1u64), (1, 2u64)]);
  let clock = scheduler.clone();
  let merged = source.merge_map(move |n| timed(&clock, &[(10, n)]));
  assert_eq!(values(&scheduler, &merged), [1, 2]);
}

#[test]
fn catch_error_continues_with_the_replacement() {
  let scheduler = Scheduler::new();
  let failing = Observable::of([1, 2])
    .concat_with(Observable::throw(StreamError::thrown("boom")));
  assert_eq!(
    values(&scheduler, &failing.catch_error(|_| Observable::of([7, 8]))),
    [1, 2, 7, 8]
  );
  assert_eq!(values(&scheduler, &failing.on_error_return(0)), [1, 2, 0]);
}

#[test]
fn delay_shifts_values_and_completion() {
  let scheduler = Scheduler::new();
  let log = record(&scheduler, &Observable::of([1, 2]).delay(&scheduler, 7));
  assert_eq!(
    &*log.borrow(),
    &[
      (7, Notification::Next(1)),
      (7, Notification::Next(2)),
      (7, Notification::Complete)
    ]
  );
}

#[test]
fn timeout_fails_silent_streams_and_cancels_them() {
  let scheduler = Scheduler::new();
  let log = record(&scheduler, &Observable::<u8>::never().timeout(&scheduler, 1000));
  assert_eq!(
    &*log.borrow(),
    &[(1000, Notification::Error(StreamError::Timeout { after: 1000 }))]
  );

  let late = timed(&scheduler, &[(1500, 1u8)]);
  let start = scheduler.now();
  let log = record(&scheduler, &late.timeout(&scheduler, 1000));
  assert_eq!(log.borrow().len(), 1);
  assert_eq!(log.borrow()[0].0, start + 1000);
  assert!(scheduler.is_idle());
}

#[test]
fn timeout_is_rearmed_by_each_value() {
  let scheduler = Scheduler::new();
  let steady = timed(&scheduler, &[(800, 1), (1600, 2)]);
  assert_eq!(values(&scheduler, &steady.timeout(&scheduler, 1000)), [1, 2]);
}

#[test]
fn sequence_equal_waits_for_both_sides() {
  let scheduler = Scheduler::new();
  let reference = timed(&scheduler, &[(1, 1), (2, 2)]);
  let candidate = timed(&scheduler, &[(3, 1), (9, 2)]);
  let log = record(&scheduler, &reference.sequence_equal(candidate, |a, b| a == b));
  assert_eq!(
    &*log.borrow(),
    &[(9, Notification::Next(true)), (9, Notification::Complete)]
  );
}

#[test]
fn sequence_equal_detects_mismatch_and_length_difference() {
  let scheduler = Scheduler::new();
  let eq = |a: &i32, b: &i32| a == b;
  let differs = Observable::of([1, 2, 3]).sequence_equal(Observable::of([1, 5, 3]), eq);
  assert_eq!(values(&scheduler, &differs), [false]);

  let shorter = Observable::of([1, 2, 3]).sequence_equal(Observable::of([1, 2]), eq);
  assert_eq!(values(&scheduler, &shorter), [false]);

  let both_empty = Observable::<i32>::empty().sequence_equal(Observable::empty(), eq);
  assert_eq!(values(&scheduler, &both_empty), [true]);
}

#[test]
fn sequence_equal_propagates_failures() {
  let scheduler = Scheduler::new();
  let failing = Observable::<i32>::throw(StreamError::thrown("nope"));
  let log = record(
    &scheduler,
    &Observable::of([1]).sequence_equal(failing, |a, b| a == b),
  );
  assert_eq!(
    log.borrow()[0].1,
    Notification::Error(StreamError::thrown("nope"))
  );
}

#[test]
fn every_subscription_replays_the_recipe() {
  let scheduler = Scheduler::new();
  let source = timed(&scheduler, &[(1, 'x'), (2, 'y')]);
  assert_eq!(values(&scheduler, &source), ['x', 'y']);
  assert_eq!(values(&scheduler, &source), ['x', 'y']);
}
