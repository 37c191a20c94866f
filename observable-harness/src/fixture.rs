//! Reproducible input streams built from literal values.
//!
//! Every fixture is a recipe: nothing is scheduled until it is subscribed, and each subscription
//! replays the values from the start.

use observable_js::Observable;
use observable_js::Scheduler;
use observable_js::StreamError;
use observable_js::Subscriber;
use std::rc::Rc;

/// Emits `value` once on the next scheduling turn, then completes.
pub fn point_stream<T: Clone + 'static>(scheduler: &Scheduler, value: T) -> Observable<T> {
  sequence_stream(scheduler, vec![value], None)
}

/// Emits `values` in order, then completes together with the last one.
///
/// Without a delay (or with a negative one) every value gets its own scheduling turn, back to back
/// at the current time. With a delay `d`, the value at index `i` arrives `d * (i + 1)` time units
/// after subscription. An empty fixture completes immediately.
pub fn sequence_stream<T: Clone + 'static>(
  scheduler: &Scheduler,
  values: Vec<T>,
  delay: Option<i64>,
) -> Observable<T> {
  let values: Rc<[T]> = values.into();
  let scheduler = scheduler.clone();
  let spacing = delay.and_then(|d| u64::try_from(d).ok());
  Observable::new(move |subscriber| {
    if values.is_empty() {
      subscriber.complete();
      return;
    }
    emit_from(&scheduler, values.clone(), 0, spacing, subscriber);
  })
}

fn emit_from<T: Clone + 'static>(
  scheduler: &Scheduler,
  values: Rc<[T]>,
  index: usize,
  spacing: Option<u64>,
  subscriber: Subscriber<T>,
) {
  let target = subscriber.clone();
  let clock = scheduler.clone();
  let task = move || {
    target.next(values[index].clone());
    if index + 1 == values.len() {
      target.complete();
    } else {
      emit_from(&clock, values, index + 1, spacing, target);
    }
  };
  let handle = match spacing {
    Some(delay) => scheduler.schedule_after(delay, task),
    None => scheduler.schedule(task),
  };
  subscriber.add_task(handle);
}

/// Fail `stream` with `message` at the first value matching `predicate`.
pub fn failing_at<T: 'static>(
  stream: Observable<T>,
  predicate: impl Fn(&T) -> bool + 'static,
  message: impl Into<String>,
) -> Observable<T> {
  let message = message.into();
  stream.try_map(move |value| {
    if predicate(&value) {
      Err(StreamError::thrown(message.clone()))
    } else {
      Ok(value)
    }
  })
}
