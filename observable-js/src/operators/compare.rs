use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::Notification;
use crate::Observable;
use crate::Subscriber;

struct Side<T> {
  buffer: VecDeque<T>,
  done: bool,
}

impl<T> Default for Side<T> {
  fn default() -> Self {
    Self {
      buffer: VecDeque::new(),
      done: false,
    }
  }
}

struct SequenceState<T> {
  sides: [Side<T>; 2],
  mismatched: bool,
}

impl<T: 'static> Observable<T> {
  /// Compare `self` and `other` position by position with `comparer`.
  ///
  /// Emits a single `bool` once **both** sides have completed: `true` iff every pair matched and
  /// both sides emitted the same number of values. A mismatch does not end the comparison early.
  /// A failure on either side fails the result.
  pub fn sequence_equal(
    &self,
    other: Observable<T>,
    comparer: impl Fn(&T, &T) -> bool + 'static,
  ) -> Observable<bool> {
    let left = self.clone();
    let comparer: Rc<dyn Fn(&T, &T) -> bool> = Rc::new(comparer);
    Observable::new(move |downstream| {
      let state = Rc::new(RefCell::new(SequenceState {
        sides: [Side::default(), Side::default()],
        mismatched: false,
      }));
      for (index, source) in [&left, &other].into_iter().enumerate() {
        if downstream.is_closed() {
          return;
        }
        let state = state.clone();
        let comparer = comparer.clone();
        let out = downstream.clone();
        source.subscribe_into(&downstream, move |n| match n {
          Notification::Next(value) => {
            let skip = state.borrow().mismatched;
            if !skip {
              state.borrow_mut().sides[index].buffer.push_back(value);
              compare_pending(&state, &*comparer);
            }
          }
          Notification::Error(err) => out.error(err),
          Notification::Complete => {
            state.borrow_mut().sides[index].done = true;
            settle(&state, &out);
          }
        });
      }
    })
  }
}

fn compare_pending<T>(state: &Rc<RefCell<SequenceState<T>>>, comparer: &dyn Fn(&T, &T) -> bool) {
  loop {
    let pair = {
      let mut state = state.borrow_mut();
      let [left, right] = &mut state.sides;
      if left.buffer.is_empty() || right.buffer.is_empty() {
        return;
      }
      left.buffer.pop_front().zip(right.buffer.pop_front())
    };
    let Some((left, right)) = pair else {
      return;
    };
    if !comparer(&left, &right) {
      tracing::trace!("sequence mismatch");
      let mut state = state.borrow_mut();
      state.mismatched = true;
      for side in state.sides.iter_mut() {
        side.buffer.clear();
      }
      return;
    }
  }
}

fn settle<T: 'static>(state: &Rc<RefCell<SequenceState<T>>>, out: &Subscriber<bool>) {
  let verdict = {
    let state = state.borrow();
    if !state.sides.iter().all(|side| side.done) {
      return;
    }
    !state.mismatched && state.sides.iter().all(|side| side.buffer.is_empty())
  };
  out.next(verdict);
  out.complete();
}
