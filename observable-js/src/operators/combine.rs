use std::cell::Cell;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::Notification;
use crate::Observable;
use crate::Subscriber;
use crate::Subscription;

impl<T: 'static> Observable<T> {
  /// Subscribe to each source only after the previous one completed, forwarding every value.
  pub fn concat(sources: Vec<Observable<T>>) -> Observable<T> {
    let sources: Rc<[Observable<T>]> = sources.into();
    Observable::new(move |downstream| concat_from(sources.clone(), 0, downstream))
  }

  pub fn concat_with(&self, other: Observable<T>) -> Observable<T> {
    Observable::concat(vec![self.clone(), other])
  }

  /// Subscribe to every source at once and interleave their values. Completes once all sources
  /// have completed.
  pub fn merge(sources: Vec<Observable<T>>) -> Observable<T> {
    let sources: Rc<[Observable<T>]> = sources.into();
    Observable::new(move |downstream| {
      if sources.is_empty() {
        downstream.complete();
        return;
      }
      let active = Rc::new(Cell::new(sources.len()));
      for source in sources.iter() {
        if downstream.is_closed() {
          return;
        }
        let active = active.clone();
        let out = downstream.clone();
        source.subscribe_into(&downstream, move |n| match n {
          Notification::Next(value) => out.next(value),
          Notification::Error(err) => out.error(err),
          Notification::Complete => {
            active.set(active.get() - 1);
            if active.get() == 0 {
              out.complete();
            }
          }
        });
      }
    })
  }

  pub fn merge_with(&self, other: Observable<T>) -> Observable<T> {
    Observable::merge(vec![self.clone(), other])
  }

  /// Pair the i-th value of `self` with the i-th value of `other`. Completes as soon as one side
  /// has completed and no buffered value of that side is waiting for a partner.
  pub fn zip_with<U: 'static>(&self, other: Observable<U>) -> Observable<(T, U)> {
    let left = self.clone();
    Observable::new(move |downstream| {
      let state = Rc::new(RefCell::new(ZipState::<T, U>::default()));

      let out = downstream.clone();
      let shared = state.clone();
      left.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          let pair = {
            let mut state = shared.borrow_mut();
            match state.right.pop_front() {
              Some(partner) => Some((value, partner)),
              None => {
                state.left.push_back(value);
                None
              }
            }
          };
          emit_pair(&out, &shared, pair);
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => {
          let exhausted = {
            let mut state = shared.borrow_mut();
            state.left_done = true;
            state.left.is_empty()
          };
          if exhausted {
            out.complete();
          }
        }
      });

      let out = downstream.clone();
      let shared = state.clone();
      other.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          let pair = {
            let mut state = shared.borrow_mut();
            match state.left.pop_front() {
              Some(partner) => Some((partner, value)),
              None => {
                state.right.push_back(value);
                None
              }
            }
          };
          emit_pair(&out, &shared, pair);
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => {
          let exhausted = {
            let mut state = shared.borrow_mut();
            state.right_done = true;
            state.right.is_empty()
          };
          if exhausted {
            out.complete();
          }
        }
      });
    })
  }

  /// Wait for every source to complete, then emit their last values together.
  ///
  /// If any source completes without emitting, the result completes without emitting.
  pub fn fork_join(sources: Vec<Observable<T>>) -> Observable<Vec<T>> {
    let sources: Rc<[Observable<T>]> = sources.into();
    Observable::new(move |downstream| {
      if sources.is_empty() {
        downstream.complete();
        return;
      }
      let last: Rc<RefCell<Vec<Option<T>>>> =
        Rc::new(RefCell::new((0..sources.len()).map(|_| None).collect()));
      let remaining = Rc::new(Cell::new(sources.len()));
      for (index, source) in sources.iter().enumerate() {
        if downstream.is_closed() {
          return;
        }
        let last = last.clone();
        let remaining = remaining.clone();
        let out = downstream.clone();
        source.subscribe_into(&downstream, move |n| match n {
          Notification::Next(value) => last.borrow_mut()[index] = Some(value),
          Notification::Error(err) => out.error(err),
          Notification::Complete => {
            if last.borrow()[index].is_none() {
              out.complete();
              return;
            }
            remaining.set(remaining.get() - 1);
            if remaining.get() > 0 {
              return;
            }
            let values: Option<Vec<T>> = last.borrow_mut().iter_mut().map(Option::take).collect();
            if let Some(values) = values {
              out.next(values);
            }
            out.complete();
          }
        });
      }
    })
  }

  /// Mirror whichever source notifies first (value, error or completion) and release the others.
  pub fn race(sources: Vec<Observable<T>>) -> Observable<T> {
    let sources: Rc<[Observable<T>]> = sources.into();
    Observable::new(move |downstream| {
      if sources.is_empty() {
        downstream.complete();
        return;
      }
      let winner: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));
      let contenders: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
      for (index, source) in sources.iter().enumerate() {
        if downstream.is_closed() || winner.get().is_some() {
          return;
        }
        let winner = winner.clone();
        let rivals = contenders.clone();
        let out = downstream.clone();
        let subscription = source.subscribe_into(&downstream, move |n| {
          match winner.get() {
            Some(current) if current != index => return,
            Some(_) => {}
            None => {
              winner.set(Some(index));
              let losers: Vec<Subscription> = rivals
                .borrow()
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .map(|(_, subscription)| subscription.clone())
                .collect();
              tracing::trace!(index, "race won");
              for loser in losers {
                loser.unsubscribe();
              }
            }
          }
          out.notify(n);
        });
        contenders.borrow_mut().push(subscription);
      }
    })
  }
}

/// Pair up two sources; see [`Observable::zip_with`].
pub fn zip<A: 'static, B: 'static>(a: &Observable<A>, b: Observable<B>) -> Observable<(A, B)> {
  a.zip_with(b)
}

struct ZipState<A, B> {
  left: VecDeque<A>,
  right: VecDeque<B>,
  left_done: bool,
  right_done: bool,
}

impl<A, B> Default for ZipState<A, B> {
  fn default() -> Self {
    Self {
      left: VecDeque::new(),
      right: VecDeque::new(),
      left_done: false,
      right_done: false,
    }
  }
}

fn emit_pair<A: 'static, B: 'static>(
  out: &Subscriber<(A, B)>,
  state: &Rc<RefCell<ZipState<A, B>>>,
  pair: Option<(A, B)>,
) {
  let Some(pair) = pair else {
    return;
  };
  out.next(pair);
  let exhausted = {
    let state = state.borrow();
    (state.left_done && state.left.is_empty()) || (state.right_done && state.right.is_empty())
  };
  if exhausted {
    out.complete();
  }
}

fn concat_from<T: 'static>(sources: Rc<[Observable<T>]>, index: usize, downstream: Subscriber<T>) {
  if downstream.is_closed() {
    return;
  }
  let Some(source) = sources.get(index) else {
    downstream.complete();
    return;
  };
  let rest = sources.clone();
  let out = downstream.clone();
  source.subscribe_into(&downstream, move |n| match n {
    Notification::Next(value) => out.next(value),
    Notification::Error(err) => out.error(err),
    Notification::Complete => concat_from(rest.clone(), index + 1, out.clone()),
  });
}
