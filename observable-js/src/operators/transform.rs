use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use crate::Notification;
use crate::Observable;
use crate::StreamError;

impl<T: 'static> Observable<T> {
  pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Observable<U> {
    self.try_map(move |value| Ok(f(value)))
  }

  /// Like [`Observable::map`], but an `Err` from `f` fails the stream.
  pub fn try_map<U: 'static>(
    &self,
    f: impl Fn(T) -> Result<U, StreamError> + 'static,
  ) -> Observable<U> {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::new(move |downstream| {
      let f = f.clone();
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => match f(value) {
          Ok(mapped) => out.next(mapped),
          Err(err) => out.error(err),
        },
        Notification::Error(err) => out.error(err),
        Notification::Complete => out.complete(),
      });
    })
  }

  pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Observable<T> {
    self.filter_map(move |value| predicate(&value).then_some(value))
  }

  /// Map and drop `None`s in one step.
  pub fn filter_map<U: 'static>(&self, f: impl Fn(T) -> Option<U> + 'static) -> Observable<U> {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::new(move |downstream| {
      let f = f.clone();
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          if let Some(mapped) = f(value) {
            out.next(mapped);
          }
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => out.complete(),
      });
    })
  }

  /// Emit every intermediate accumulator, starting from `seed`.
  pub fn scan<A: Clone + 'static>(
    &self,
    seed: A,
    f: impl Fn(A, T) -> A + 'static,
  ) -> Observable<A> {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::new(move |downstream| {
      let f = f.clone();
      let acc = RefCell::new(seed.clone());
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          let current = acc.borrow().clone();
          let next = f(current, value);
          *acc.borrow_mut() = next.clone();
          out.next(next);
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => out.complete(),
      });
    })
  }

  /// Fold the whole stream into one value, emitted on completion. An empty source emits `seed`.
  pub fn reduce<A: Clone + 'static>(
    &self,
    seed: A,
    f: impl Fn(A, T) -> A + 'static,
  ) -> Observable<A> {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::new(move |downstream| {
      let f = f.clone();
      let acc = RefCell::new(Some(seed.clone()));
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          let current = acc.borrow_mut().take();
          if let Some(current) = current {
            *acc.borrow_mut() = Some(f(current, value));
          }
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => {
          let result = acc.borrow_mut().take();
          if let Some(result) = result {
            out.next(result);
          }
          out.complete();
        }
      });
    })
  }

  /// Emit `(previous, current)` for every value after the first.
  pub fn pairwise(&self) -> Observable<(T, T)>
  where
    T: Clone,
  {
    let source = self.clone();
    Observable::new(move |downstream| {
      let previous: RefCell<Option<T>> = RefCell::new(None);
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          let last = previous.replace(Some(value.clone()));
          if let Some(last) = last {
            out.next((last, value));
          }
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => out.complete(),
      });
    })
  }

  /// Synchronously emit `values` before the source's own values.
  pub fn start_with(&self, values: impl IntoIterator<Item = T>) -> Observable<T>
  where
    T: Clone,
  {
    Observable::concat(vec![Observable::of(values), self.clone()])
  }

  /// Emit the first `count` values, then complete and release the source.
  pub fn take(&self, count: usize) -> Observable<T> {
    let source = self.clone();
    Observable::new(move |downstream| {
      if count == 0 {
        downstream.complete();
        return;
      }
      let seen = Cell::new(0usize);
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          seen.set(seen.get() + 1);
          out.next(value);
          if seen.get() >= count {
            out.complete();
          }
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => out.complete(),
      });
    })
  }

  /// Observe every notification without altering the stream.
  pub fn tap(&self, observer: impl Fn(&Notification<T>) + 'static) -> Observable<T> {
    let source = self.clone();
    let observer = Rc::new(observer);
    Observable::new(move |downstream| {
      let observer = observer.clone();
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| {
        observer(&n);
        out.notify(n);
      });
    })
  }
}
