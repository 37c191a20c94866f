use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use crate::Notification;
use crate::Observable;
use crate::Subscription;

impl<T: 'static> Observable<T> {
  /// Map each value to an inner stream and mirror only the most recent one. The result completes
  /// once the source and the current inner stream have both completed.
  pub fn switch_map<U: 'static>(&self, f: impl Fn(T) -> Observable<U> + 'static) -> Observable<U> {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::new(move |downstream| {
      let f = f.clone();
      let current: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
      let inner_active = Rc::new(Cell::new(false));
      let outer_done = Rc::new(Cell::new(false));
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          let previous = current.borrow_mut().take();
          if let Some(previous) = previous {
            previous.unsubscribe();
          }
          inner_active.set(true);
          let inner_out = out.clone();
          let inner_active = inner_active.clone();
          let outer_done = outer_done.clone();
          let subscription = f(value).subscribe_into(&out, move |n| match n {
            Notification::Next(value) => inner_out.next(value),
            Notification::Error(err) => inner_out.error(err),
            Notification::Complete => {
              inner_active.set(false);
              if outer_done.get() {
                inner_out.complete();
              }
            }
          });
          if !subscription.is_closed() {
            *current.borrow_mut() = Some(subscription);
          }
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => {
          outer_done.set(true);
          if !inner_active.get() {
            out.complete();
          }
        }
      });
    })
  }

  /// Map each value to an inner stream and mirror all of them concurrently.
  pub fn merge_map<U: 'static>(&self, f: impl Fn(T) -> Observable<U> + 'static) -> Observable<U> {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::new(move |downstream| {
      let f = f.clone();
      // The outer stream counts as one active participant until it completes.
      let active = Rc::new(Cell::new(1usize));
      let out = downstream.clone();
      let release = {
        let active = active.clone();
        let out = downstream.clone();
        Rc::new(move || {
          active.set(active.get() - 1);
          if active.get() == 0 {
            out.complete();
          }
        })
      };
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => {
          active.set(active.get() + 1);
          let inner_out = out.clone();
          let release = release.clone();
          f(value).subscribe_into(&out, move |n| match n {
            Notification::Next(value) => inner_out.next(value),
            Notification::Error(err) => inner_out.error(err),
            Notification::Complete => release(),
          });
        }
        Notification::Error(err) => out.error(err),
        Notification::Complete => release(),
      });
    })
  }
}
