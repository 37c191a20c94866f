use std::cell::RefCell;
use std::rc::Rc;

use crate::Notification;
use crate::Observable;
use crate::Scheduler;
use crate::StreamError;
use crate::Subscriber;
use crate::TaskHandle;

impl<T: 'static> Observable<T> {
  /// Shift every value and the completion `by` time units later. Failures are not delayed.
  pub fn delay(&self, scheduler: &Scheduler, by: u64) -> Observable<T> {
    let source = self.clone();
    let scheduler = scheduler.clone();
    Observable::new(move |downstream| {
      let scheduler = scheduler.clone();
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Error(err) => out.error(err),
        notification => {
          let target = out.clone();
          let task = scheduler.schedule_after(by, move || target.notify(notification));
          out.add_task(task);
        }
      });
    })
  }

  /// Fail with [`StreamError::Timeout`] when no value arrives within `due` time units of
  /// subscribing, or of the previous value.
  pub fn timeout(&self, scheduler: &Scheduler, due: u64) -> Observable<T> {
    let source = self.clone();
    let scheduler = scheduler.clone();
    Observable::new(move |downstream| {
      let timer: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));
      {
        let timer = timer.clone();
        downstream.add_teardown(move || disarm(&timer));
      }
      arm(&scheduler, due, &downstream, &timer);

      let scheduler = scheduler.clone();
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| {
        disarm(&timer);
        let rearm = matches!(n, Notification::Next(_));
        out.notify(n);
        if rearm && !out.is_closed() {
          arm(&scheduler, due, &out, &timer);
        }
      });
    })
  }
}

fn arm<T: 'static>(
  scheduler: &Scheduler,
  due: u64,
  out: &Subscriber<T>,
  timer: &Rc<RefCell<Option<TaskHandle>>>,
) {
  let target = out.clone();
  let handle = scheduler.schedule_after(due, move || {
    tracing::debug!(due, "stream timed out");
    target.error(StreamError::Timeout { after: due });
  });
  *timer.borrow_mut() = Some(handle);
}

fn disarm(timer: &Rc<RefCell<Option<TaskHandle>>>) {
  let handle = timer.borrow_mut().take();
  if let Some(handle) = handle {
    handle.cancel();
  }
}
