use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::scheduler::TaskHandle;
use crate::StreamError;

/// One signal delivered to an observer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T> {
  Next(T),
  Error(StreamError),
  Complete,
}

impl<T> Notification<T> {
  pub fn is_terminal(&self) -> bool {
    !matches!(self, Notification::Next(_))
  }
}

type Teardown = Box<dyn FnOnce()>;

#[derive(Default)]
struct SubscriptionState {
  closed: Cell<bool>,
  teardowns: RefCell<Vec<Teardown>>,
}

/// Cancellation handle for a running subscription.
///
/// Unsubscribing is idempotent and total: every registered teardown runs exactly once, which in
/// turn releases inner subscriptions and cancels pending scheduler tasks.
#[derive(Clone, Default)]
pub struct Subscription {
  state: Rc<SubscriptionState>,
}

impl fmt::Debug for Subscription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription")
      .field("closed", &self.is_closed())
      .finish()
  }
}

impl Subscription {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_closed(&self) -> bool {
    self.state.closed.get()
  }

  /// Register `teardown` to run on unsubscribe. Runs immediately if already closed.
  pub fn add_teardown(&self, teardown: impl FnOnce() + 'static) {
    if self.is_closed() {
      teardown();
      return;
    }
    self.state.teardowns.borrow_mut().push(Box::new(teardown));
  }

  /// Tie `child` to this subscription's lifetime.
  pub fn add(&self, child: Subscription) {
    if Rc::ptr_eq(&self.state, &child.state) {
      return;
    }
    self.add_teardown(move || child.unsubscribe());
  }

  /// Cancel `task` when this subscription closes.
  pub fn add_task(&self, task: TaskHandle) {
    self.add_teardown(move || task.cancel());
  }

  pub fn unsubscribe(&self) {
    if self.state.closed.replace(true) {
      return;
    }
    let teardowns = std::mem::take(&mut *self.state.teardowns.borrow_mut());
    for teardown in teardowns {
      teardown();
    }
  }
}

/// The producer-facing end of a subscription.
///
/// Enforces the stream grammar `Next* (Error | Complete)?`: once a terminal notification has been
/// delivered, or the subscription has been cancelled, further notifications are dropped. Delivering
/// a terminal notification closes the underlying [`Subscription`].
pub struct Subscriber<T> {
  sink: Rc<dyn Fn(Notification<T>)>,
  stopped: Rc<Cell<bool>>,
  subscription: Subscription,
}

impl<T> Clone for Subscriber<T> {
  fn clone(&self) -> Self {
    Self {
      sink: self.sink.clone(),
      stopped: self.stopped.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<T> fmt::Debug for Subscriber<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscriber")
      .field("stopped", &self.stopped.get())
      .field("subscription", &self.subscription)
      .finish()
  }
}

impl<T: 'static> Subscriber<T> {
  pub fn new(sink: impl Fn(Notification<T>) + 'static) -> Self {
    Self {
      sink: Rc::new(sink),
      stopped: Rc::new(Cell::new(false)),
      subscription: Subscription::new(),
    }
  }

  pub fn is_closed(&self) -> bool {
    self.stopped.get() || self.subscription.is_closed()
  }

  pub fn subscription(&self) -> &Subscription {
    &self.subscription
  }

  pub fn next(&self, value: T) {
    if self.is_closed() {
      return;
    }
    (self.sink)(Notification::Next(value));
  }

  pub fn error(&self, err: StreamError) {
    self.terminate(Notification::Error(err));
  }

  pub fn complete(&self) {
    self.terminate(Notification::Complete);
  }

  pub fn notify(&self, notification: Notification<T>) {
    match notification {
      Notification::Next(value) => self.next(value),
      terminal => self.terminate(terminal),
    }
  }

  pub fn add(&self, child: Subscription) {
    self.subscription.add(child);
  }

  pub fn add_teardown(&self, teardown: impl FnOnce() + 'static) {
    self.subscription.add_teardown(teardown);
  }

  pub fn add_task(&self, task: TaskHandle) {
    self.subscription.add_task(task);
  }

  pub fn unsubscribe(&self) {
    self.subscription.unsubscribe();
  }

  fn terminate(&self, notification: Notification<T>) {
    if self.subscription.is_closed() || self.stopped.replace(true) {
      return;
    }
    (self.sink)(notification);
    self.subscription.unsubscribe();
  }
}
