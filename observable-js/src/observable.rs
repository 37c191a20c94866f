use std::fmt;
use std::rc::Rc;

use crate::subscription::Notification;
use crate::subscription::Subscriber;
use crate::subscription::Subscription;
use crate::StreamError;

/// A cold, lazily evaluated stream of `T`.
///
/// An `Observable` is only a recipe: the producer function runs once per subscription, so every
/// subscriber sees the whole stream from the start and no state is shared between subscriptions.
/// Cloning is cheap and yields the same recipe.
pub struct Observable<T> {
  producer: Rc<dyn Fn(Subscriber<T>)>,
}

impl<T> Clone for Observable<T> {
  fn clone(&self) -> Self {
    Self {
      producer: self.producer.clone(),
    }
  }
}

impl<T> fmt::Debug for Observable<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Observable { .. }")
  }
}

impl<T: 'static> Observable<T> {
  /// Create an observable from a producer function. The producer receives a fresh
  /// [`Subscriber`] for every subscription and is responsible for registering teardowns on it.
  pub fn new(producer: impl Fn(Subscriber<T>) + 'static) -> Self {
    Self {
      producer: Rc::new(producer),
    }
  }

  /// Subscribe with a callback receiving every notification.
  pub fn subscribe(&self, observer: impl Fn(Notification<T>) + 'static) -> Subscription {
    let subscriber = Subscriber::new(observer);
    self.subscribe_with(subscriber.clone());
    subscriber.subscription().clone()
  }

  pub fn subscribe_with(&self, subscriber: Subscriber<T>) {
    if subscriber.is_closed() {
      return;
    }
    (self.producer)(subscriber);
  }

  /// Subscribe on behalf of `downstream`: the upstream subscription is tied to `downstream`'s
  /// lifetime before the producer runs, so a downstream that closes during synchronous emission
  /// also tears down the upstream.
  pub(crate) fn subscribe_into<U: 'static>(
    &self,
    downstream: &Subscriber<U>,
    observer: impl Fn(Notification<T>) + 'static,
  ) -> Subscription {
    let upstream = Subscriber::new(observer);
    downstream.add(upstream.subscription().clone());
    self.subscribe_with(upstream.clone());
    upstream.subscription().clone()
  }

  /// Emits every value synchronously during subscription, then completes.
  pub fn of(values: impl IntoIterator<Item = T>) -> Self
  where
    T: Clone,
  {
    let values: Rc<[T]> = values.into_iter().collect();
    Observable::new(move |subscriber| {
      for value in values.iter() {
        if subscriber.is_closed() {
          return;
        }
        subscriber.next(value.clone());
      }
      subscriber.complete();
    })
  }

  pub fn just(value: T) -> Self
  where
    T: Clone,
  {
    Observable::of([value])
  }

  /// Completes immediately without emitting.
  pub fn empty() -> Self {
    Observable::new(|subscriber| subscriber.complete())
  }

  /// Never emits and never terminates.
  pub fn never() -> Self {
    Observable::new(|_| {})
  }

  /// Fails immediately with `err`.
  pub fn throw(err: StreamError) -> Self {
    Observable::new(move |subscriber| subscriber.error(err.clone()))
  }

  /// Build the actual observable at subscription time.
  pub fn defer(factory: impl Fn() -> Observable<T> + 'static) -> Self {
    Observable::new(move |subscriber| factory().subscribe_with(subscriber))
  }
}
