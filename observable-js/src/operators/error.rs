use std::rc::Rc;

use crate::Notification;
use crate::Observable;
use crate::StreamError;

impl<T: 'static> Observable<T> {
  /// On failure, continue with the stream returned by `handler` instead.
  pub fn catch_error(&self, handler: impl Fn(StreamError) -> Observable<T> + 'static) -> Observable<T> {
    let source = self.clone();
    let handler = Rc::new(handler);
    Observable::new(move |downstream| {
      let handler = handler.clone();
      let out = downstream.clone();
      source.subscribe_into(&downstream, move |n| match n {
        Notification::Next(value) => out.next(value),
        Notification::Error(err) => {
          tracing::debug!(%err, "recovering from stream failure");
          let out_inner = out.clone();
          handler(err).subscribe_into(&out, move |n| out_inner.notify(n));
        }
        Notification::Complete => out.complete(),
      });
    })
  }

  /// Replace a failure with a single `value`, then complete.
  pub fn on_error_return(&self, value: T) -> Observable<T>
  where
    T: Clone,
  {
    self.catch_error(move |_| Observable::just(value.clone()))
  }
}
