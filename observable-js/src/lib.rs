//! Push-based observable streams for `ecma-rs` tooling.
//!
//! This crate provides a small reactive core modelled on the Observable contract used by
//! JavaScript stream libraries:
//! - A cold, lazily evaluated stream type ([`Observable`]) whose producer runs once per
//!   subscription
//! - Observer plumbing that enforces the `Next* (Error | Complete)?` grammar ([`Subscriber`],
//!   [`Notification`])
//! - Total, idempotent cancellation ([`Subscription`])
//! - A deterministic single-threaded scheduler with a virtual clock ([`Scheduler`])
//! - The combinators needed to express stream transformations: `map`, `filter`, `scan`,
//!   `reduce`, `pairwise`, `take`, `concat`, `merge`, `zip_with`, `fork_join`, `race`,
//!   `switch_map`, `catch_error`, `delay`, `timeout` and `sequence_equal`
//!
//! # Scheduling
//!
//! Subscribing is the only operation that causes work to be queued; composing observables is
//! synchronous setup. Asynchronous producers queue their emissions on a [`Scheduler`], and nothing
//! happens until the owner drives it:
//!
//! ```
//! use observable_js::{Notification, Observable, Scheduler};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let scheduler = Scheduler::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = seen.clone();
//! Observable::of([1, 2, 3])
//!   .map(|n| n * 10)
//!   .delay(&scheduler, 5)
//!   .subscribe(move |n| {
//!     if let Notification::Next(v) = n {
//!       sink.borrow_mut().push(v);
//!     }
//!   });
//!
//! assert!(seen.borrow().is_empty());
//! scheduler.run_until_idle();
//! assert_eq!(*seen.borrow(), [10, 20, 30]);
//! assert_eq!(scheduler.now(), 5);
//! ```

mod error;
mod observable;
mod operators;
mod scheduler;
mod subscription;

pub use crate::error::StreamError;
pub use crate::observable::Observable;
pub use crate::operators::zip;
pub use crate::scheduler::Scheduler;
pub use crate::scheduler::TaskHandle;
pub use crate::subscription::Notification;
pub use crate::subscription::Subscriber;
pub use crate::subscription::Subscription;
