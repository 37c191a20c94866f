//! A single-threaded, deterministic scheduler with a virtual clock.
//!
//! Two kinds of work are queued:
//! - **microtasks**: run on the next scheduling turn, FIFO, before the clock is allowed to move
//! - **timers**: run once the virtual clock reaches their due time; timers sharing a due time run
//!   in registration order
//!
//! Nothing runs until the owner drives the scheduler with [`Scheduler::run_until_idle`] or
//! [`Scheduler::run_until`]. Time never passes on its own, so timed streams and timeouts are
//! reproducible and instantaneous under test.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

struct Entry {
  task: Task,
  cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct SchedulerState {
  now: u64,
  next_seq: u64,
  microtasks: VecDeque<Entry>,
  // Keyed by `(due, seq)` so equal due times keep registration order.
  timers: BTreeMap<(u64, u64), Entry>,
}

/// Cancellation handle for a queued task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
  cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
  /// Prevent the task from running. Has no effect once the task has run.
  pub fn cancel(&self) {
    self.cancelled.set(true);
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancelled.get()
  }
}

/// Shared handle to a virtual-time scheduler. Clones refer to the same queues and clock.
#[derive(Clone, Default)]
pub struct Scheduler {
  state: Rc<RefCell<SchedulerState>>,
}

impl fmt::Debug for Scheduler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.borrow();
    f.debug_struct("Scheduler")
      .field("now", &state.now)
      .field("microtasks", &state.microtasks.len())
      .field("timers", &state.timers.len())
      .finish()
  }
}

impl Scheduler {
  pub fn new() -> Self {
    Self::default()
  }

  /// Current virtual time.
  pub fn now(&self) -> u64 {
    self.state.borrow().now
  }

  /// Queue `task` for the next scheduling turn.
  pub fn schedule(&self, task: impl FnOnce() + 'static) -> TaskHandle {
    let (entry, handle) = Self::entry(task);
    self.state.borrow_mut().microtasks.push_back(entry);
    handle
  }

  /// Queue `task` to run once `delay` time units have elapsed.
  pub fn schedule_after(&self, delay: u64, task: impl FnOnce() + 'static) -> TaskHandle {
    let (entry, handle) = Self::entry(task);
    let mut state = self.state.borrow_mut();
    let due = state.now.saturating_add(delay);
    let seq = state.next_seq;
    state.next_seq += 1;
    state.timers.insert((due, seq), entry);
    handle
  }

  /// Number of queued tasks, including cancelled ones that have not been discarded yet.
  pub fn pending(&self) -> usize {
    let state = self.state.borrow();
    state.microtasks.len() + state.timers.len()
  }

  pub fn is_idle(&self) -> bool {
    self.pending() == 0
  }

  /// Run queued work until nothing is left, advancing the clock from timer to timer.
  ///
  /// Returns the number of tasks that ran (cancelled tasks are discarded without counting).
  pub fn run_until_idle(&self) -> usize {
    self.drain(None)
  }

  /// Like [`Scheduler::run_until_idle`], but timers due after `deadline` stay queued. The clock
  /// ends at `deadline` if it had not already passed it.
  pub fn run_until(&self, deadline: u64) -> usize {
    let ran = self.drain(Some(deadline));
    let mut state = self.state.borrow_mut();
    if state.now < deadline {
      state.now = deadline;
    }
    ran
  }

  fn entry(task: impl FnOnce() + 'static) -> (Entry, TaskHandle) {
    let cancelled = Rc::new(Cell::new(false));
    (
      Entry {
        task: Box::new(task),
        cancelled: cancelled.clone(),
      },
      TaskHandle { cancelled },
    )
  }

  fn drain(&self, deadline: Option<u64>) -> usize {
    let mut ran = 0;
    // The borrow must be released before the task runs: tasks schedule more work.
    while let Some(entry) = self.pop(deadline) {
      if entry.cancelled.get() {
        continue;
      }
      entry.cancelled.set(true);
      (entry.task)();
      ran += 1;
    }
    tracing::trace!(ran, now = self.now(), "scheduler drained");
    ran
  }

  fn pop(&self, deadline: Option<u64>) -> Option<Entry> {
    let mut state = self.state.borrow_mut();
    if let Some(entry) = state.microtasks.pop_front() {
      return Some(entry);
    }
    loop {
      let (&(due, seq), next) = state.timers.iter().next()?;
      // Cancelled timers must not drag the clock forward.
      if next.cancelled.get() {
        state.timers.remove(&(due, seq));
        continue;
      }
      if deadline.is_some_and(|deadline| due > deadline) {
        return None;
      }
      let entry = state.timers.remove(&(due, seq))?;
      if due > state.now {
        state.now = due;
      }
      return Some(entry);
    }
  }
}
