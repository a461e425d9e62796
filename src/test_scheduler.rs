//! Virtual time for deterministic tests.
//!
//! Time is a plain `u64` tick counter that only moves when a test asks it
//! to. Tasks scheduled for the same tick run in the order they were
//! scheduled.
//!
//! ```rust
//! use rxeager::prelude::*;
//! use rxeager::test_scheduler::*;
//!
//! let scheduler = TestScheduler::default();
//! let xs = scheduler.cold_observable(vec![on_next(10, 1), on_next(20, 2), on_completed::<i32, ()>(30)]);
//! let observer = scheduler.create_observer::<i32, ()>();
//! xs.clone().actual_subscribe(observer.clone());
//!
//! scheduler.flush();
//! assert_eq!(observer.messages(), vec![on_next(10, 1), on_next(20, 2), on_completed(30)]);
//! assert_eq!(xs.subscriptions(), vec![SubscriptionLog::closed(0, 30)]);
//! ```
//!
//! The handle is `Send + Sync`, tasks run on the thread that advances the
//! clock and never while the scheduler lock is held, so a task may schedule
//! more tasks.

use parking_lot::Mutex;
use std::{cmp::Ordering, collections::BinaryHeap, sync::Arc};

mod observable;
mod observer;
mod recorded;

pub use observable::*;
pub use observer::*;
pub use recorded::*;

#[derive(Default)]
struct TestSchedulerState {
  now: u64,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: u64,
}

struct ScheduledTask {
  time: u64,
  task_id: u64,
  task: Box<dyn FnOnce() + Send>,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool { self.time == other.time && self.task_id == other.task_id }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .time
      .cmp(&self.time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

/// A cloneable handle to one virtual clock and its task queue.
#[derive(Clone, Default)]
pub struct TestScheduler(Arc<Mutex<TestSchedulerState>>);

impl TestScheduler {
  /// Current virtual time.
  pub fn now(&self) -> u64 { self.0.lock().now }

  /// Number of tasks waiting to run.
  pub fn pending_count(&self) -> usize { self.0.lock().task_queue.len() }

  /// Schedules `task` at an absolute tick. A tick in the past runs on the
  /// next advance.
  pub fn schedule_at(&self, time: u64, task: impl FnOnce() + Send + 'static) {
    let mut state = self.0.lock();
    let task_id = state.next_task_id;
    state.next_task_id += 1;
    let time = time.max(state.now);
    state
      .task_queue
      .push(ScheduledTask { time, task_id, task: Box::new(task) });
  }

  /// Schedules `task` `delay` ticks after now.
  pub fn schedule_after(&self, delay: u64, task: impl FnOnce() + Send + 'static) {
    let time = self.now() + delay;
    self.schedule_at(time, task)
  }

  /// Runs every task due at or before `time`, then sets the clock to `time`.
  /// Never moves the clock backwards.
  pub fn advance_to(&self, time: u64) {
    self.execute_tasks_until(Some(time));
    let mut state = self.0.lock();
    state.now = state.now.max(time);
  }

  pub fn advance_by(&self, delta: u64) {
    let target = self.now() + delta;
    self.advance_to(target)
  }

  /// Runs tasks until the queue is empty, moving the clock to each task's
  /// tick.
  pub fn flush(&self) { self.execute_tasks_until(None) }

  fn execute_tasks_until(&self, target_time: Option<u64>) {
    loop {
      let task = {
        let mut state = self.0.lock();
        let should_stop = state
          .task_queue
          .peek()
          .map_or(true, |peek| target_time.map_or(false, |limit| peek.time > limit));
        if should_stop {
          None
        } else {
          let scheduled = state.task_queue.pop();
          if let Some(scheduled) = scheduled.as_ref() {
            state.now = scheduled.time;
          }
          scheduled
        }
      };

      let Some(scheduled) = task else { break };
      (scheduled.task)();
    }
  }

  /// An observable that replays `messages` for every subscriber, with times
  /// relative to the moment of subscription.
  pub fn cold_observable<Item, Err>(
    &self, messages: Vec<Recorded<Notification<Item, Err>>>,
  ) -> ColdObservable<Item, Err> {
    ColdObservable::new(self.clone(), messages)
  }

  /// An observable that emits `messages` at their absolute times to whoever
  /// is subscribed at that moment.
  pub fn hot_observable<Item, Err>(
    &self, messages: Vec<Recorded<Notification<Item, Err>>>,
  ) -> HotObservable<Item, Err>
  where
    Item: Clone + Send + 'static,
    Err: Clone + Send + 'static,
  {
    HotObservable::new(self.clone(), messages)
  }

  /// An observer that records every notification with the tick it arrived
  /// at.
  pub fn create_observer<Item, Err>(&self) -> TestObserver<Item, Err> {
    TestObserver::new(self.clone())
  }
}
