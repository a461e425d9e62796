use super::{Notification, Recorded, TestScheduler};
use crate::{
  observer::Observer,
  rc::{MutArc, RcDeref, RcDerefMut},
};

/// Records every notification together with the virtual tick it arrived at.
/// Clones share the same record.
pub struct TestObserver<Item, Err> {
  scheduler: TestScheduler,
  records: MutArc<Vec<Recorded<Notification<Item, Err>>>>,
}

impl<Item, Err> Clone for TestObserver<Item, Err> {
  fn clone(&self) -> Self {
    TestObserver { scheduler: self.scheduler.clone(), records: self.records.clone() }
  }
}

impl<Item, Err> TestObserver<Item, Err> {
  pub(crate) fn new(scheduler: TestScheduler) -> Self {
    TestObserver { scheduler, records: MutArc::default() }
  }

  fn record(&self, value: Notification<Item, Err>) {
    let time = self.scheduler.now();
    self.records.rc_deref_mut().push(Recorded { time, value });
  }

  pub fn messages(&self) -> Vec<Recorded<Notification<Item, Err>>>
  where
    Item: Clone,
    Err: Clone,
  {
    self.records.rc_deref().clone()
  }

  /// Only the `next` values, without their times.
  pub fn values(&self) -> Vec<Item>
  where
    Item: Clone,
  {
    self
      .records
      .rc_deref()
      .iter()
      .filter_map(|r| match &r.value {
        Notification::Next(v) => Some(v.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn is_terminated(&self) -> bool {
    self
      .records
      .rc_deref()
      .last()
      .map_or(false, |r| !matches!(r.value, Notification::Next(_)))
  }
}

impl<Item, Err> Observer<Item, Err> for TestObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.record(Notification::Next(value)) }

  fn error(self, err: Err) { self.record(Notification::Error(err)) }

  fn complete(self) { self.record(Notification::Completed) }

  fn is_finished(&self) -> bool { self.is_terminated() }
}
