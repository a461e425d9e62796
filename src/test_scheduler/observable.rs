use super::{Notification, Recorded, SubscriptionLog, TestScheduler};
use crate::{
  prelude::*,
  rc::{MutArc, RcDeref, RcDerefMut},
};
use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

/// Replays a script for every subscriber, times relative to the subscribe
/// tick.
pub struct ColdObservable<Item, Err> {
  scheduler: TestScheduler,
  messages: Arc<Vec<Recorded<Notification<Item, Err>>>>,
  logs: MutArc<Vec<SubscriptionLog>>,
}

/// Plays a script once, at absolute times, to whoever is subscribed.
pub struct HotObservable<Item, Err> {
  subject: Subject<Item, Err>,
  scheduler: TestScheduler,
  logs: MutArc<Vec<SubscriptionLog>>,
}

impl<Item, Err> Clone for ColdObservable<Item, Err> {
  fn clone(&self) -> Self {
    ColdObservable {
      scheduler: self.scheduler.clone(),
      messages: self.messages.clone(),
      logs: self.logs.clone(),
    }
  }
}

impl<Item, Err> Clone for HotObservable<Item, Err> {
  fn clone(&self) -> Self {
    HotObservable {
      subject: self.subject.clone(),
      scheduler: self.scheduler.clone(),
      logs: self.logs.clone(),
    }
  }
}

impl<Item, Err> ColdObservable<Item, Err> {
  pub(crate) fn new(
    scheduler: TestScheduler, messages: Vec<Recorded<Notification<Item, Err>>>,
  ) -> Self {
    ColdObservable { scheduler, messages: Arc::new(messages), logs: MutArc::default() }
  }

  /// Every subscription made so far, in subscribe order.
  pub fn subscriptions(&self) -> Vec<SubscriptionLog> { self.logs.rc_deref().clone() }

  pub fn messages(&self) -> &[Recorded<Notification<Item, Err>>] { &self.messages }
}

impl<Item, Err> HotObservable<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  pub(crate) fn new(
    scheduler: TestScheduler, messages: Vec<Recorded<Notification<Item, Err>>>,
  ) -> Self {
    let subject = Subject::default();
    for Recorded { time, value } in messages {
      let mut subject = subject.clone();
      scheduler.schedule_at(time, move || match value {
        Notification::Next(v) => subject.next(v),
        Notification::Error(e) => subject.error(e),
        Notification::Completed => subject.complete(),
      });
    }
    HotObservable { subject, scheduler, logs: MutArc::default() }
  }
}

impl<Item, Err> HotObservable<Item, Err> {
  pub fn subscriptions(&self) -> Vec<SubscriptionLog> { self.logs.rc_deref().clone() }
}

impl<Item, Err, O> Observable<Item, Err, O> for ColdObservable<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  type Unsub = TestSubscription<()>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let recorder = SubscriptionRecorder::start(&self.scheduler, &self.logs);
    let observer = MutArc::own(Some(RecordingObserver { observer, recorder: recorder.clone() }));
    for Recorded { time, value } in self.messages.iter().cloned() {
      let recorder = recorder.clone();
      let mut observer = observer.clone();
      self.scheduler.schedule_after(time, move || {
        if recorder.is_closed() {
          return;
        }
        match value {
          Notification::Next(v) => observer.next(v),
          Notification::Error(e) => observer.error(e),
          Notification::Completed => observer.complete(),
        }
      });
    }
    TestSubscription { recorder, inner: () }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for ColdObservable<Item, Err> {}

impl<Item, Err, O> Observable<Item, Err, O> for HotObservable<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  type Unsub = TestSubscription<SubjectSubscription<Item, Err>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let recorder = SubscriptionRecorder::start(&self.scheduler, &self.logs);
    let inner = self
      .subject
      .actual_subscribe(RecordingObserver { observer, recorder: recorder.clone() });
    TestSubscription { recorder, inner }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for HotObservable<Item, Err> {}

#[derive(Clone)]
struct SubscriptionRecorder {
  scheduler: TestScheduler,
  logs: MutArc<Vec<SubscriptionLog>>,
  index: usize,
  closed: Arc<AtomicBool>,
}

impl SubscriptionRecorder {
  fn start(scheduler: &TestScheduler, logs: &MutArc<Vec<SubscriptionLog>>) -> Self {
    let mut list = logs.rc_deref_mut();
    list.push(SubscriptionLog::open(scheduler.now()));
    SubscriptionRecorder {
      scheduler: scheduler.clone(),
      logs: logs.clone(),
      index: list.len() - 1,
      closed: Arc::new(AtomicBool::new(false)),
    }
  }

  fn close(&self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      let now = self.scheduler.now();
      if let Some(log) = self.logs.rc_deref_mut().get_mut(self.index) {
        log.unsubscribed = Some(now);
      }
    }
  }

  fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }
}

/// Ends the subscription log entry when the source terminates by itself.
struct RecordingObserver<O> {
  observer: O,
  recorder: SubscriptionRecorder,
}

impl<Item, Err, O> Observer<Item, Err> for RecordingObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) {
    self.recorder.close();
    self.observer.error(err)
  }

  fn complete(self) {
    self.recorder.close();
    self.observer.complete()
  }

  fn is_finished(&self) -> bool { self.recorder.is_closed() || self.observer.is_finished() }
}

/// Handle returned by the test observables, unsubscribing stamps the log.
pub struct TestSubscription<U> {
  recorder: SubscriptionRecorder,
  inner: U,
}

impl<U: Subscription> Subscription for TestSubscription<U> {
  fn unsubscribe(self) {
    self.recorder.close();
    self.inner.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.recorder.is_closed() }
}
