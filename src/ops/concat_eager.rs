//! Eager, order preserving concatenation.
//!
//! Inner observables are subscribed as soon as they arrive (up to
//! `max_concurrency` at a time), but their values are only forwarded once
//! every inner observable that arrived earlier has completed. Values from
//! later sources wait in a per source lock-free buffer until their turn.
//!
//! All downstream notifications are produced by a single drain loop that is
//! entered through an atomic work counter, so notifications coming from
//! different threads, or reentrantly from downstream, never overlap.

use crate::prelude::*;
use std::{marker::PhantomData, sync::Arc};

mod disposal;
mod drain;
mod errors;
mod gate;
mod holder;

use disposal::DisposeOnUnsubscribe;
use drain::{Arrival, ConcatEagerState};
pub use errors::{DelayErrors, ErrorMode, FailFast};
pub use gate::MaxConcurrency;
use holder::InnerHolder;
pub use holder::InnerObserver;

/// Maps every item of `source` to an inner observable with `selector` and
/// concatenates the inner observables eagerly. `M` is [`FailFast`] or
/// [`DelayErrors`].
pub struct ConcatEagerOp<S, F, T, Inner, Err, M> {
  source: S,
  selector: F,
  max_concurrency: MaxConcurrency,
  _hint: PhantomData<fn() -> (T, Inner, Err, M)>,
}

/// [`ConcatEagerOp`] over a source that already emits observables.
pub type ConcatAllEagerOp<S, Inner, Err, M> =
  ConcatEagerOp<S, fn(Inner) -> Result<Inner, Err>, Inner, Inner, Err, M>;

impl<S, F, T, Inner, Err, M> ConcatEagerOp<S, F, T, Inner, Err, M> {
  #[inline]
  pub(crate) fn new(source: S, selector: F, max_concurrency: MaxConcurrency) -> Self {
    ConcatEagerOp { source, selector, max_concurrency, _hint: PhantomData }
  }
}

impl<S, F, T, Inner, Err, M> Clone for ConcatEagerOp<S, F, T, Inner, Err, M>
where
  S: Clone,
  F: Clone,
{
  fn clone(&self) -> Self {
    ConcatEagerOp {
      source: self.source.clone(),
      selector: self.selector.clone(),
      max_concurrency: self.max_concurrency,
      _hint: PhantomData,
    }
  }
}

impl<S, F, T, Inner, Item, Err, M, O> Observable<Item, M::Output, O>
  for ConcatEagerOp<S, F, T, Inner, Err, M>
where
  M: ErrorMode<Err>,
  O: Observer<Item, M::Output> + Send + 'static,
  S: Observable<T, Err, OuterObserver<F, Inner, O, Item, Err, M>>,
  S::Unsub: Send + 'static,
  F: FnMut(T) -> Result<Inner, Err>,
  Inner: Observable<Item, Err, InnerObserver<O, Item, Err, M>> + Send + 'static,
  Inner::Unsub: Send + 'static,
  Item: Send + 'static,
  Err: Send + 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let state = Arc::new(ConcatEagerState::new(
      observer,
      self.max_concurrency,
      subscription.clone(),
    ));
    subscription.append(BoxSubscription::new(DisposeOnUnsubscribe::new(state.clone())));

    let outer = OuterObserver {
      state,
      selector: self.selector,
      next_index: 0,
      _hint: PhantomData,
    };
    let unsub = self.source.actual_subscribe(outer);
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<S, F, T, Inner, Item, Err, M> ObservableExt<Item, M::Output>
  for ConcatEagerOp<S, F, T, Inner, Err, M>
where
  M: ErrorMode<Err>,
  S: ObservableExt<T, Err>,
  F: FnMut(T) -> Result<Inner, Err>,
  Inner: ObservableExt<Item, Err>,
{
}

/// Observer of the outer source: turns every item into an inner observable
/// and queues it for the drain.
pub struct OuterObserver<F, Inner, O, Item, Err, M> {
  state: Arc<ConcatEagerState<O, Item, Err, M>>,
  selector: F,
  next_index: usize,
  _hint: PhantomData<fn(Inner)>,
}

impl<T, F, Inner, O, Item, Err, M> Observer<T, Err> for OuterObserver<F, Inner, O, Item, Err, M>
where
  M: ErrorMode<Err>,
  O: Observer<Item, M::Output> + Send + 'static,
  F: FnMut(T) -> Result<Inner, Err>,
  Inner: Observable<Item, Err, InnerObserver<O, Item, Err, M>> + Send + 'static,
  Inner::Unsub: Send + 'static,
  Item: Send + 'static,
  Err: Send + 'static,
{
  fn next(&mut self, value: T) {
    if self.state.is_disposed() {
      return;
    }
    let index = self.next_index;
    self.next_index += 1;
    match (self.selector)(value) {
      Ok(inner) => {
        let arrival = Arrival {
          holder: Arc::new(InnerHolder::new(index)),
          subscribe: Box::new(move |observer: InnerObserver<O, Item, Err, M>| {
            BoxSubscription::new(inner.actual_subscribe(observer))
          }),
        };
        self.state.arrive(arrival);
      }
      Err(err) => {
        tracing::debug!(index, "concat_eager selector failed");
        self.state.errors.record(err);
        self.state.signal();
      }
    }
  }

  fn error(self, err: Err) {
    if self.state.is_disposed() {
      return;
    }
    self.state.errors.record(err);
    self.state.outer_finished();
  }

  fn complete(self) {
    if self.state.is_disposed() {
      return;
    }
    self.state.outer_finished();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.state.is_disposed() }
}

#[cfg(test)]
mod test {
  use crate::{prelude::*, test_scheduler::*};
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  type Messages = Vec<Recorded<Notification<i32, &'static str>>>;

  fn xs1(scheduler: &TestScheduler) -> ColdObservable<i32, &'static str> {
    scheduler.cold_observable(vec![on_next(10, 1), on_next(20, 2), on_next(30, 3), on_completed(40)])
  }

  fn xs2(scheduler: &TestScheduler) -> ColdObservable<i32, &'static str> {
    scheduler.cold_observable(vec![on_next(10, 4), on_next(20, 5), on_completed(30)])
  }

  fn xs3(scheduler: &TestScheduler) -> ColdObservable<i32, &'static str> {
    scheduler.cold_observable(vec![
      on_next(10, 6),
      on_next(20, 7),
      on_next(30, 8),
      on_next(40, 9),
      on_completed(50),
    ])
  }

  /// Emits every source at the subscribe tick, then completes.
  fn outer_of(
    scheduler: &TestScheduler, sources: &[ColdObservable<i32, &'static str>],
  ) -> ColdObservable<ColdObservable<i32, &'static str>, &'static str> {
    let mut messages: Vec<_> = sources.iter().map(|s| on_next(0, s.clone())).collect();
    messages.push(on_completed(0));
    scheduler.cold_observable(messages)
  }

  fn bounded(max: usize) -> MaxConcurrency {
    MaxConcurrency::bounded(max).expect("non zero concurrency")
  }

  #[rxeager_macro::test]
  fn unbounded_prefetches_every_source() {
    let scheduler = TestScheduler::default();
    let (a, b, c) = (xs1(&scheduler), xs2(&scheduler), xs3(&scheduler));
    let observer = scheduler.create_observer::<i32, &'static str>();

    outer_of(&scheduler, &[a.clone(), b.clone(), c.clone()])
      .concat_map_eager(MaxConcurrency::Unbounded, Ok)
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let expected: Messages = vec![
      on_next(10, 1),
      on_next(20, 2),
      on_next(30, 3),
      on_next(40, 4),
      on_next(40, 5),
      on_next(40, 6),
      on_next(40, 7),
      on_next(40, 8),
      on_next(40, 9),
      on_completed(50),
    ];
    assert_eq!(observer.messages(), expected);
    assert_eq!(a.subscriptions(), vec![SubscriptionLog::closed(0, 40)]);
    assert_eq!(b.subscriptions(), vec![SubscriptionLog::closed(0, 30)]);
    assert_eq!(c.subscriptions(), vec![SubscriptionLog::closed(0, 50)]);
  }

  #[rxeager_macro::test]
  fn max_one_subscribes_sequentially() {
    let scheduler = TestScheduler::default();
    let (a, b, c) = (xs1(&scheduler), xs2(&scheduler), xs3(&scheduler));
    let observer = scheduler.create_observer::<i32, &'static str>();

    outer_of(&scheduler, &[a.clone(), b.clone(), c.clone()])
      .concat_map_eager(bounded(1), Ok)
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let expected: Messages = vec![
      on_next(10, 1),
      on_next(20, 2),
      on_next(30, 3),
      on_next(50, 4),
      on_next(60, 5),
      on_next(80, 6),
      on_next(90, 7),
      on_next(100, 8),
      on_next(110, 9),
      on_completed(120),
    ];
    assert_eq!(observer.messages(), expected);
    assert_eq!(a.subscriptions(), vec![SubscriptionLog::closed(0, 40)]);
    assert_eq!(b.subscriptions(), vec![SubscriptionLog::closed(40, 70)]);
    assert_eq!(c.subscriptions(), vec![SubscriptionLog::closed(70, 120)]);
  }

  #[rxeager_macro::test]
  fn max_one_delay_error_surfaces_failure_last() {
    let scheduler = TestScheduler::default();
    let a = xs1(&scheduler);
    let failing = scheduler.cold_observable(vec![on_next(10, 4), on_error(15, "xs2 failed")]);
    let c = xs3(&scheduler);
    let observer = scheduler.create_observer::<i32, CompositeError<&'static str>>();

    outer_of(&scheduler, &[a.clone(), failing.clone(), c.clone()])
      .concat_map_eager_delay_error(bounded(1), Ok)
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let error = CompositeError::from_errors(vec!["xs2 failed"]).expect("one error");
    assert_eq!(
      observer.messages(),
      vec![
        on_next(10, 1),
        on_next(20, 2),
        on_next(30, 3),
        on_next(50, 4),
        on_next(65, 6),
        on_next(75, 7),
        on_next(85, 8),
        on_next(95, 9),
        on_error(105, error),
      ]
    );
    assert_eq!(failing.subscriptions(), vec![SubscriptionLog::closed(40, 55)]);
    assert_eq!(c.subscriptions(), vec![SubscriptionLog::closed(55, 105)]);
  }

  #[rxeager_macro::test]
  fn selector_failure_fails_fast() {
    let scheduler = TestScheduler::default();
    let (a, b, c) = (xs1(&scheduler), xs2(&scheduler), xs3(&scheduler));
    let observer = scheduler.create_observer::<i32, &'static str>();
    let calls = Arc::new(AtomicUsize::new(0));
    let c_calls = calls.clone();

    outer_of(&scheduler, &[a.clone(), b.clone(), c.clone()])
      .concat_map_eager(MaxConcurrency::Unbounded, move |xs| {
        if c_calls.fetch_add(1, Ordering::Relaxed) == 1 {
          Err("selector failed")
        } else {
          Ok(xs)
        }
      })
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let expected: Messages = vec![on_error(0, "selector failed")];
    assert_eq!(observer.messages(), expected);
    // The outer stops at the first failure.
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(a.subscriptions(), vec![SubscriptionLog::closed(0, 0)]);
    assert!(b.subscriptions().is_empty());
    assert!(c.subscriptions().is_empty());
  }

  #[rxeager_macro::test]
  fn order_is_independent_of_concurrency() {
    let expected: Vec<i32> = (0..40).collect();
    let limits = (1..=8).map(bounded).chain(Some(MaxConcurrency::Unbounded));
    for max in limits {
      let scheduler = TestScheduler::default();
      let sources: Vec<_> = (0..8)
        .map(|i: i32| {
          // Later sources tick faster so they finish first.
          let step = 8 - i as u64;
          let mut messages: Messages =
            (0..5).map(|j| on_next(step * (j as u64 + 1), i * 5 + j)).collect();
          messages.push(on_completed(step * 6));
          scheduler.cold_observable(messages)
        })
        .collect();
      let observer = scheduler.create_observer::<i32, &'static str>();

      outer_of(&scheduler, &sources)
        .concat_eager(max)
        .actual_subscribe(observer.clone());
      scheduler.flush();

      assert_eq!(observer.values(), expected, "max_concurrency = {max}");
      assert!(observer.is_terminated());

      // Never more than `max` sources open at the same tick.
      if let Some(limit) = max.limit() {
        let logs: Vec<_> = sources.iter().flat_map(|s| s.subscriptions()).collect();
        for log in &logs {
          let open = logs
            .iter()
            .filter(|other| {
              other.subscribed <= log.subscribed
                && other.unsubscribed.map_or(true, |end| end > log.subscribed)
            })
            .count();
          assert!(open <= limit, "{open} sources open with max_concurrency = {limit}");
        }
      }
    }
  }

  #[rxeager_macro::test]
  fn completes_only_after_outer_completes() {
    let scheduler = TestScheduler::default();
    let outer = scheduler.hot_observable(vec![on_next(5, xs2(&scheduler)), on_completed(100)]);
    let observer = scheduler.create_observer::<i32, &'static str>();

    outer
      .concat_eager(bounded(2))
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let expected: Messages = vec![on_next(15, 4), on_next(25, 5), on_completed(100)];
    assert_eq!(observer.messages(), expected);
  }

  #[rxeager_macro::test]
  fn empty_outer_completes_immediately() {
    let completed = Arc::new(AtomicUsize::new(0));
    let c_completed = completed.clone();
    observable::empty::<observable::ObservableOf<i32>>()
      .concat_eager(MaxConcurrency::Unbounded)
      .subscribe_all(
        |_| unreachable!(),
        |_| unreachable!(),
        move || {
          c_completed.fetch_add(1, Ordering::Relaxed);
        },
      );
    assert_eq!(completed.load(Ordering::Relaxed), 1);
  }

  #[rxeager_macro::test]
  fn inner_error_fails_fast_and_cancels_the_rest() {
    let scheduler = TestScheduler::default();
    let a = xs1(&scheduler);
    let failing = scheduler.cold_observable(vec![on_next(5, 4), on_error(15, "boom")]);
    let c = xs3(&scheduler);
    let observer = scheduler.create_observer::<i32, &'static str>();

    outer_of(&scheduler, &[a.clone(), failing.clone(), c.clone()])
      .concat_eager(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.flush();

    // 4 is buffered behind xs1 and never delivered.
    let expected: Messages = vec![on_next(10, 1), on_error(15, "boom")];
    assert_eq!(observer.messages(), expected);
    assert_eq!(a.subscriptions(), vec![SubscriptionLog::closed(0, 15)]);
    assert_eq!(failing.subscriptions(), vec![SubscriptionLog::closed(0, 15)]);
    assert_eq!(c.subscriptions(), vec![SubscriptionLog::closed(0, 15)]);
  }

  #[rxeager_macro::test]
  fn outer_error_fails_fast() {
    let scheduler = TestScheduler::default();
    let a = xs1(&scheduler);
    let outer = scheduler.hot_observable(vec![on_next(0, a.clone()), on_error(25, "outer")]);
    let observer = scheduler.create_observer::<i32, &'static str>();

    outer
      .clone()
      .concat_eager(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let expected: Messages = vec![on_next(10, 1), on_next(20, 2), on_error(25, "outer")];
    assert_eq!(observer.messages(), expected);
    assert_eq!(a.subscriptions(), vec![SubscriptionLog::closed(0, 25)]);
    assert_eq!(outer.subscriptions(), vec![SubscriptionLog::closed(0, 25)]);
  }

  #[rxeager_macro::test]
  fn delay_error_collects_every_failure_in_order() {
    let scheduler = TestScheduler::default();
    let first = scheduler.cold_observable(vec![on_next(10, 1), on_error(30, "first")]);
    let second = scheduler.cold_observable(vec![on_next(5, 2), on_error(20, "second")]);
    let third = xs2(&scheduler);
    let outer = scheduler.hot_observable(vec![
      on_next(0, first),
      on_next(0, second),
      on_next(0, third),
      on_error(35, "outer"),
    ]);
    let observer = scheduler.create_observer::<i32, CompositeError<&'static str>>();

    outer
      .concat_eager_delay_error(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let messages = observer.messages();
    assert_eq!(observer.values(), vec![1, 2, 4, 5]);
    let last = messages.last().expect("terminal notification");
    assert_eq!(last.time, 35);
    let Notification::Error(error) = &last.value else {
      panic!("expected an error, got {:?}", last.value)
    };
    assert_eq!(error.errors(), &["second", "first", "outer"]);
  }

  #[rxeager_macro::test]
  fn delay_error_selector_failure_skips_the_source() {
    let scheduler = TestScheduler::default();
    let outer = scheduler.cold_observable(vec![
      on_next(0, 0),
      on_next(0, 1),
      on_next(0, 2),
      on_next(0, 3),
      on_completed::<_, &'static str>(0),
    ]);
    let observer = scheduler.create_observer::<i32, CompositeError<&'static str>>();

    let c_scheduler = scheduler.clone();
    outer
      .concat_map_eager_delay_error(bounded(2), move |v| {
        if v == 2 {
          Err("no source for 2")
        } else {
          Ok(c_scheduler.cold_observable(vec![
            on_next(10, v * 10),
            on_next(20, v * 10 + 1),
            on_completed(30),
          ]))
        }
      })
      .actual_subscribe(observer.clone());
    scheduler.flush();

    let error = CompositeError::from_errors(vec!["no source for 2"]).expect("one error");
    assert_eq!(
      observer.messages(),
      vec![
        on_next(10, 0),
        on_next(20, 1),
        on_next(30, 10),
        on_next(30, 11),
        on_next(40, 30),
        on_next(50, 31),
        on_error(60, error),
      ]
    );
  }

  #[rxeager_macro::test]
  fn unsubscribe_is_idempotent_and_stops_everything() {
    let scheduler = TestScheduler::default();
    let (a, b) = (xs1(&scheduler), xs2(&scheduler));
    let observer = scheduler.create_observer::<i32, &'static str>();

    let subscription = outer_of(&scheduler, &[a.clone(), b.clone()])
      .concat_eager(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.advance_to(15);
    assert!(!subscription.is_closed());
    subscription.clone().unsubscribe();
    subscription.clone().unsubscribe();
    assert!(subscription.is_closed());
    scheduler.flush();

    let expected: Messages = vec![on_next(10, 1)];
    assert_eq!(observer.messages(), expected);
    assert_eq!(a.subscriptions(), vec![SubscriptionLog::closed(0, 15)]);
    assert_eq!(b.subscriptions(), vec![SubscriptionLog::closed(0, 15)]);
  }

  #[rxeager_macro::test]
  fn unsubscribe_from_inside_next() {
    let values = Arc::new(Mutex::new(vec![]));
    let slot: Arc<Mutex<Option<MultiSubscription>>> = Arc::new(Mutex::new(None));
    let mut source = Subject::<Subject<i32, ()>, ()>::default();
    let mut inner = Subject::<i32, ()>::default();
    let (c_values, c_slot) = (values.clone(), slot.clone());

    let subscription = source
      .clone()
      .concat_eager(MaxConcurrency::Unbounded)
      .subscribe(move |v| {
        c_values.lock().unwrap().push(v);
        if v == 2 {
          if let Some(s) = c_slot.lock().unwrap().take() {
            s.unsubscribe();
          }
        }
      })
      .into_inner();
    *slot.lock().unwrap() = Some(subscription.clone());

    source.next(inner.clone());
    assert_eq!(inner.observer_count(), 1);
    inner.next(1);
    inner.next(2);
    inner.next(3);

    assert_eq!(*values.lock().unwrap(), vec![1, 2]);
    assert!(subscription.is_closed());
    assert_eq!(inner.observer_count(), 0);
    assert_eq!(source.observer_count(), 0);
  }

  #[rxeager_macro::test]
  fn unsubscribe_after_completion_changes_nothing() {
    let scheduler = TestScheduler::default();
    let b = xs2(&scheduler);
    let observer = scheduler.create_observer::<i32, &'static str>();

    let subscription = outer_of(&scheduler, &[b.clone()])
      .concat_eager(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.flush();
    let finished = observer.messages();

    subscription.clone().unsubscribe();
    subscription.clone().unsubscribe();
    scheduler.flush();

    let expected: Messages = vec![on_next(10, 4), on_next(20, 5), on_completed(30)];
    assert_eq!(finished, expected);
    assert_eq!(observer.messages(), finished);
    assert!(subscription.is_closed());
    assert_eq!(b.subscriptions(), vec![SubscriptionLog::closed(0, 30)]);
  }

  #[rxeager_macro::test]
  fn unsubscribe_after_error_changes_nothing() {
    let scheduler = TestScheduler::default();
    let failing = scheduler.cold_observable(vec![on_next(5, 4), on_error(15, "boom")]);
    let observer = scheduler.create_observer::<i32, &'static str>();

    let subscription = outer_of(&scheduler, &[failing.clone()])
      .concat_eager(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.advance_to(20);
    let finished = observer.messages();

    subscription.clone().unsubscribe();
    subscription.clone().unsubscribe();
    scheduler.flush();

    let expected: Messages = vec![on_next(5, 4), on_error(15, "boom")];
    assert_eq!(finished, expected);
    assert_eq!(observer.messages(), finished);
    assert_eq!(failing.subscriptions(), vec![SubscriptionLog::closed(0, 15)]);
  }

  #[rxeager_macro::test]
  fn unsubscribe_before_first_source_subscribes_nothing() {
    let scheduler = TestScheduler::default();
    let a = xs1(&scheduler);
    let outer = scheduler.hot_observable(vec![on_next(10, a.clone()), on_completed(20)]);
    let observer = scheduler.create_observer::<i32, &'static str>();

    let subscription = outer
      .clone()
      .concat_eager(MaxConcurrency::Unbounded)
      .actual_subscribe(observer.clone());
    scheduler.advance_to(5);
    subscription.clone().unsubscribe();
    subscription.clone().unsubscribe();
    scheduler.flush();

    assert!(observer.messages().is_empty());
    assert!(a.subscriptions().is_empty());
    assert_eq!(outer.subscriptions(), vec![SubscriptionLog::closed(0, 5)]);
  }

  /// Inner sources of different shapes behind one type.
  #[derive(Clone)]
  enum Source {
    Live(Subject<i32, &'static str>),
    Fail,
    Counted(Arc<AtomicUsize>),
  }

  impl<O> Observable<i32, &'static str, O> for Source
  where
    O: Observer<i32, &'static str> + Send + 'static,
  {
    type Unsub = Option<SubjectSubscription<i32, &'static str>>;

    fn actual_subscribe(self, observer: O) -> Self::Unsub {
      match self {
        Source::Live(subject) => Some(subject.actual_subscribe(observer)),
        Source::Fail => {
          observer.error("fail");
          None
        }
        Source::Counted(subscribed) => {
          subscribed.fetch_add(1, Ordering::SeqCst);
          None
        }
      }
    }
  }

  impl ObservableExt<i32, &'static str> for Source {}

  #[rxeager_macro::test]
  fn fail_fast_admits_nothing_after_synchronous_failure() {
    let outer = Subject::<Source, &'static str>::default();
    let mut live = Subject::<i32, &'static str>::default();
    let subscribed = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(Mutex::new(vec![]));
    let (c_outer, c_subscribed, c_errors) = (outer.clone(), subscribed.clone(), errors.clone());

    outer
      .clone()
      .concat_eager(MaxConcurrency::Unbounded)
      .subscribe_all(
        move |v| {
          if v == 1 {
            // Both arrive while the drain is busy and are admitted together.
            let mut outer = c_outer.clone();
            outer.next(Source::Fail);
            outer.next(Source::Counted(c_subscribed.clone()));
          }
        },
        move |e| c_errors.lock().unwrap().push(e),
        || {},
      );
    outer.clone().next(Source::Live(live.clone()));
    live.next(1);

    assert_eq!(*errors.lock().unwrap(), vec!["fail"]);
    assert_eq!(subscribed.load(Ordering::SeqCst), 0);
    assert_eq!(live.observer_count(), 0);
    assert_eq!(outer.observer_count(), 0);
  }

  #[rxeager_macro::test]
  fn synchronous_inner_sources() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::from_iter(0..3)
      .concat_map_eager(bounded(2), |i| Ok(observable::from_iter(i * 3..i * 3 + 3)))
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), (0..9).collect::<Vec<_>>());
  }

  #[rxeager_macro::test]
  fn bench() { do_bench(); }

  bencher::benchmark_group!(do_bench, bench_concat_eager);

  fn bench_concat_eager(b: &mut bencher::Bencher) { b.iter(synchronous_inner_sources); }
}
