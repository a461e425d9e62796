use super::{
  errors::{ErrorAggregator, ErrorMode},
  gate::{ConcurrencyGate, MaxConcurrency},
  holder::{InnerHolder, InnerObserver},
};
use crate::prelude::*;
use crossbeam::queue::SegQueue;
use parking_lot::{Mutex, MutexGuard};
use std::{
  collections::VecDeque,
  marker::PhantomData,
  sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
  },
};
use tracing::{debug, trace};

/// Subscribes one inner observable. Kept type erased so the state does not
/// depend on the concrete inner type.
pub(crate) type SubscribeTask<O, Item, Err, M> =
  Box<dyn FnOnce(InnerObserver<O, Item, Err, M>) -> BoxSubscription + Send>;

/// An inner observable handed over by the outer observer, not yet seen by
/// the drain.
pub(crate) struct Arrival<O, Item, Err, M> {
  pub(crate) holder: Arc<InnerHolder<Item>>,
  pub(crate) subscribe: SubscribeTask<O, Item, Err, M>,
}

enum Slot<O, Item, Err, M> {
  Pending(SubscribeTask<O, Item, Err, M>),
  Active(ProxySubscription),
}

struct Entry<O, Item, Err, M> {
  holder: Arc<InnerHolder<Item>>,
  slot: Slot<O, Item, Err, M>,
}

/// Everything only the drain may touch.
struct Window<O, Item, Err, M> {
  queue: VecDeque<Entry<O, Item, Err, M>>,
  /// Entries `[0, admitted)` are subscribed, the rest are pending.
  admitted: usize,
  gate: ConcurrencyGate,
  observer: Option<O>,
}

/// Per subscription state shared by the outer observer, every inner
/// observer and the disposal handle.
pub(crate) struct ConcatEagerState<O, Item, Err, M> {
  wip: AtomicUsize,
  disposed: AtomicBool,
  outer_done: AtomicBool,
  arrivals: SegQueue<Arrival<O, Item, Err, M>>,
  pub(crate) errors: ErrorAggregator<Err>,
  subscription: MultiSubscription,
  window: Mutex<Window<O, Item, Err, M>>,
  _mode: PhantomData<fn() -> M>,
}

impl<O, Item, Err, M> ConcatEagerState<O, Item, Err, M>
where
  M: ErrorMode<Err>,
  O: Observer<Item, M::Output>,
{
  pub(crate) fn new(
    observer: O, max_concurrency: MaxConcurrency, subscription: MultiSubscription,
  ) -> Self {
    ConcatEagerState {
      wip: AtomicUsize::new(0),
      disposed: AtomicBool::new(false),
      outer_done: AtomicBool::new(false),
      arrivals: SegQueue::new(),
      errors: ErrorAggregator::new(M::DELAY_ERRORS),
      subscription,
      window: Mutex::new(Window {
        queue: VecDeque::new(),
        admitted: 0,
        gate: ConcurrencyGate::new(max_concurrency),
        observer: Some(observer),
      }),
      _mode: PhantomData,
    }
  }

  #[inline]
  pub(crate) fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }

  /// Returns `false` if the state was already disposed.
  pub(crate) fn dispose(&self) -> bool { !self.disposed.swap(true, Ordering::AcqRel) }

  pub(crate) fn arrive(self: &Arc<Self>, arrival: Arrival<O, Item, Err, M>) {
    self.arrivals.push(arrival);
    self.signal();
  }

  /// Must be called after the last `arrive` of the outer observable.
  pub(crate) fn outer_finished(self: &Arc<Self>) {
    self.outer_done.store(true, Ordering::Release);
    self.signal();
  }

  /// Runs the drain unless another caller is already running it, in which
  /// case that caller loops once more.
  pub(crate) fn signal(self: &Arc<Self>) {
    if self.wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    let mut missed = 1;
    loop {
      self.drain();
      missed = self.wip.fetch_sub(missed, Ordering::AcqRel) - missed;
      if missed == 0 {
        break;
      }
    }
  }

  fn drain(self: &Arc<Self>) {
    let mut window = self.window.lock();
    loop {
      if self.is_disposed() {
        self.release(&mut window);
        return;
      }

      // Read before taking arrivals: once it is set, no arrival can follow.
      let outer_done = self.outer_done.load(Ordering::Acquire);
      while let Some(Arrival { holder, subscribe }) = self.arrivals.pop() {
        if window.admitted < window.queue.len() || !window.gate.has_room() {
          trace!(index = holder.index, active = window.gate.active(), "inner source deferred");
        }
        window.queue.push_back(Entry { holder, slot: Slot::Pending(subscribe) });
      }

      if self.errors.should_fail_fast() {
        self.terminate(window);
        return;
      }

      self.admit(&mut window);
      if self.is_disposed() || self.errors.should_fail_fast() {
        continue;
      }

      let head = window.queue.front().map(|e| e.holder.clone());
      let Some(holder) = head else {
        if outer_done {
          self.terminate(window);
        }
        return;
      };

      // Read before flushing, values pushed after this point wait for the
      // next round.
      let done = holder.is_done();
      while let Some(value) = holder.pop() {
        if self.is_disposed() {
          self.release(&mut window);
          return;
        }
        if self.errors.should_fail_fast() {
          self.terminate(window);
          return;
        }
        if let Some(observer) = window.observer.as_mut() {
          observer.next(value);
        }
      }
      if !done {
        return;
      }

      if let Some(entry) = window.queue.pop_front() {
        window.admitted -= 1;
        if let Slot::Active(proxy) = entry.slot {
          window.gate.release();
          proxy.unsubscribe();
        }
        debug!(index = holder.index, active = window.gate.active(), "inner source drained");
      }
    }
  }

  /// Subscribes pending entries in arrival order while the gate has room.
  /// Nothing new starts once a fail-fast failure is recorded, even one raised
  /// synchronously by the subscribe call just made.
  fn admit(self: &Arc<Self>, window: &mut Window<O, Item, Err, M>) {
    while window.admitted < window.queue.len() && window.gate.has_room() {
      if self.is_disposed() || self.errors.should_fail_fast() {
        return;
      }
      let proxy = ProxySubscription::default();
      let entry = &mut window.queue[window.admitted];
      let slot = std::mem::replace(&mut entry.slot, Slot::Active(proxy.clone()));
      let holder = entry.holder.clone();
      window.admitted += 1;
      window.gate.acquire();

      if let Slot::Pending(subscribe) = slot {
        debug!(index = holder.index, active = window.gate.active(), "subscribing inner source");
        self.subscription.append(BoxSubscription::new(proxy.clone()));
        let unsub = subscribe(InnerObserver::new(holder, self.clone()));
        proxy.fill(unsub);
      }
    }
  }

  /// Ends the stream: the first failure under fail fast, otherwise the
  /// aggregate failure or completion once every source finished.
  fn terminate(&self, mut window: MutexGuard<'_, Window<O, Item, Err, M>>) {
    self.disposed.store(true, Ordering::Release);
    let observer = window.observer.take();
    self.release(&mut window);
    drop(window);

    self.subscription.clone().unsubscribe();
    let Some(observer) = observer else { return };
    match M::fold(self.errors.take()) {
      Some(err) => {
        debug!(delay_errors = M::DELAY_ERRORS, "concat_eager terminated with error");
        observer.error(err)
      }
      None => {
        debug!("concat_eager completed");
        observer.complete()
      }
    }
  }

  /// Drops buffered values, pending sources and the downstream observer.
  /// Open inner subscriptions are owned by the composite subscription.
  fn release(&self, window: &mut Window<O, Item, Err, M>) {
    if window.observer.take().is_some() || !window.queue.is_empty() {
      debug!(dropped = window.queue.len(), "concat_eager released");
    }
    window.queue.clear();
    window.admitted = 0;
    while self.arrivals.pop().is_some() {}
  }
}
