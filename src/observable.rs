use crate::{
  observer::Observer,
  ops::{
    concat_eager::{ConcatAllEagerOp, ConcatEagerOp, DelayErrors, FailFast, MaxConcurrency},
    map::MapOp,
  },
  subscription::{Subscription, SubscriptionWrapper},
};

mod from_iter;
mod of;
mod subscribe_all;
mod subscribe_item;
mod trivial;

pub use from_iter::*;
pub use of::*;
pub use subscribe_all::*;
pub use subscribe_item::*;
pub use trivial::*;

/// A representation of any set of values over any amount of time.
///
/// `O` is the concrete observer type; operators wrap the downstream observer
/// in their own observer and pass it upstream, so a whole chain is resolved
/// statically at subscribe time.
pub trait Observable<Item, Err, O>
where
  O: Observer<Item, Err>,
{
  /// A type implementing [`Subscription`]
  type Unsub: Subscription;

  /// Invokes an execution of an Observable and registers an Observer for the
  /// notifications it will emit.
  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// Operator constructors available on every observable.
pub trait ObservableExt<Item, Err>: Sized {
  /// Subscribes with a `next` handler only; errors and completion are
  /// ignored.
  fn subscribe<N>(self, next: N) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverItem<N>>>::Unsub>
  where
    N: FnMut(Item),
    Self: Observable<Item, Err, ObserverItem<N>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverItem::new(next)))
  }

  /// Invokes an execution of an Observable and registers handlers for all
  /// three kinds of notification.
  ///
  /// * `error`: A handler for a terminal event resulting from an error.
  /// * `complete`: A handler for a terminal event resulting from successful
  ///   completion.
  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverAll<N, E, C>>>::Unsub>
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
    Self: Observable<Item, Err, ObserverAll<N, E, C>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverAll::new(next, error, complete)))
  }

  /// Creates a new stream which calls a closure on each element and uses its
  /// return as the value.
  #[inline]
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp::new(self, f)
  }

  /// Flattens a stream of observables into one, keeping the order in which
  /// the inner observables arrived.
  ///
  /// Up to `max_concurrency` inner observables are subscribed at the same
  /// time; their values are buffered until every earlier inner observable has
  /// completed. The first error from the outer or from any inner observable
  /// terminates the stream and cancels everything else.
  ///
  /// ```
  /// use rxeager::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let values = Arc::new(Mutex::new(vec![]));
  /// let c_values = values.clone();
  /// observable::from_iter(vec![observable::from_iter(0..2), observable::from_iter(2..4)])
  ///   .concat_eager(MaxConcurrency::Unbounded)
  ///   .subscribe(move |v| c_values.lock().unwrap().push(v));
  /// assert_eq!(*values.lock().unwrap(), vec![0, 1, 2, 3]);
  /// ```
  #[inline]
  fn concat_eager(self, max_concurrency: MaxConcurrency) -> ConcatAllEagerOp<Self, Item, Err, FailFast> {
    ConcatEagerOp::new(self, Ok as fn(Item) -> Result<Item, Err>, max_concurrency)
  }

  /// Same as [`concat_eager`](ObservableExt::concat_eager), but failures do
  /// not interrupt the stream. Every value produced before a failure is still
  /// delivered in order, and once the outer and every inner observable have
  /// finished the collected failures are emitted as one [`CompositeError`].
  ///
  /// [`CompositeError`]: crate::error::CompositeError
  #[inline]
  fn concat_eager_delay_error(
    self, max_concurrency: MaxConcurrency,
  ) -> ConcatAllEagerOp<Self, Item, Err, DelayErrors> {
    ConcatEagerOp::new(self, Ok as fn(Item) -> Result<Item, Err>, max_concurrency)
  }

  /// Maps every item to an inner observable with `f` and concatenates them
  /// eagerly, see [`concat_eager`](ObservableExt::concat_eager).
  ///
  /// An `Err` returned by `f` counts as a failure of the inner observable at
  /// that position, which is then never subscribed.
  #[inline]
  fn concat_map_eager<Inner, F>(
    self, max_concurrency: MaxConcurrency, f: F,
  ) -> ConcatEagerOp<Self, F, Item, Inner, Err, FailFast>
  where
    F: FnMut(Item) -> Result<Inner, Err>,
  {
    ConcatEagerOp::new(self, f, max_concurrency)
  }

  /// Error delaying version of
  /// [`concat_map_eager`](ObservableExt::concat_map_eager).
  #[inline]
  fn concat_map_eager_delay_error<Inner, F>(
    self, max_concurrency: MaxConcurrency, f: F,
  ) -> ConcatEagerOp<Self, F, Item, Inner, Err, DelayErrors>
  where
    F: FnMut(Item) -> Result<Inner, Err>,
  {
    ConcatEagerOp::new(self, f, max_concurrency)
  }
}
