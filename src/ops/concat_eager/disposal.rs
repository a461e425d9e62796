use super::{drain::ConcatEagerState, errors::ErrorMode};
use crate::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// First teardown of the composite subscription returned to the caller.
///
/// Flips the disposed switch and lets the drain release the window. The
/// outer and inner subscriptions are the other teardowns of the same
/// composite.
pub(crate) struct DisposeOnUnsubscribe<O, Item, Err, M>(Arc<ConcatEagerState<O, Item, Err, M>>);

impl<O, Item, Err, M> DisposeOnUnsubscribe<O, Item, Err, M> {
  pub(crate) fn new(state: Arc<ConcatEagerState<O, Item, Err, M>>) -> Self {
    DisposeOnUnsubscribe(state)
  }
}

impl<O, Item, Err, M> Subscription for DisposeOnUnsubscribe<O, Item, Err, M>
where
  M: ErrorMode<Err>,
  O: Observer<Item, M::Output>,
{
  fn unsubscribe(self) {
    if self.0.dispose() {
      debug!("concat_eager unsubscribed");
      self.0.signal();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_disposed() }
}
