use super::{BoxSubscription, Subscription};
use crate::rc::{MutArc, RcDeref, RcDerefMut};
use smallvec::SmallVec;

/// A cloneable composite of subscriptions sharing one close switch.
///
/// Every clone controls the same set of teardowns. Once closed, any
/// subscription appended later is unsubscribed on the spot. Teardowns run
/// outside the internal lock, so a teardown may append to or unsubscribe the
/// composite again.
#[derive(Clone, Default)]
pub struct MultiSubscription(MutArc<Teardowns>);

#[derive(Default)]
struct Teardowns {
  closed: bool,
  list: SmallVec<[BoxSubscription; 2]>,
}

impl MultiSubscription {
  pub fn append(&self, subscription: BoxSubscription) {
    let mut inner = self.0.rc_deref_mut();
    if inner.closed {
      drop(inner);
      subscription.unsubscribe();
    } else {
      inner.list.retain(|s| !s.is_closed());
      inner.list.push(subscription);
    }
  }

  /// Number of teardowns still held.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().list.len() }
}

impl Subscription for MultiSubscription {
  fn unsubscribe(self) {
    let list = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.list)
    };
    for s in list {
      s.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}
