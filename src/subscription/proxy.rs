use super::{BoxSubscription, Subscription};
use crate::rc::{MutArc, RcDeref, RcDerefMut};

/// A cloneable placeholder for a subscription that only exists after a
/// subscribe call returns.
///
/// One clone can be registered with a composite before the real handle is
/// known, another is kept to cancel just this source later. If the proxy is
/// unsubscribed before it is filled, the handle is unsubscribed as soon as it
/// arrives.
#[derive(Clone, Default)]
pub struct ProxySubscription(MutArc<ProxyState>);

#[derive(Default)]
enum ProxyState {
  #[default]
  Empty,
  Filled(BoxSubscription),
  Closed,
}

impl ProxySubscription {
  pub fn fill(&self, subscription: BoxSubscription) {
    let mut state = self.0.rc_deref_mut();
    if matches!(*state, ProxyState::Closed) {
      drop(state);
      subscription.unsubscribe();
    } else {
      *state = ProxyState::Filled(subscription);
    }
  }
}

impl Subscription for ProxySubscription {
  fn unsubscribe(self) {
    let prev = std::mem::replace(&mut *self.0.rc_deref_mut(), ProxyState::Closed);
    if let ProxyState::Filled(subscription) = prev {
      subscription.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool {
    match &*self.0.rc_deref() {
      ProxyState::Empty => false,
      ProxyState::Filled(subscription) => subscription.is_closed(),
      ProxyState::Closed => true,
    }
  }
}
