use crate::observer::Observer;

/// Observer built from three closures, one per kind of notification.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline(always)]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline(always)]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline(always)]
  fn complete(self) { (self.complete)(); }

  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}
