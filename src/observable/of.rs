use crate::prelude::*;
use std::convert::Infallible;

/// Creates an observable producing a single value, then completing.
///
/// ```
/// use rxeager::prelude::*;
///
/// let mut value = 0;
/// observable::of(123).subscribe(|v| value = v);
/// assert_eq!(value, 123);
/// ```
pub fn of<Item>(v: Item) -> ObservableOf<Item> { ObservableOf(v) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item, O> Observable<Item, Infallible, O> for ObservableOf<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    if !observer.is_finished() {
      observer.next(self.0);
      observer.complete();
    }
  }
}

impl<Item> ObservableExt<Item, Infallible> for ObservableOf<Item> {}
