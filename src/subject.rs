//! Thread-safe multicast source.
//!
//! A `Subject` is both an observer and an observable: whatever it is told
//! through `next`/`error`/`complete` is forwarded to every observer that is
//! subscribed at that moment. Calls into one subject must follow the Rx
//! grammar and must not overlap. Emitting into a subject from inside one of
//! its own observers is not supported.

use crate::{
  observer::BoxObserver,
  prelude::*,
  rc::{MutArc, RcDeref, RcDerefMut},
};
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

pub struct Subject<Item, Err> {
  observers: MutArc<Subscribers<Item, Err>>,
}

struct Subscribers<Item, Err> {
  list: Vec<Arc<SubjectEntry<Item, Err>>>,
  terminal: Option<Terminal<Err>>,
}

enum Terminal<Err> {
  Error(Err),
  Completed,
}

struct SubjectEntry<Item, Err> {
  closed: AtomicBool,
  observer: Mutex<Option<BoxObserver<Item, Err>>>,
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self {
    Subject { observers: MutArc::own(Subscribers { list: vec![], terminal: None }) }
  }
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { observers: self.observers.clone() } }
}

impl<Item, Err> Subject<Item, Err> {
  /// Number of observers currently subscribed.
  pub fn observer_count(&self) -> usize { self.observers.rc_deref().list.len() }

  fn take_observers(&self, terminal: Terminal<Err>) -> Vec<Arc<SubjectEntry<Item, Err>>> {
    let mut inner = self.observers.rc_deref_mut();
    if inner.terminal.is_some() {
      return vec![];
    }
    inner.terminal = Some(terminal);
    std::mem::take(&mut inner.list)
  }
}

impl<Item, Err> Observer<Item, Err> for Subject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    // Snapshot, so observers can subscribe or unsubscribe from a callback.
    let list = self.observers.rc_deref().list.clone();
    for entry in list {
      if entry.closed.load(Ordering::Acquire) {
        continue;
      }
      if let Some(observer) = entry.observer.lock().as_mut() {
        observer.next(value.clone());
      }
    }
  }

  fn error(self, err: Err) {
    for entry in self.take_observers(Terminal::Error(err.clone())) {
      if !entry.closed.swap(true, Ordering::AcqRel) {
        let observer = entry.observer.lock().take();
        if let Some(observer) = observer {
          observer.error(err.clone());
        }
      }
    }
  }

  fn complete(self) {
    for entry in self.take_observers(Terminal::Completed) {
      if !entry.closed.swap(true, Ordering::AcqRel) {
        let observer = entry.observer.lock().take();
        if let Some(observer) = observer {
          observer.complete();
        }
      }
    }
  }

  fn is_finished(&self) -> bool { self.observers.rc_deref().terminal.is_some() }
}

impl<Item, Err, O> Observable<Item, Err, O> for Subject<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  Err: Clone,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut inner = self.observers.rc_deref_mut();
    let terminal = inner.terminal.as_ref().map(|terminal| match terminal {
      Terminal::Error(err) => Terminal::Error(err.clone()),
      Terminal::Completed => Terminal::Completed,
    });
    match terminal {
      Some(terminal) => {
        drop(inner);
        match terminal {
          Terminal::Error(err) => observer.error(err),
          Terminal::Completed => observer.complete(),
        }
        SubjectSubscription { observers: self.observers.clone(), entry: None }
      }
      None => {
        let entry = Arc::new(SubjectEntry {
          closed: AtomicBool::new(false),
          observer: Mutex::new(Some(Box::new(observer) as BoxObserver<Item, Err>)),
        });
        inner.list.push(entry.clone());
        drop(inner);
        SubjectSubscription { observers: self.observers, entry: Some(entry) }
      }
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Subject<Item, Err> {}

/// Removes one observer from its subject.
///
/// Never locks the observer itself, so it is safe to unsubscribe from
/// inside that observer's callback.
pub struct SubjectSubscription<Item, Err> {
  observers: MutArc<Subscribers<Item, Err>>,
  entry: Option<Arc<SubjectEntry<Item, Err>>>,
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    let Some(entry) = self.entry else { return };
    if !entry.closed.swap(true, Ordering::AcqRel) {
      self
        .observers
        .rc_deref_mut()
        .list
        .retain(|e| !Arc::ptr_eq(e, &entry));
    }
  }

  fn is_closed(&self) -> bool {
    self
      .entry
      .as_ref()
      .map_or(true, |e| e.closed.load(Ordering::Acquire))
  }
}
