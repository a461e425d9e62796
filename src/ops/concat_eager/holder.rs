use super::{drain::ConcatEagerState, errors::ErrorMode};
use crate::observer::Observer;
use crossbeam::queue::SegQueue;
use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

/// Buffer of one inner observable. Its source is the only producer and the
/// drain the only consumer.
pub(crate) struct InnerHolder<Item> {
  pub(crate) index: usize,
  buffer: SegQueue<Item>,
  done: AtomicBool,
}

impl<Item> InnerHolder<Item> {
  pub(crate) fn new(index: usize) -> Self {
    InnerHolder { index, buffer: SegQueue::new(), done: AtomicBool::new(false) }
  }

  #[inline]
  pub(crate) fn push(&self, value: Item) { self.buffer.push(value) }

  #[inline]
  pub(crate) fn pop(&self) -> Option<Item> { self.buffer.pop() }

  /// Published after the last push, so a drain that saw `is_done` will find
  /// every value in the buffer.
  #[inline]
  pub(crate) fn mark_done(&self) { self.done.store(true, Ordering::Release) }

  #[inline]
  pub(crate) fn is_done(&self) -> bool { self.done.load(Ordering::Acquire) }
}

/// Observer handed to every inner observable.
///
/// It never calls downstream itself: values are buffered and the drain is
/// signalled.
pub struct InnerObserver<O, Item, Err, M> {
  holder: Arc<InnerHolder<Item>>,
  state: Arc<ConcatEagerState<O, Item, Err, M>>,
}

impl<O, Item, Err, M> InnerObserver<O, Item, Err, M> {
  pub(crate) fn new(
    holder: Arc<InnerHolder<Item>>, state: Arc<ConcatEagerState<O, Item, Err, M>>,
  ) -> Self {
    InnerObserver { holder, state }
  }
}

impl<O, Item, Err, M> Observer<Item, Err> for InnerObserver<O, Item, Err, M>
where
  M: ErrorMode<Err>,
  O: Observer<Item, M::Output>,
{
  fn next(&mut self, value: Item) {
    if self.state.is_disposed() {
      return;
    }
    self.holder.push(value);
    self.state.signal();
  }

  fn error(self, err: Err) {
    if self.state.is_disposed() {
      return;
    }
    self.state.errors.record(err);
    self.holder.mark_done();
    self.state.signal();
  }

  fn complete(self) {
    if self.state.is_disposed() {
      return;
    }
    self.holder.mark_done();
    self.state.signal();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.state.is_disposed() || self.holder.is_done() }
}
