use crate::error::CompositeError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Selects what happens when the outer observable, an inner observable or
/// the selector fails.
pub trait ErrorMode<Err>: 'static {
  /// The error type seen downstream.
  type Output;

  /// `false` terminates on the first failure, `true` keeps draining and
  /// reports every failure at the end.
  const DELAY_ERRORS: bool;

  /// Turns the recorded failures into the downstream error, `None` when
  /// nothing failed.
  fn fold(errors: Vec<Err>) -> Option<Self::Output>;
}

/// The first failure terminates the stream and cancels everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

/// Failures are collected and emitted together once all work is finished.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayErrors;

impl<Err> ErrorMode<Err> for FailFast {
  type Output = Err;
  const DELAY_ERRORS: bool = false;

  #[inline]
  fn fold(errors: Vec<Err>) -> Option<Err> { errors.into_iter().next() }
}

impl<Err> ErrorMode<Err> for DelayErrors {
  type Output = CompositeError<Err>;
  const DELAY_ERRORS: bool = true;

  #[inline]
  fn fold(errors: Vec<Err>) -> Option<CompositeError<Err>> { CompositeError::from_errors(errors) }
}

/// Failures recorded by any producer thread, read by the drain.
pub(crate) struct ErrorAggregator<Err> {
  delay_errors: bool,
  failed: AtomicBool,
  errors: Mutex<Vec<Err>>,
}

impl<Err> ErrorAggregator<Err> {
  pub(crate) fn new(delay_errors: bool) -> Self {
    ErrorAggregator { delay_errors, failed: AtomicBool::new(false), errors: Mutex::new(vec![]) }
  }

  /// Fail fast keeps only the first failure.
  pub(crate) fn record(&self, err: Err) {
    let mut errors = self.errors.lock();
    if !self.delay_errors && !errors.is_empty() {
      trace!("concat_eager discarded an error after the first one");
      return;
    }
    errors.push(err);
    self.failed.store(true, Ordering::Release);
  }

  #[inline]
  pub(crate) fn has_errors(&self) -> bool { self.failed.load(Ordering::Acquire) }

  /// `true` when the stream must terminate right now.
  #[inline]
  pub(crate) fn should_fail_fast(&self) -> bool { !self.delay_errors && self.has_errors() }

  pub(crate) fn take(&self) -> Vec<Err> { std::mem::take(&mut *self.errors.lock()) }
}
