//! Error types.
//!
//! Runtime failures of a stream travel through `Observer::error`; the types
//! here cover the two cases that cannot: rejected operator arguments, and
//! the aggregate delivered by the `*_delay_error` operators.

use thiserror::Error;

/// An operator argument that violates its contract. Returned synchronously,
/// before anything is subscribed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
  #[error("max_concurrency must be at least 1")]
  ZeroConcurrency,
}

/// Every failure collected while an error-delaying operator kept draining,
/// in the order they were observed. Never empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} error(s) occurred while concatenating", .errors.len())]
pub struct CompositeError<Err> {
  errors: Vec<Err>,
}

impl<Err> CompositeError<Err> {
  /// Returns `None` if there is nothing to aggregate.
  pub fn from_errors(errors: Vec<Err>) -> Option<Self> {
    (!errors.is_empty()).then(|| CompositeError { errors })
  }

  pub fn errors(&self) -> &[Err] { &self.errors }

  pub fn into_errors(self) -> Vec<Err> { self.errors }

  /// The earliest failure.
  pub fn first(&self) -> Option<&Err> { self.errors.first() }

  pub fn len(&self) -> usize { self.errors.len() }

  pub fn is_empty(&self) -> bool { self.errors.is_empty() }
}
