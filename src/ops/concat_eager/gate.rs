use crate::error::ArgumentError;
use std::{fmt, num::NonZeroUsize};

/// How many inner observables may be subscribed at the same time.
///
/// A bound can only be built from a non zero count, so a validated value can
/// never stall the concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaxConcurrency {
  Bounded(NonZeroUsize),
  #[default]
  Unbounded,
}

impl MaxConcurrency {
  /// Rejects `0` with [`ArgumentError::ZeroConcurrency`].
  ///
  /// ```
  /// use rxeager::prelude::*;
  ///
  /// assert!(MaxConcurrency::bounded(2).is_ok());
  /// assert_eq!(MaxConcurrency::bounded(0), Err(ArgumentError::ZeroConcurrency));
  /// ```
  pub fn bounded(max: usize) -> Result<Self, ArgumentError> {
    NonZeroUsize::new(max)
      .map(MaxConcurrency::Bounded)
      .ok_or(ArgumentError::ZeroConcurrency)
  }

  /// The bound, `None` when unbounded.
  #[inline]
  pub fn limit(self) -> Option<usize> {
    match self {
      MaxConcurrency::Bounded(max) => Some(max.get()),
      MaxConcurrency::Unbounded => None,
    }
  }

  #[inline]
  pub fn allows(self, active: usize) -> bool { self.limit().map_or(true, |max| active < max) }
}

impl TryFrom<usize> for MaxConcurrency {
  type Error = ArgumentError;

  fn try_from(max: usize) -> Result<Self, Self::Error> { MaxConcurrency::bounded(max) }
}

impl From<NonZeroUsize> for MaxConcurrency {
  fn from(max: NonZeroUsize) -> Self { MaxConcurrency::Bounded(max) }
}

impl fmt::Display for MaxConcurrency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MaxConcurrency::Bounded(max) => write!(f, "{max}"),
      MaxConcurrency::Unbounded => f.write_str("unbounded"),
    }
  }
}

/// Counts the inner subscriptions that are currently open. Only the drain
/// touches it.
#[derive(Debug)]
pub(crate) struct ConcurrencyGate {
  max: MaxConcurrency,
  active: usize,
}

impl ConcurrencyGate {
  pub(crate) fn new(max: MaxConcurrency) -> Self { ConcurrencyGate { max, active: 0 } }

  #[inline]
  pub(crate) fn has_room(&self) -> bool { self.max.allows(self.active) }

  #[inline]
  pub(crate) fn acquire(&mut self) { self.active += 1; }

  #[inline]
  pub(crate) fn release(&mut self) { self.active = self.active.saturating_sub(1); }

  #[inline]
  pub(crate) fn active(&self) -> usize { self.active }
}
