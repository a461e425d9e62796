//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::{ArgumentError, CompositeError};
// Core traits and creation functions
pub use crate::observable;
pub use crate::observable::{Observable, ObservableExt};
// Observer trait
pub use crate::observer::Observer;
// Operators
pub use crate::ops::concat_eager::{DelayErrors, ErrorMode, FailFast, MaxConcurrency};
// Subject
pub use crate::subject::*;
// Subscription
pub use crate::subscription::*;
