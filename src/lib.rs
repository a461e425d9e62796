//! # rxeager: eager, order preserving concatenation for Reactive Extensions
//!
//! A small, thread-safe Rx core built around `concat_eager`: inner
//! observables are subscribed ahead of time, up to a configurable bound, and
//! their values are still delivered strictly in arrival order.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxeager::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let values = Arc::new(Mutex::new(vec![]));
//! let c_values = values.clone();
//! observable::from_iter(0..3)
//!   .concat_map_eager(MaxConcurrency::bounded(2).unwrap(), |i| {
//!     Ok(observable::from_iter(vec![i * 10, i * 10 + 1]))
//!   })
//!   .subscribe(move |v| c_values.lock().unwrap().push(v));
//!
//! assert_eq!(*values.lock().unwrap(), vec![0, 1, 10, 11, 20, 21]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A source, subscribed with `actual_subscribe` |
//! | [`ObservableExt`] | Operator constructors and `subscribe` helpers |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`MaxConcurrency`] | How many inner sources `concat_eager` keeps open |
//!
//! Failures stop the stream at once with `concat_eager` and
//! `concat_map_eager`. The `*_delay_error` variants keep draining and report
//! every failure together as a [`CompositeError`].
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`MaxConcurrency`]: ops::concat_eager::MaxConcurrency
//! [`CompositeError`]: error::CompositeError

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod subject;
pub mod subscription;
pub mod test_scheduler;

// Re-export the prelude module
pub use prelude::*;
