//! # Signals, Publishers and Dispatch
//!
//! The reactive core behind the side reveal widget. There are four pieces:
//!
//! - `Signal<T>`: observable, single-threaded value.
//! - `Publisher<T>`: an infallible source a component subscribes to once.
//! - `dispatch`: moves values produced on other threads onto the UI thread.
//! - `Scope` / `Subscription`: teardown.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use sidereveal_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Every write notifies every subscriber, in subscription order. Use
//! `set_if_changed` when equal writes should be ignored.
//!
//! ## Publishers
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use sidereveal_core::*;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let _sub = sequence([true, false]).connect({
//!     let seen = seen.clone();
//!     Rc::new(move |v| seen.borrow_mut().push(v))
//! });
//! assert_eq!(*seen.borrow(), vec![true, false]);
//! ```
//!
//! `Just`, `sequence` and `Signal` deliver on the calling thread. A
//! `UiReceiver` from `ui_channel` queues values until `dispatch::drain` runs
//! on the UI thread; the `Scheduler` drains at the start of every frame.
//!
//! ## Teardown
//!
//! A `Subscription` cancels when dropped. Components that outlive a single
//! call park their subscriptions in a `Scope`, and disposing the scope stops
//! every delivery:
//!
//! ```rust
//! use sidereveal_core::*;
//!
//! let scope = Scope::new();
//! let source = signal(false);
//! let sub = source.clone().connect(std::rc::Rc::new(|_| {}));
//! scope.add_dispose(sub.into_dispose());
//! assert_eq!(source.subscriber_count(), 1);
//!
//! scope.dispose();
//! assert_eq!(source.subscriber_count(), 0);
//! ```

pub mod animation;
pub mod color;
pub mod dispatch;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod publisher;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod tests;
pub mod view;

pub use modifier::{PaddingValues, SizeCallback};
pub use prelude::*;
pub use publisher::Sequence;
