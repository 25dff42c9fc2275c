//! Immutable, selector-addressed transformation of nested JSON state.
//!
//! A *selector* is a JSON object mirroring the shape of the document, with
//! marker strings (`#`, `#1`, `#2`, ...) at the places to edit. A [`Reducer`]
//! compiled from a selector hands out a [`Builder`] per document; the builder
//! records one operation per marker and [`Builder::apply`] returns the edited
//! copy, leaving the input untouched.
//!
//! # Example
//!
//! ```
//! use json_state_reducer::make_reducer;
//! use serde_json::json;
//!
//! let state = json!({
//!     "detail": {
//!         "address": {"permanent": "Kathmandu", "temporary": "Pokhara"},
//!         "age": 23
//!     }
//! });
//!
//! let reducer = make_reducer(json!({"detail": {"address": {"permanent": "#"}}})).unwrap();
//! let next = reducer.reduce(&state).set("Lalitpur").apply().unwrap();
//!
//! assert_eq!(next["detail"]["address"]["permanent"], "Lalitpur");
//! assert_eq!(state["detail"]["address"]["permanent"], "Kathmandu");
//! ```
//!
//! # Operations
//!
//! `set`, `append`, `merge`, `extend`, `delete`. Operands that do not fit the
//! target leave it unchanged. Selector paths missing from the document leave
//! the whole document unchanged.

pub mod builder;
pub mod error;
pub mod json_cli;
pub mod operation;
pub mod pointer;
pub mod reducer;
pub mod selector;
mod transform;
pub mod types;

pub use builder::Builder;
pub use error::{ReduceError, SelectorFault};
pub use operation::OperationKind;
pub use reducer::{make_reducer, Reducer};
pub use selector::{validate_selector, Selector};
pub use types::{PendingOperation, ReducerOptions, Target, DEFAULT_SENTINEL};
