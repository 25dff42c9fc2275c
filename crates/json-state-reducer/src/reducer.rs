//! Compiled selectors and the `make_reducer` entry point.

use serde_json::Value;

use crate::builder::Builder;
use crate::error::ReduceError;
use crate::selector::Selector;
use crate::types::ReducerOptions;

/// A compiled selector, reusable across any number of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Reducer {
    selector: Selector,
}

impl Reducer {
    pub fn new(selector: Value) -> Result<Self, ReduceError> {
        Self::with_options(selector, ReducerOptions::default())
    }

    pub fn with_options(selector: Value, options: ReducerOptions) -> Result<Self, ReduceError> {
        Ok(Self::from_selector(Selector::with_options(selector, options)?))
    }

    pub fn from_selector(selector: Selector) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Start a fresh builder over `root`.
    pub fn reduce<'a>(&'a self, root: &'a Value) -> Builder<'a> {
        Builder::new(&self.selector, root)
    }
}

/// Compile `selector` into a [`Reducer`].
///
/// # Errors
///
/// [`ReduceError::InvalidSelector`] when the selector is `null`, not an
/// object, an array, or an object with no keys.
pub fn make_reducer(selector: Value) -> Result<Reducer, ReduceError> {
    Reducer::new(selector)
}
