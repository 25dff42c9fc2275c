//! Error types for selector compilation and reduction.
//!
//! Only two things can go wrong: a malformed selector (reported when the
//! reducer is built) and applying a builder that never recorded an operation.
//! Malformed *data* is never an error; it degrades to "no change".

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReduceError {
    #[error("INVALID_SELECTOR: {0}")]
    InvalidSelector(#[from] SelectorFault),
    #[error("NO_OPERATION_RECORDED")]
    NoOperationRecorded,
}

/// The precise reason a selector was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorFault {
    #[error("selector is null")]
    Null,
    #[error("selector is an array")]
    Array,
    #[error("selector is not an object")]
    NotObject,
    #[error("selector has no keys")]
    Empty,
    #[error("root pointer cannot address a target")]
    RootPointer,
    #[error("marker {0:?} does not start with the sentinel")]
    NotMarker(String),
    #[error("pointer {0:?} overlaps another target")]
    Overlap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selector_message_includes_fault() {
        let err = ReduceError::from(SelectorFault::Array);
        assert_eq!(err.to_string(), "INVALID_SELECTOR: selector is an array");
    }

    #[test]
    fn no_operation_message() {
        assert_eq!(
            ReduceError::NoOperationRecorded.to_string(),
            "NO_OPERATION_RECORDED"
        );
    }
}
