//! Error types for settings parsing.

use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for this crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced by the strict parsers.
///
/// The lenient entry points on [`crate::Settings`] never surface these; they
/// log and degrade instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A slot number outside 1..=10.
    #[error("invalid slot: {0} (expected 1-10)")]
    InvalidSlot(String),

    /// A combo spec that does not match `trigger:name1,name2,...`.
    #[error("invalid combo spec {spec:?}: {reason}")]
    InvalidCombo {
        /// The raw spec as given.
        spec: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}
