//! Error types for the reactive engine.
//!
//! The engine has very little fallible surface: writes are either accepted,
//! suppressed (identical value), or rejected (read-only target). Only the
//! last case produces an error, and only through the `try_` variants;
//! the plain call shapes log a diagnostic and carry on.

use thiserror::Error;

/// Errors raised by reactive operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReactiveError {
    /// Attempted to write to a computed signal. Computed values are driven
    /// exclusively by their own computation.
    #[error("cannot write to a computed signal; its value is driven by its computation")]
    ReadOnlyWrite,
}
