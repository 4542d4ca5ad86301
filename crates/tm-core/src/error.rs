//! Shared error type.
//!
//! Stage crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `tm-core` helpers and reused by the stage crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("coordinate reference system error: {0}")]
    Crs(String),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Shorthand result type for `tm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
