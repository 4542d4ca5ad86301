use thiserror::Error;

use tm_core::CoreError;

#[derive(Debug, Error)]
pub enum TriplegError {
    #[error("method unknown: only 'between_staypoints' is supported, got {0:?}")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TriplegResult<T> = Result<T, TriplegError>;
