use thiserror::Error;

use tm_core::CoreError;

#[derive(Debug, Error)]
pub enum StaypointError {
    #[error("method unknown: only 'sliding' is supported, got {0:?}")]
    UnsupportedMethod(String),

    #[error("distance_metric unknown: only 'haversine' is supported, got {0:?}")]
    UnsupportedMetric(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StaypointResult<T> = Result<T, StaypointError>;
