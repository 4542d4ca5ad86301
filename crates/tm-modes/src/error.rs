use thiserror::Error;

use tm_core::Crs;

#[derive(Debug, Error)]
pub enum ModeError {
    #[error("method unknown: only 'simple-coarse' is supported, got {0:?}")]
    UnsupportedMethod(String),

    #[error("invalid transport mode categories: {0}")]
    InvalidCategories(String),

    #[error(
        "your data is in a geographic coordinate system ({0}), length calculation fails; \
         reproject to a projected CRS or to WGS84"
    )]
    GeographicCrs(Crs),

    #[error("cannot predict transport modes of an empty tripleg collection")]
    EmptyTriplegs,
}

pub type ModeResult<T> = Result<T, ModeError>;
