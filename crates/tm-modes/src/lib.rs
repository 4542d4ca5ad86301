//! `tm-modes`: coarse transport mode identification.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`categories`]  | `Categories`: validated speed-bucket table             |
//! | [`config`]      | `ModeConfig`, `ModeMethod`                              |
//! | [`classify`]    | `predict_transport_mode`, speed and CRS policy          |
//! | [`error`]       | `ModeError`, `ModeResult<T>`                            |
//!
//! # CRS policy
//!
//! | Tripleg CRS              | Length computation                           |
//! |--------------------------|----------------------------------------------|
//! | none                     | haversine, WGS-84 assumed (warning)          |
//! | EPSG:4326                | haversine                                    |
//! | projected                | Euclidean, metres                            |
//! | other geographic         | rejected with `ModeError::GeographicCrs`     |

pub mod categories;
pub mod classify;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use categories::{Categories, check_categories};
pub use classify::{LengthPolicy, ModeOutput, predict_transport_mode, tripleg_speed_kmh};
pub use config::{ModeConfig, ModeMethod};
pub use error::{ModeError, ModeResult};
