//! `tm-triplegs`: movement-episode segmentation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `TriplegConfig`, `TriplegMethod`                           |
//! | [`intervals`] | `StayMarks`: stay membership from labels or time intervals|
//! | [`segment`]   | per-user boundary scan, tripleg assembly, validity check   |
//! | [`generate`]  | `generate_triplegs`: collection driver                    |
//! | [`error`]     | `TriplegError`, `TriplegResult<T>`                         |
//!
//! # Two input shapes
//!
//! Fixes straight out of `tm-staypoints` carry `staypoint_id`; pass
//! `staypoints = None`.  Fixes without membership are matched against a
//! staypoint collection by time; pass `Some(&staypoints)`.  Both yield the
//! same tripleg boundaries for consistent data.

pub mod config;
pub mod error;
pub mod generate;
pub mod intervals;
pub mod segment;

#[cfg(test)]
mod tests;

pub use config::{TriplegConfig, TriplegMethod};
pub use error::{TriplegError, TriplegResult};
pub use generate::{TriplegOutput, generate_triplegs};
pub use intervals::StayMarks;
pub use segment::{is_valid_line, leg_ranges};
