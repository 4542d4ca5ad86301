//! `tm-staypoints`: stationary-episode detection.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`config`]   | `StaypointConfig`, `StaypointMethod`, `DistanceMetric`       |
//! | [`sliding`]  | per-user sliding-window scan and staypoint aggregation       |
//! | [`generate`] | `generate_staypoints`: collection driver                    |
//! | [`error`]    | `StaypointError`, `StaypointResult<T>`                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tm_staypoints::{StaypointConfig, generate_staypoints};
//!
//! let out = generate_staypoints(&positionfixes, &StaypointConfig::default())?;
//! for sp in &out.staypoints.items {
//!     println!("{} {} → {}", sp.user_id, sp.started_at, sp.finished_at);
//! }
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod sliding;


pub use config::{DistanceMetric, SlidingParams, StaypointConfig, StaypointMethod};
pub use error::{StaypointError, StaypointResult};
pub use generate::{StaypointOutput, generate_staypoints};
pub use sliding::{StayWindow, sliding_windows};
