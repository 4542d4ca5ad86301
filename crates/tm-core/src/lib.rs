//! `tm-core`: foundational types for the trajectory segmentation workspace.
//!
//! Every stage crate (`tm-staypoints`, `tm-triplegs`, `tm-modes`) depends on
//! this one.  It has no `tm-*` dependencies.
//!
//! # What lives here
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`ids`]        | `UserId`, `PositionfixId`, `StaypointId`, `TriplegId`      |
//! | [`crs`]        | `Crs`, `CrsKind`, planarity check                          |
//! | [`geometry`]   | haversine distance, line length, centroids, median         |
//! | [`time`]       | `Timestamp`, minute thresholds                             |
//! | [`model`]      | `Positionfix(es)`, `Staypoint(s)`, `Tripleg(s)`            |
//! | [`warning`]    | `Warning`: non-fatal data-quality findings                |
//! | [`dispatch`]   | `apply_per_user`: order-preserving per-user fan-out       |
//! | [`error`]      | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `apply_per_user` uses a Rayon pool when `n_jobs != 1`.     |
//! | `serde`    | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod crs;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod model;
pub mod time;
pub mod warning;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crs::{Crs, CrsKind};
pub use dispatch::{Dispatch, apply_per_user};
pub use error::{CoreError, CoreResult};
pub use ids::{PositionfixId, StaypointId, TriplegId, UserId};
pub use model::{Positionfix, Positionfixes, Staypoint, Staypoints, Tripleg, Triplegs};
pub use time::Timestamp;
pub use warning::Warning;
