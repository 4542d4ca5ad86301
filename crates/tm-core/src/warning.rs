//! Non-fatal data-quality findings.
//!
//! Every stage returns the warnings it raised next to its output and also
//! logs each one through `tracing` at `WARN` level.

use std::fmt;

use crate::{PositionfixId, StaypointId, UserId};

/// A data-quality issue that did not abort processing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// Exact duplicate positionfixes were removed before staypoint detection.
    DuplicatesDropped { count: usize },
    /// Staypoint detection produced nothing.
    NoStaypoints,
    /// Tripleg segmentation produced nothing.
    NoTriplegs,
    /// These fixes formed triplegs with invalid line geometry; their
    /// `tripleg_id` was cleared and the triplegs omitted.
    InvalidTriplegs { positionfix_ids: Vec<PositionfixId> },
    /// No positionfix at or after the staypoint's `finished_at` exists for
    /// the user, so no tripleg start could be pinned to it.
    UnmatchedStaypointBoundary { user_id: UserId, staypoint_id: StaypointId },
    /// Tripleg lengths were computed on data without a CRS.
    CrsAssumedWgs84,
}

impl Warning {
    /// Log the warning and hand it back for collection.
    pub fn emit(self) -> Self {
        match &self {
            Warning::DuplicatesDropped { count } => {
                tracing::warn!(count, "{self}");
            }
            Warning::InvalidTriplegs { positionfix_ids } => {
                tracing::warn!(fixes = positionfix_ids.len(), "{self}");
            }
            Warning::UnmatchedStaypointBoundary { user_id, staypoint_id } => {
                tracing::warn!(user_id = user_id.0, staypoint_id = staypoint_id.0, "{self}");
            }
            Warning::NoStaypoints | Warning::NoTriplegs | Warning::CrsAssumedWgs84 => {
                tracing::warn!("{self}");
            }
        }
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicatesDropped { count } => write!(
                f,
                "{count} duplicates were dropped from your positionfixes; disable \
                 `exclude_duplicate_pfs` to keep them"
            ),
            Warning::NoStaypoints => f.write_str("no staypoints can be generated, returning empty staypoints"),
            Warning::NoTriplegs => f.write_str("no triplegs can be generated, returning empty triplegs"),
            Warning::InvalidTriplegs { positionfix_ids } => {
                f.write_str("the positionfixes with ids [")?;
                for (i, id) in positionfix_ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{id}")?;
                }
                f.write_str(
                    "] lead to invalid tripleg geometries; the resulting triplegs were omitted \
                     and the tripleg id of the positionfixes was unset",
                )
            }
            Warning::UnmatchedStaypointBoundary { user_id, staypoint_id } => write!(
                f,
                "user {user_id} has no positionfix at or after the end of staypoint {staypoint_id}"
            ),
            Warning::CrsAssumedWgs84 => f.write_str(
                "your data is not projected; WGS84 is assumed and for length calculation the \
                 haversine distance is used",
            ),
        }
    }
}
