//! The per-user sliding-window scan.
//!
//! State is the window anchor `start` and the cursor `curr`.  Each step looks
//! back at most one fix:
//!
//! ```text
//! for curr in 1..n:
//!   gap(curr-1, curr) > gap_threshold          → start = curr
//!   dist(start, curr) >= dist_threshold        →
//!       dwell(start, curr) >= time_threshold   → emit [start, curr)
//!       start = curr
//! ```
//!
//! An emitted window takes `finished_at` from fix `curr` but its geometry
//! and membership only from `[start, curr)`.

use std::ops::Range;

use chrono::TimeDelta;
use geo::Point;

use tm_core::geometry::{centroid, median};
use tm_core::{Positionfix, Staypoint, StaypointId, UserId};

use crate::config::SlidingParams;

/// A closed window found by the scan, in indices of the user's slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StayWindow {
    /// Member fixes.
    pub members:  Range<usize>,
    /// Fix whose timestamp becomes `finished_at`.
    pub finished: usize,
}

fn dwell(fixes: &[Positionfix], start: usize, end: usize) -> TimeDelta {
    fixes[end].tracked_at - fixes[start].tracked_at
}

fn qualifies(fixes: &[Positionfix], start: usize, end: usize, params: &SlidingParams) -> bool {
    let d = dwell(fixes, start, end);
    d >= params.time_threshold && d > TimeDelta::zero()
}

/// Scan one user's time-ordered fixes and return the qualifying windows.
pub fn sliding_windows<F>(fixes: &[Positionfix], params: &SlidingParams, dist: F) -> Vec<StayWindow>
where
    F: Fn(Point<f64>, Point<f64>) -> f64,
{
    let n = fixes.len();
    let mut windows = Vec::new();
    if n < 2 {
        return windows;
    }

    let mut start = 0;
    for curr in 1..n {
        if dwell(fixes, curr - 1, curr) > params.gap_threshold {
            start = curr;
            continue;
        }

        if dist(fixes[start].geom, fixes[curr].geom) >= params.dist_threshold {
            if qualifies(fixes, start, curr, params) {
                windows.push(StayWindow { members: start..curr, finished: curr });
            }
            start = curr;
        }
    }

    if params.include_last && qualifies(fixes, start, n - 1, params) {
        windows.push(StayWindow { members: start..n, finished: n - 1 });
    }

    windows
}

/// Aggregate a window into a staypoint.  The id is a placeholder; the
/// collection-level driver renumbers after concatenation.
pub fn build_staypoint(user_id: UserId, fixes: &[Positionfix], window: &StayWindow, planar: bool) -> Option<Staypoint> {
    let members = &fixes[window.members.clone()];
    let points: Vec<Point<f64>> = members.iter().map(|pf| pf.geom).collect();

    Some(Staypoint {
        id:          StaypointId(0),
        user_id,
        started_at:  fixes[window.members.start].tracked_at,
        finished_at: fixes[window.finished].tracked_at,
        geom:        centroid(&points, planar)?,
        elevation:   median(members.iter().filter_map(|pf| pf.elevation)),
        pfs_id:      members.iter().map(|pf| pf.id).collect(),
    })
}

/// Staypoints of one user together with the member range each came from.
pub fn staypoints_for_user<F>(
    user_id: UserId,
    fixes:   &[Positionfix],
    params:  &SlidingParams,
    dist:    F,
) -> Vec<(Staypoint, Range<usize>)>
where
    F: Fn(Point<f64>, Point<f64>) -> f64,
{
    let windows = sliding_windows(fixes, params, dist);
    tracing::debug!(user_id = user_id.0, fixes = fixes.len(), staypoints = windows.len(), "sliding scan done");

    windows
        .into_iter()
        .filter_map(|w| build_staypoint(user_id, fixes, &w, params.planar).map(|sp| (sp, w.members)))
        .collect()
}
