//! Staypoint membership for fixes that do not carry a `staypoint_id`.
//!
//! A fix belongs to a stay when its timestamp falls in any of the user's
//! closed-open intervals `[started_at, finished_at)`.  Independently, the
//! first fix at or after each `finished_at` is flagged as a tripleg start,
//! which pins the boundary even when no fix lies exactly on it.

use tm_core::{Positionfix, Staypoint, StaypointId, Timestamp};

/// Per-fix staypoint state in the form the segment scan consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StayMarks {
    /// Fix is inside a staypoint.
    pub in_stay:   Vec<bool>,
    /// Fix is the first one at or after a staypoint's end.
    pub boundary:  Vec<bool>,
    /// Staypoints with no fix at or after their end.
    pub unmatched: Vec<StaypointId>,
}

impl StayMarks {
    /// Marks taken from the fixes' own `staypoint_id`.
    pub fn from_labels(fixes: &[Positionfix]) -> Self {
        Self {
            in_stay:   fixes.iter().map(|pf| pf.staypoint_id.is_some()).collect(),
            boundary:  vec![false; fixes.len()],
            unmatched: Vec::new(),
        }
    }

    /// Marks derived from time containment in `stays` (one user's).
    /// `fixes` must be sorted by `tracked_at`.
    pub fn from_intervals(fixes: &[Positionfix], stays: &[&Staypoint]) -> Self {
        let times: Vec<Timestamp> = fixes.iter().map(|pf| pf.tracked_at).collect();

        let mut intervals: Vec<(Timestamp, Timestamp)> =
            stays.iter().map(|sp| (sp.started_at, sp.finished_at)).collect();
        intervals.sort();

        // running_end[k] = latest finish among the first k + 1 intervals.
        let running_end: Vec<Timestamp> = intervals
            .iter()
            .scan(None::<Timestamp>, |acc, &(_, end)| {
                let m = acc.map_or(end, |a| a.max(end));
                *acc = Some(m);
                Some(m)
            })
            .collect();

        let in_stay = times
            .iter()
            .map(|&t| {
                let k = intervals.partition_point(|&(start, _)| start <= t);
                k > 0 && running_end[k - 1] > t
            })
            .collect();

        let mut boundary = vec![false; fixes.len()];
        let mut unmatched = Vec::new();
        for sp in stays {
            let pos = times.partition_point(|&t| t < sp.finished_at);
            match boundary.get_mut(pos) {
                Some(flag) => *flag = true,
                None => unmatched.push(sp.id),
            }
        }

        Self { in_stay, boundary, unmatched }
    }
}
