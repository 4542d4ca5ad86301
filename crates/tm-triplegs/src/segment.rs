//! The per-user boundary scan.
//!
//! A non-stay fix opens a new tripleg iff any of:
//!
//! 1. it is the user's first fix,
//! 2. the gap to the previous fix is strictly longer than `gap_threshold`,
//! 3. the previous fix was in a stay,
//! 4. it is flagged as the first fix after a staypoint's end.
//!
//! A tripleg then runs over the following non-stay fixes until the next
//! opening fix or the next stay fix.  Runs shorter than two fixes are
//! discarded and their fix gets no tripleg.

use std::ops::Range;

use chrono::TimeDelta;
use geo::{LineString, Validation};

use tm_core::{Positionfix, Tripleg, TriplegId, UserId};

use crate::intervals::StayMarks;

/// Index ranges (into `fixes`) of every tripleg with at least two fixes.
pub fn leg_ranges(fixes: &[Positionfix], marks: &StayMarks, gap_threshold: TimeDelta) -> Vec<Range<usize>> {
    let mut legs = Vec::new();
    let mut open: Option<usize> = None;

    let mut close = |open: &mut Option<usize>, end: usize| {
        if let Some(start) = open.take() {
            if end - start >= 2 {
                legs.push(start..end);
            }
        }
    };

    for i in 0..fixes.len() {
        if marks.in_stay[i] {
            close(&mut open, i);
            continue;
        }
        let opens = i == 0
            || marks.in_stay[i - 1]
            || marks.boundary[i]
            || fixes[i].tracked_at - fixes[i - 1].tracked_at > gap_threshold;
        if opens {
            close(&mut open, i);
            open = Some(i);
        }
    }
    close(&mut open, fixes.len());

    legs
}

/// Aggregate a run of fixes into a tripleg.  The id is a placeholder.
pub fn build_tripleg(user_id: UserId, fixes: &[Positionfix]) -> Tripleg {
    Tripleg {
        id:          TriplegId(0),
        user_id,
        started_at:  fixes.iter().map(|pf| pf.tracked_at).min().unwrap_or_default(),
        finished_at: fixes.iter().map(|pf| pf.tracked_at).max().unwrap_or_default(),
        geom:        fixes.iter().map(|pf| pf.geom.0).collect::<LineString<f64>>(),
        pfs_id:      fixes.iter().map(|pf| pf.id).collect(),
        mode:        None,
    }
}

/// A line is usable as a tripleg if it passes the OGC validity rules: at
/// least two distinct, finite coordinates.
#[inline]
pub fn is_valid_line(line: &LineString<f64>) -> bool {
    line.0.windows(2).any(|w| w[0] != w[1]) && line.is_valid()
}

/// Triplegs of one user.
#[derive(Clone, Debug, Default)]
pub struct UserLegs {
    /// Valid triplegs with the fix range each came from.
    pub legs:          Vec<(Tripleg, Range<usize>)>,
    /// Fixes whose tripleg was dropped for invalid geometry.
    pub invalid_fixes: Vec<usize>,
}

/// Run the scan for one user and keep only geometrically valid legs.
pub fn triplegs_for_user(
    user_id:       UserId,
    fixes:         &[Positionfix],
    marks:         &StayMarks,
    gap_threshold: TimeDelta,
) -> UserLegs {
    let mut out = UserLegs::default();
    for range in leg_ranges(fixes, marks, gap_threshold) {
        let tpl = build_tripleg(user_id, &fixes[range.clone()]);
        if is_valid_line(&tpl.geom) {
            out.legs.push((tpl, range));
        } else {
            out.invalid_fixes.extend(range);
        }
    }
    tracing::debug!(
        user_id = user_id.0,
        triplegs = out.legs.len(),
        invalid = out.invalid_fixes.len(),
        "segment scan done"
    );
    out
}
