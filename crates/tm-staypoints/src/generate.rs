//! Collection-level driver: dedupe, sort, fan out per user, renumber,
//! and write membership back onto the positionfixes.

use tm_core::crs::is_planar;
use tm_core::{Positionfixes, StaypointId, Staypoints, Warning, apply_per_user};

use crate::sliding::staypoints_for_user;
use crate::{StaypointConfig, StaypointError, StaypointResult};

/// Result of [`generate_staypoints`].
#[derive(Clone, Debug)]
pub struct StaypointOutput {
    /// Input fixes (minus dropped duplicates), sorted by user then time, with
    /// `staypoint_id` set on every member fix.
    pub positionfixes: Positionfixes,
    pub staypoints:    Staypoints,
    pub warnings:      Vec<Warning>,
}

/// Detect staypoints in `positionfixes`.
///
/// Any `staypoint_id` already present on the input is discarded.  Staypoint
/// ids are dense, in user then time order.
pub fn generate_staypoints(
    positionfixes: &Positionfixes,
    config:        &StaypointConfig,
) -> StaypointResult<StaypointOutput> {
    config.validate()?;

    let mut warnings = Vec::new();
    let mut pfs = positionfixes.clone();
    for pf in &mut pfs.fixes {
        pf.staypoint_id = None;
    }

    if config.exclude_duplicate_pfs {
        let dropped = pfs.drop_duplicates();
        if dropped > 0 {
            warnings.push(Warning::DuplicatesDropped { count: dropped }.emit());
        }
    }
    pfs.sort_by_user_time();

    let params = config.sliding_params(is_planar(pfs.crs.as_ref()));
    let dist = config.distance_metric.distance_fn();

    let ranges = pfs.user_ranges();
    let groups = ranges
        .iter()
        .map(|(user, range)| (*user, &pfs.fixes[range.clone()]))
        .collect();

    let per_user = apply_per_user(groups, config.dispatch, |user, fixes| {
        Ok::<_, StaypointError>(staypoints_for_user(user, fixes, &params, dist))
    })?;

    // ── Concatenate and renumber ──────────────────────────────────────────
    let mut items = Vec::with_capacity(per_user.iter().map(Vec::len).sum());
    for ((_, range), found) in ranges.iter().zip(per_user) {
        for (mut sp, members) in found {
            let id = StaypointId(items.len() as u64);
            sp.id = id;
            for pf in &mut pfs.fixes[range.start + members.start..range.start + members.end] {
                pf.staypoint_id = Some(id);
            }
            items.push(sp);
        }
    }

    if items.is_empty() {
        warnings.push(Warning::NoStaypoints.emit());
    }
    tracing::debug!(staypoints = items.len(), users = ranges.len(), "staypoint detection finished");

    let staypoints = Staypoints::new(pfs.crs, items);
    Ok(StaypointOutput { positionfixes: pfs, staypoints, warnings })
}
