//! Collection-level driver.

use std::collections::BTreeMap;

use tm_core::time::minutes;
use tm_core::{Positionfixes, Staypoint, Staypoints, Tripleg, TriplegId, Triplegs, UserId, Warning, apply_per_user};

use crate::intervals::StayMarks;
use crate::segment::{UserLegs, triplegs_for_user};
use crate::{TriplegConfig, TriplegError, TriplegResult};

/// Result of [`generate_triplegs`].
#[derive(Clone, Debug)]
pub struct TriplegOutput {
    /// Input fixes sorted by user then time, with `tripleg_id` set on every
    /// member of a valid tripleg.  `staypoint_id` is passed through as given.
    pub positionfixes: Positionfixes,
    pub triplegs:      Triplegs,
    pub warnings:      Vec<Warning>,
}

/// Segment `positionfixes` into triplegs.
///
/// With `staypoints == None` the fixes' own `staypoint_id` marks stay
/// membership.  With `Some(staypoints)` membership is matched by time
/// interval per user and any `staypoint_id` on the fixes is ignored.
/// Existing `tripleg_id`s are discarded.  Tripleg ids are dense, in user then
/// time order.
pub fn generate_triplegs(
    positionfixes: &Positionfixes,
    staypoints:    Option<&Staypoints>,
    config:        &TriplegConfig,
) -> TriplegResult<TriplegOutput> {
    config.validate()?;

    let mut warnings = Vec::new();
    let mut pfs = positionfixes.clone();
    for pf in &mut pfs.fixes {
        pf.tripleg_id = None;
    }
    pfs.sort_by_user_time();

    let gap_threshold = minutes(config.gap_threshold);
    let stays_by_user: BTreeMap<UserId, Vec<&Staypoint>> = staypoints.map(Staypoints::by_user).unwrap_or_default();

    let ranges = pfs.user_ranges();
    let groups = ranges
        .iter()
        .map(|(user, range)| (*user, &pfs.fixes[range.clone()]))
        .collect();

    let per_user = apply_per_user(groups, config.dispatch, |user, fixes| {
        let marks = match staypoints {
            None => StayMarks::from_labels(fixes),
            Some(_) => {
                let stays = stays_by_user.get(&user).map(Vec::as_slice).unwrap_or(&[]);
                StayMarks::from_intervals(fixes, stays)
            }
        };
        let legs = triplegs_for_user(user, fixes, &marks, gap_threshold);
        Ok::<(UserLegs, Vec<_>), TriplegError>((legs, marks.unmatched))
    })?;

    // ── Concatenate and renumber ──────────────────────────────────────────
    let mut items: Vec<Tripleg> = Vec::new();
    let mut invalid_ids = Vec::new();
    for ((user, range), (legs, unmatched)) in ranges.iter().zip(per_user) {
        for staypoint_id in unmatched {
            warnings.push(Warning::UnmatchedStaypointBoundary { user_id: *user, staypoint_id }.emit());
        }
        for (mut tpl, members) in legs.legs {
            let id = TriplegId(items.len() as u64);
            tpl.id = id;
            for pf in &mut pfs.fixes[range.start + members.start..range.start + members.end] {
                pf.tripleg_id = Some(id);
            }
            items.push(tpl);
        }
        invalid_ids.extend(legs.invalid_fixes.into_iter().map(|i| pfs.fixes[range.start + i].id));
    }

    if !invalid_ids.is_empty() {
        warnings.push(Warning::InvalidTriplegs { positionfix_ids: invalid_ids }.emit());
    }
    if items.is_empty() {
        warnings.push(Warning::NoTriplegs.emit());
    }
    tracing::debug!(triplegs = items.len(), users = ranges.len(), "tripleg segmentation finished");

    let triplegs = Triplegs::new(pfs.crs, items);
    Ok(TriplegOutput { positionfixes: pfs, triplegs, warnings })
}
