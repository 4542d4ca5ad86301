//! Unit tests for tm-triplegs.

use chrono::{TimeDelta, TimeZone, Utc};
use geo::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tm_core::{Crs, Positionfix, PositionfixId, Positionfixes, Staypoint, StaypointId, Staypoints, Timestamp, UserId};

use crate::{TriplegConfig, generate_triplegs};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2021, 6, 1, 8, 0, 0).unwrap()
}

fn at(min: i64) -> Timestamp {
    t0() + TimeDelta::minutes(min)
}

/// Planar fix for user 0 at `min` minutes, `x` metres east.
fn fix(id: u64, min: i64, x: f64, sp: Option<u64>) -> Positionfix {
    let mut pf = Positionfix::new(PositionfixId(id), UserId(0), at(min), Point::new(x, 0.0));
    pf.staypoint_id = sp.map(StaypointId);
    pf
}

/// `(minute, x, staypoint)` rows for user 0 in a projected CRS.
fn labeled(rows: &[(i64, f64, Option<u64>)]) -> Positionfixes {
    let fixes = rows
        .iter()
        .enumerate()
        .map(|(i, &(min, x, sp))| fix(i as u64, min, x, sp))
        .collect();
    Positionfixes::new(Some(Crs::projected(2056)), fixes)
}

fn staypoint(id: u64, user: u64, start: i64, end: i64) -> Staypoint {
    Staypoint {
        id:          StaypointId(id),
        user_id:     UserId(user),
        started_at:  at(start),
        finished_at: at(end),
        geom:        Point::new(0.0, 0.0),
        elevation:   None,
        pfs_id:      Vec::new(),
    }
}

fn leg_ids(pfs: &Positionfixes) -> Vec<Option<u64>> {
    pfs.fixes.iter().map(|pf| pf.tripleg_id.map(|t| t.0)).collect()
}

/// Randomised lon/lat multi-user track with dwell phases, movement phases and
/// sampling gaps.
fn random_track(seed: u64, users: u64) -> Positionfixes {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut fixes = Vec::new();
    let mut id = 0;
    for user in 0..users {
        let mut secs = 0i64;
        let (mut lon, mut lat) = (8.54, 47.37);
        for _phase in 0..10 {
            let dwell = rng.gen_bool(0.5);
            let (clon, clat) = (lon, lat);
            for _ in 0..rng.gen_range(2..25) {
                if dwell {
                    secs += rng.gen_range(30..120);
                    lon = clon + rng.gen_range(-0.0001..0.0001);
                    lat = clat + rng.gen_range(-0.0001..0.0001);
                } else {
                    secs += rng.gen_range(5..60);
                    lon += rng.gen_range(0.0003..0.002);
                    lat += rng.gen_range(-0.0005..0.0005);
                }
                let t = t0() + TimeDelta::seconds(secs);
                fixes.push(Positionfix::new(PositionfixId(id), UserId(user), t, Point::new(lon, lat)));
                id += 1;
            }
            if rng.gen_bool(0.15) {
                secs += rng.gen_range(16 * 60..60 * 60);
            }
        }
    }
    Positionfixes::new(Some(Crs::WGS84), fixes)
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{TriplegConfig, TriplegMethod};

    #[test]
    fn defaults() {
        let c = TriplegConfig::default();
        assert_eq!(c.method, TriplegMethod::BetweenStaypoints);
        assert_eq!(c.gap_threshold, 15.0);
    }

    #[test]
    fn unsupported_method_is_named() {
        let err = "between_tracks".parse::<TriplegMethod>().unwrap_err();
        assert!(err.to_string().contains("between_tracks"));
        assert!("between_staypoints".parse::<TriplegMethod>().is_ok());
    }
}

// ── Labeled fixes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod labeled_input {
    use super::*;
    use tm_core::Warning;

    #[test]
    fn legs_between_stays() {
        let pfs = labeled(&[
            (0, 0.0, Some(0)),
            (1, 0.0, Some(0)),
            (2, 100.0, None),
            (3, 200.0, None),
            (4, 300.0, None),
            (5, 300.0, Some(1)),
            (6, 300.0, Some(1)),
            (7, 400.0, None),
            (8, 500.0, None),
        ]);
        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();

        assert_eq!(out.triplegs.len(), 2);
        assert_eq!(leg_ids(&out.positionfixes), [None, None, Some(0), Some(0), Some(0), None, None, Some(1), Some(1)]);

        let first = &out.triplegs.items[0];
        assert_eq!(first.started_at, at(2));
        assert_eq!(first.finished_at, at(4));
        assert_eq!(first.geom.0.len(), 3);
        assert_eq!(first.pfs_id, [PositionfixId(2), PositionfixId(3), PositionfixId(4)]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn gap_equal_to_threshold_does_not_split() {
        let pfs = labeled(&[(0, 0.0, None), (15, 100.0, None), (16, 200.0, None)]);
        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();
        assert_eq!(out.triplegs.len(), 1);
    }

    #[test]
    fn gap_above_threshold_splits() {
        let pfs = labeled(&[(0, 0.0, None), (1, 50.0, None), (17, 100.0, None), (18, 200.0, None)]);
        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();
        assert_eq!(out.triplegs.len(), 2);
        assert_eq!(leg_ids(&out.positionfixes), [Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn single_fix_between_stays_gets_no_leg() {
        let pfs = labeled(&[(0, 0.0, Some(0)), (1, 100.0, None), (2, 200.0, Some(1)), (3, 300.0, None), (4, 400.0, None)]);
        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();
        assert_eq!(leg_ids(&out.positionfixes), [None, None, None, Some(0), Some(0)]);
    }

    #[test]
    fn collapsed_geometry_dropped_with_warning() {
        let pfs = labeled(&[(0, 0.0, Some(0)), (1, 50.0, None), (2, 50.0, None), (3, 80.0, Some(1)), (4, 90.0, None), (5, 95.0, None)]);
        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();

        assert_eq!(out.triplegs.len(), 1);
        assert_eq!(out.triplegs.items[0].id.0, 0);
        assert_eq!(leg_ids(&out.positionfixes), [None, None, None, None, Some(0), Some(0)]);
        assert_eq!(
            out.warnings,
            [Warning::InvalidTriplegs { positionfix_ids: vec![PositionfixId(1), PositionfixId(2)] }]
        );
    }

    #[test]
    fn empty_input_warns() {
        let out = generate_triplegs(&Positionfixes::default(), None, &TriplegConfig::default()).unwrap();
        assert!(out.triplegs.is_empty());
        assert_eq!(out.warnings, [Warning::NoTriplegs]);
    }

    #[test]
    fn new_user_opens_leg() {
        let mut pfs = labeled(&[(0, 0.0, None), (1, 100.0, None)]);
        let mut other = fix(10, 2, 200.0, None);
        other.user_id = UserId(1);
        let mut other2 = fix(11, 3, 300.0, None);
        other2.user_id = UserId(1);
        pfs.fixes.extend([other, other2]);

        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();
        assert_eq!(out.triplegs.len(), 2);
        assert_eq!(out.triplegs.items[1].user_id, UserId(1));
    }

    #[test]
    fn previous_legs_discarded() {
        let mut pfs = labeled(&[(0, 0.0, Some(0)), (1, 100.0, Some(0))]);
        pfs.fixes[0].tripleg_id = Some(tm_core::TriplegId(5));
        let out = generate_triplegs(&pfs, None, &TriplegConfig::default()).unwrap();
        assert!(out.positionfixes.fixes.iter().all(|pf| pf.tripleg_id.is_none()));
    }
}

// ── Interval matching ─────────────────────────────────────────────────────────

#[cfg(test)]
mod interval_input {
    use super::*;
    use tm_core::Warning;

    use crate::StayMarks;

    #[test]
    fn closed_open_containment() {
        let pfs = labeled(&[(0, 0.0, None), (5, 0.0, None), (10, 0.0, None), (11, 100.0, None)]);
        let sp = staypoint(0, 0, 0, 10);
        let marks = StayMarks::from_intervals(&pfs.fixes, &[&sp]);
        assert_eq!(marks.in_stay, [true, true, false, false]);
        assert_eq!(marks.boundary, [false, false, true, false]);
        assert!(marks.unmatched.is_empty());
    }

    #[test]
    fn overlapping_intervals() {
        let pfs = labeled(&[(1, 0.0, None), (4, 0.0, None), (7, 0.0, None)]);
        let a = staypoint(0, 0, 0, 6);
        let b = staypoint(1, 0, 2, 3);
        let marks = StayMarks::from_intervals(&pfs.fixes, &[&b, &a]);
        assert_eq!(marks.in_stay, [true, true, false]);
    }

    #[test]
    fn boundary_without_fix_on_it_still_splits() {
        // The staypoint covers no fix at all; the fix after it must open a leg.
        let pfs = labeled(&[(0, 0.0, None), (1, 100.0, None), (2, 200.0, None), (6, 300.0, None), (7, 400.0, None)]);
        let sps = Staypoints::new(pfs.crs, vec![staypoint(0, 0, 3, 5)]);
        let out = generate_triplegs(&pfs, Some(&sps), &TriplegConfig::default()).unwrap();

        assert_eq!(out.triplegs.len(), 2);
        assert_eq!(leg_ids(&out.positionfixes), [Some(0), Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn unmatched_boundary_warns_and_continues() {
        let pfs = labeled(&[(0, 0.0, None), (1, 100.0, None), (2, 200.0, None)]);
        let sps = Staypoints::new(pfs.crs, vec![staypoint(3, 0, 1, 9)]);
        let out = generate_triplegs(&pfs, Some(&sps), &TriplegConfig::default()).unwrap();

        assert!(out.warnings.contains(&Warning::UnmatchedStaypointBoundary {
            user_id:      UserId(0),
            staypoint_id: StaypointId(3),
        }));
        // Fix at minute 0 is alone before the stay.
        assert!(out.triplegs.is_empty());
    }

    #[test]
    fn other_users_staypoints_ignored() {
        let pfs = labeled(&[(0, 0.0, None), (1, 100.0, None), (2, 200.0, None)]);
        let sps = Staypoints::new(pfs.crs, vec![staypoint(0, 9, 0, 2)]);
        let out = generate_triplegs(&pfs, Some(&sps), &TriplegConfig::default()).unwrap();
        assert_eq!(leg_ids(&out.positionfixes), [Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn staypoint_labels_pass_through() {
        let pfs = labeled(&[(0, 0.0, None), (1, 100.0, None)]);
        let sps = Staypoints::new(pfs.crs, vec![staypoint(0, 0, 0, 1)]);
        let out = generate_triplegs(&pfs, Some(&sps), &TriplegConfig::default()).unwrap();
        assert!(out.positionfixes.fixes.iter().all(|pf| pf.staypoint_id.is_none()));
    }
}

// ── Pipeline properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;
    use tm_core::Dispatch;
    use tm_staypoints::{StaypointConfig, generate_staypoints};

    use crate::is_valid_line;

    #[test]
    fn triplegs_are_well_formed() {
        let sp = generate_staypoints(&random_track(3, 5), &StaypointConfig::default()).unwrap();
        let out = generate_triplegs(&sp.positionfixes, None, &TriplegConfig::default()).unwrap();
        assert!(!out.triplegs.is_empty());

        for tpl in &out.triplegs.items {
            assert!(tpl.pfs_id.len() >= 2);
            assert!(tpl.finished_at >= tpl.started_at);
            assert!(is_valid_line(&tpl.geom));
        }
        for pf in &out.positionfixes.fixes {
            assert!(!(pf.staypoint_id.is_some() && pf.tripleg_id.is_some()));
        }
    }

    #[test]
    fn interval_matching_reproduces_labeled_boundaries() {
        for seed in [1, 2, 3, 4] {
            let sp = generate_staypoints(&random_track(seed, 3), &StaypointConfig::default()).unwrap();
            let labeled = generate_triplegs(&sp.positionfixes, None, &TriplegConfig::default()).unwrap();

            let mut unlabeled = sp.positionfixes.clone();
            for pf in &mut unlabeled.fixes {
                pf.staypoint_id = None;
            }
            let matched = generate_triplegs(&unlabeled, Some(&sp.staypoints), &TriplegConfig::default()).unwrap();

            assert_eq!(labeled.triplegs.items, matched.triplegs.items, "seed {seed}");
            assert_eq!(leg_ids(&labeled.positionfixes), leg_ids(&matched.positionfixes), "seed {seed}");
        }
    }

    #[test]
    fn parallel_dispatch_matches_sequential() {
        let sp = generate_staypoints(&random_track(9, 6), &StaypointConfig::default()).unwrap();
        let seq = generate_triplegs(&sp.positionfixes, None, &TriplegConfig::default()).unwrap();
        let mut cfg = TriplegConfig::default();
        cfg.dispatch = Dispatch::new(0, true);
        let par = generate_triplegs(&sp.positionfixes, None, &cfg).unwrap();
        assert_eq!(seq.triplegs, par.triplegs);
        assert_eq!(seq.positionfixes, par.positionfixes);
        assert_eq!(seq.warnings, par.warnings);
    }
}
