//! Unit tests for tm-modes.

use chrono::{TimeDelta, TimeZone, Utc};
use geo::LineString;

use tm_core::{Crs, Timestamp, Tripleg, TriplegId, Triplegs, UserId};

// ── Helpers ───────────────────────────────────────────────────────────────────

const LAT0: f64 = 47.0;
const LON0: f64 = 8.5;
const M_PER_DEG_LAT: f64 = 111_194.93;

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2021, 6, 1, 8, 0, 0).unwrap()
}

/// A tripleg heading due north `km` kilometres over `minutes`, sampled in
/// four equal steps, starting `start_km` north of the reference point.
fn northbound(id: u64, start_km: f64, km: f64, minutes: i64) -> Tripleg {
    let coords: Vec<(f64, f64)> = (0..=4)
        .map(|i| (LON0, LAT0 + (start_km + km * i as f64 / 4.0) * 1_000.0 / M_PER_DEG_LAT))
        .collect();
    Tripleg {
        id:          TriplegId(id),
        user_id:     UserId(0),
        started_at:  t0(),
        finished_at: t0() + TimeDelta::minutes(minutes),
        geom:        LineString::from(coords),
        pfs_id:      Vec::new(),
        mode:        None,
    }
}

/// Walk at 4 km/h, drive at 60 km/h, fly at 300 km/h.
fn three_legs(crs: Option<Crs>) -> Triplegs {
    Triplegs::new(crs, vec![northbound(0, 0.0, 1.0, 15), northbound(1, 2.0, 10.0, 10), northbound(2, 20.0, 50.0, 10)])
}

/// The same legs with coordinates expressed in local metres.
fn three_legs_projected() -> Triplegs {
    let mut tpls = three_legs(Some(Crs::projected(2056)));
    for tpl in &mut tpls.items {
        for c in &mut tpl.geom.0 {
            c.x = 2_600_000.0 + (c.x - LON0) * M_PER_DEG_LAT * LAT0.to_radians().cos();
            c.y = 1_200_000.0 + (c.y - LAT0) * M_PER_DEG_LAT;
        }
    }
    tpls
}

fn modes(tpls: &Triplegs) -> Vec<&str> {
    tpls.items.iter().map(|t| t.mode.as_deref().unwrap_or("")).collect()
}

const EXPECTED: [&str; 3] = ["slow_mobility", "motorized_mobility", "fast_mobility"];

// ── Categories ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod categories {
    use crate::{Categories, ModeError, check_categories};

    fn three() -> Categories {
        Categories::new([(2.0, "cat1"), (7.0, "cat2"), (f64::INFINITY, "cat3")]).unwrap()
    }

    #[test]
    fn lookup_is_inclusive_upper_bound() {
        let c = three();
        assert_eq!(c.lookup(0.0), "cat1");
        assert_eq!(c.lookup(2.0), "cat1");
        assert_eq!(c.lookup(2.0001), "cat2");
        assert_eq!(c.lookup(7.0), "cat2");
        assert_eq!(c.lookup(7.5), "cat3");
        assert_eq!(c.lookup(1e9), "cat3");
        assert_eq!(c.lookup(f64::INFINITY), "cat3");
    }

    #[test]
    fn valid_mapping_accepted() {
        assert!(check_categories([(2.0, "cat1"), (7.0, "cat2"), (f64::INFINITY, "cat3")]).unwrap());
    }

    #[test]
    fn out_of_order_rejected() {
        let err = check_categories([(10.0, "cat1"), (5.0, "cat2"), (f64::INFINITY, "cat3")]).unwrap_err();
        assert!(matches!(err, ModeError::InvalidCategories(_)));
    }

    #[test]
    fn missing_infinite_bound_rejected() {
        assert!(Categories::new([(2.0, "cat1"), (7.0, "cat2")]).is_err());
    }

    #[test]
    fn degenerate_mappings_rejected() {
        assert!(Categories::new(Vec::<(f64, String)>::new()).is_err());
        assert!(Categories::new([(0.0, "still"), (f64::INFINITY, "moving")]).is_err());
        assert!(Categories::new([(f64::NAN, "a"), (f64::INFINITY, "b")]).is_err());
        assert!(Categories::new([(5.0, "a"), (5.0, "b"), (f64::INFINITY, "c")]).is_err());
    }

    #[test]
    fn default_table() {
        let c = Categories::default();
        let bounds: Vec<f64> = c.iter().map(|(b, _)| b).collect();
        assert_eq!(bounds, [15.0, 100.0, f64::INFINITY]);
        assert_eq!(c.lookup(4.0), "slow_mobility");
    }
}

#[cfg(test)]
mod config {
    use crate::ModeMethod;

    #[test]
    fn parse_method() {
        assert_eq!("simple-coarse".parse::<ModeMethod>().unwrap(), ModeMethod::SimpleCoarse);
        let err = "deep".parse::<ModeMethod>().unwrap_err();
        assert!(err.to_string().contains("deep"));
    }
}

// ── Classification ────────────────────────────────────────────────────────────

#[cfg(test)]
mod classify {
    use super::*;
    use tm_core::Warning;

    use crate::{Categories, LengthPolicy, ModeConfig, ModeError, predict_transport_mode, tripleg_speed_kmh};

    #[test]
    fn absent_crs_assumes_wgs84_and_warns() {
        let out = predict_transport_mode(&three_legs(None), &ModeConfig::default()).unwrap();
        assert_eq!(modes(&out.triplegs), EXPECTED);
        assert_eq!(out.warnings, [Warning::CrsAssumedWgs84]);
        assert!(out.warnings[0].to_string().contains("WGS84 is assumed"));
    }

    #[test]
    fn wgs84() {
        let out = predict_transport_mode(&three_legs(Some(Crs::WGS84)), &ModeConfig::default()).unwrap();
        assert_eq!(modes(&out.triplegs), EXPECTED);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn projected() {
        let out = predict_transport_mode(&three_legs_projected(), &ModeConfig::default()).unwrap();
        assert_eq!(modes(&out.triplegs), EXPECTED);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn other_geographic_crs_fails() {
        for code in [4269, 4267, 4979] {
            let crs = Crs::from_epsg(code).unwrap();
            let err = predict_transport_mode(&three_legs(Some(crs)), &ModeConfig::default()).unwrap_err();
            assert!(matches!(&err, ModeError::GeographicCrs(c) if c.epsg == Some(code)), "EPSG:{code}");
            assert!(err.to_string().contains("geographic coordinate system"));
        }
    }

    #[test]
    fn unlisted_geographic_crs_fails() {
        let err = predict_transport_mode(&three_legs(Some(Crs::geographic(4999))), &ModeConfig::default())
            .unwrap_err();
        assert!(matches!(err, ModeError::GeographicCrs(_)));
        assert!(Crs::from_epsg(4999).is_err());
    }

    #[test]
    fn empty_collection_fails_fast() {
        let err = predict_transport_mode(&Triplegs::new(Some(Crs::WGS84), Vec::new()), &ModeConfig::default()).unwrap_err();
        assert!(matches!(err, ModeError::EmptyTriplegs));
    }

    #[test]
    fn speeds_match_construction() {
        let tpls = three_legs(Some(Crs::WGS84));
        let speeds: Vec<f64> = tpls.items.iter().map(|t| tripleg_speed_kmh(t, LengthPolicy::Haversine)).collect();
        for (got, want) in speeds.iter().zip([4.0, 60.0, 300.0]) {
            assert!((got - want).abs() / want < 1e-3, "got {got}, want {want}");
        }
    }

    #[test]
    fn zero_duration() {
        let mut moving = northbound(0, 0.0, 1.0, 0);
        assert_eq!(tripleg_speed_kmh(&moving, LengthPolicy::Haversine), f64::INFINITY);
        moving.geom = LineString::from(vec![(LON0, LAT0), (LON0, LAT0)]);
        assert_eq!(tripleg_speed_kmh(&moving, LengthPolicy::Haversine), 0.0);
    }

    #[test]
    fn custom_categories_and_segmentation_untouched() {
        let cats = Categories::new([(50.0, "ground"), (f64::INFINITY, "air")]).unwrap();
        let input = three_legs(Some(Crs::WGS84));
        let out = predict_transport_mode(&input, &ModeConfig::with_categories(cats)).unwrap();
        assert_eq!(modes(&out.triplegs), ["ground", "air", "air"]);
        for (a, b) in input.items.iter().zip(&out.triplegs.items) {
            assert_eq!(a.geom, b.geom);
            assert_eq!(a.started_at, b.started_at);
        }
    }
}
