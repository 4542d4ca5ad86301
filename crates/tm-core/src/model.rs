//! Positionfixes and the two aggregates derived from them.
//!
//! Positionfixes are the source of truth.  Staypoints and triplegs hold
//! back-references (`pfs_id`) into positionfix ids; positionfixes point at
//! their aggregate through nullable foreign keys.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use geo::{LineString, Point};

use crate::{Crs, PositionfixId, StaypointId, Timestamp, TriplegId, UserId};

// ── Positionfix ───────────────────────────────────────────────────────────────

/// One timestamped GPS sample.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Positionfix {
    pub id:           PositionfixId,
    pub user_id:      UserId,
    pub tracked_at:   Timestamp,
    pub geom:         Point<f64>,
    pub elevation:    Option<f64>,
    /// Set by the staypoint detector.
    pub staypoint_id: Option<StaypointId>,
    /// Set by the tripleg segmenter.
    pub tripleg_id:   Option<TriplegId>,
}

impl Positionfix {
    pub fn new(id: PositionfixId, user_id: UserId, tracked_at: Timestamp, geom: Point<f64>) -> Self {
        Self {
            id,
            user_id,
            tracked_at,
            geom,
            elevation: None,
            staypoint_id: None,
            tripleg_id: None,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }
}

/// A collection of positionfixes sharing one CRS.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Positionfixes {
    pub crs:   Option<Crs>,
    pub fixes: Vec<Positionfix>,
}

/// Hashable identity of a fix's content, ignoring its id.
type FixKey = (UserId, Timestamp, u64, u64, Option<u64>, Option<StaypointId>, Option<TriplegId>);

fn fix_key(pf: &Positionfix) -> FixKey {
    (
        pf.user_id,
        pf.tracked_at,
        pf.geom.x().to_bits(),
        pf.geom.y().to_bits(),
        pf.elevation.map(f64::to_bits),
        pf.staypoint_id,
        pf.tripleg_id,
    )
}

impl Positionfixes {
    pub fn new(crs: Option<Crs>, fixes: Vec<Positionfix>) -> Self {
        Self { crs, fixes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn has_elevation(&self) -> bool {
        self.fixes.iter().any(|pf| pf.elevation.is_some())
    }

    /// Stable sort by `(user_id, tracked_at)`; ties keep their input order.
    pub fn sort_by_user_time(&mut self) {
        self.fixes.sort_by_key(|pf| (pf.user_id, pf.tracked_at));
    }

    /// Remove fixes whose content repeats an earlier fix.  Returns the number
    /// of fixes dropped.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.fixes.len();
        let mut seen: HashSet<FixKey> = HashSet::with_capacity(before);
        self.fixes.retain(|pf| seen.insert(fix_key(pf)));
        before - self.fixes.len()
    }

    /// Contiguous index range of each user's fixes.
    ///
    /// Requires the collection to be sorted by user (see
    /// [`sort_by_user_time`](Self::sort_by_user_time)).
    pub fn user_ranges(&self) -> Vec<(UserId, Range<usize>)> {
        let mut ranges: Vec<(UserId, Range<usize>)> = Vec::new();
        for (i, pf) in self.fixes.iter().enumerate() {
            match ranges.last_mut() {
                Some((user, range)) if *user == pf.user_id => range.end = i + 1,
                _ => ranges.push((pf.user_id, i..i + 1)),
            }
        }
        ranges
    }

    /// Mean `(x, y)` of all fixes.
    pub fn center(&self) -> Option<(f64, f64)> {
        if self.fixes.is_empty() {
            return None;
        }
        let n = self.fixes.len() as f64;
        let (sx, sy) = self
            .fixes
            .iter()
            .fold((0.0, 0.0), |(sx, sy), pf| (sx + pf.geom.x(), sy + pf.geom.y()));
        Some((sx / n, sy / n))
    }
}

// ── Staypoint ─────────────────────────────────────────────────────────────────

/// A stationary episode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Staypoint {
    pub id:          StaypointId,
    pub user_id:     UserId,
    pub started_at:  Timestamp,
    pub finished_at: Timestamp,
    /// Centroid of the member fixes.
    pub geom:        Point<f64>,
    /// Median member elevation, if any member carries one.
    pub elevation:   Option<f64>,
    /// Member positionfix ids in time order.
    pub pfs_id:      Vec<PositionfixId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Staypoints {
    pub crs:   Option<Crs>,
    pub items: Vec<Staypoint>,
}

impl Staypoints {
    pub fn new(crs: Option<Crs>, items: Vec<Staypoint>) -> Self {
        Self { crs, items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Staypoints grouped by user, each group in input order.
    pub fn by_user(&self) -> BTreeMap<UserId, Vec<&Staypoint>> {
        let mut groups: BTreeMap<UserId, Vec<&Staypoint>> = BTreeMap::new();
        for sp in &self.items {
            groups.entry(sp.user_id).or_default().push(sp);
        }
        groups
    }
}

// ── Tripleg ───────────────────────────────────────────────────────────────────

/// A movement episode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tripleg {
    pub id:          TriplegId,
    pub user_id:     UserId,
    pub started_at:  Timestamp,
    pub finished_at: Timestamp,
    /// Line through the member fixes in time order.
    pub geom:        LineString<f64>,
    /// Member positionfix ids in time order.  Empty when the tripleg was
    /// loaded from a file that does not record them.
    pub pfs_id:      Vec<PositionfixId>,
    /// Coarse transport mode label, set by the mode classifier.
    pub mode:        Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triplegs {
    pub crs:   Option<Crs>,
    pub items: Vec<Tripleg>,
}

impl Triplegs {
    pub fn new(crs: Option<Crs>, items: Vec<Tripleg>) -> Self {
        Self { crs, items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
