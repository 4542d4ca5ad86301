//! Staypoint detection settings.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use tm_core::Dispatch;
use tm_core::geometry::{PointDistance, haversine_m};
use tm_core::time::{check_threshold, minutes};

use crate::{StaypointError, StaypointResult};

/// Detection algorithm.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StaypointMethod {
    /// Sliding window after Li et al. (2008).
    #[default]
    Sliding,
}

impl FromStr for StaypointMethod {
    type Err = StaypointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sliding" => Ok(StaypointMethod::Sliding),
            other => Err(StaypointError::UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for StaypointMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaypointMethod::Sliding => f.write_str("sliding"),
        }
    }
}

/// Point-to-point distance used to test window containment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// Great-circle distance in metres on lon/lat input.
    #[default]
    Haversine,
}

impl DistanceMetric {
    pub fn distance_fn(self) -> PointDistance {
        match self {
            DistanceMetric::Haversine => haversine_m,
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = StaypointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "haversine" => Ok(DistanceMetric::Haversine),
            other => Err(StaypointError::UnsupportedMetric(other.to_owned())),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Haversine => f.write_str("haversine"),
        }
    }
}

/// Configuration for [`generate_staypoints`](crate::generate_staypoints).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaypointConfig {
    pub method:                StaypointMethod,
    pub distance_metric:       DistanceMetric,
    /// Metres (or CRS units for a metric that measures in them).  A fix at
    /// least this far from the window anchor closes the window.
    pub dist_threshold:        f64,
    /// Minutes.  Minimum dwell for a window to become a staypoint.
    pub time_threshold:        f64,
    /// Minutes.  A longer sampling gap restarts the window.
    pub gap_threshold:         f64,
    /// Turn the still-open window at the end of a user's track into a
    /// staypoint if it dwelt long enough.
    pub include_last:          bool,
    /// Drop exact duplicate fixes before processing.
    pub exclude_duplicate_pfs: bool,
    pub dispatch:              Dispatch,
}

impl Default for StaypointConfig {
    fn default() -> Self {
        Self {
            method:                StaypointMethod::Sliding,
            distance_metric:       DistanceMetric::Haversine,
            dist_threshold:        100.0,
            time_threshold:        5.0,
            gap_threshold:         15.0,
            include_last:          false,
            exclude_duplicate_pfs: true,
            dispatch:              Dispatch::default(),
        }
    }
}

impl StaypointConfig {
    pub fn validate(&self) -> StaypointResult<()> {
        check_threshold("dist_threshold", self.dist_threshold)?;
        check_threshold("time_threshold", self.time_threshold)?;
        check_threshold("gap_threshold", self.gap_threshold)?;
        Ok(())
    }

    /// Resolve thresholds into the form the scan consumes.
    pub fn sliding_params(&self, planar: bool) -> SlidingParams {
        SlidingParams {
            dist_threshold: self.dist_threshold,
            time_threshold: minutes(self.time_threshold),
            gap_threshold:  minutes(self.gap_threshold),
            include_last:   self.include_last,
            planar,
        }
    }
}

/// Immutable per-run parameters of the sliding scan.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlidingParams {
    pub dist_threshold: f64,
    pub time_threshold: TimeDelta,
    pub gap_threshold:  TimeDelta,
    pub include_last:   bool,
    /// Whether coordinates are planar; selects the centroid flavour.
    pub planar:         bool,
}
