//! Tripleg segmentation settings.

use std::fmt;
use std::str::FromStr;

use tm_core::Dispatch;
use tm_core::time::check_threshold;

use crate::{TriplegError, TriplegResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriplegMethod {
    /// Movement is every run of fixes outside staypoints.
    #[default]
    BetweenStaypoints,
}

impl FromStr for TriplegMethod {
    type Err = TriplegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "between_staypoints" => Ok(TriplegMethod::BetweenStaypoints),
            other => Err(TriplegError::UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for TriplegMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriplegMethod::BetweenStaypoints => f.write_str("between_staypoints"),
        }
    }
}

/// Configuration for [`generate_triplegs`](crate::generate_triplegs).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TriplegConfig {
    pub method:        TriplegMethod,
    /// Minutes.  A strictly longer gap between consecutive fixes starts a
    /// new tripleg.
    pub gap_threshold: f64,
    pub dispatch:      Dispatch,
}

impl Default for TriplegConfig {
    fn default() -> Self {
        Self {
            method:        TriplegMethod::BetweenStaypoints,
            gap_threshold: 15.0,
            dispatch:      Dispatch::default(),
        }
    }
}

impl TriplegConfig {
    pub fn validate(&self) -> TriplegResult<()> {
        check_threshold("gap_threshold", self.gap_threshold)?;
        Ok(())
    }
}
