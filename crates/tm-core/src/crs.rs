//! Coordinate reference system tags.
//!
//! Only the distinction needed for distance computation is modelled: whether
//! coordinates are angular (longitude/latitude in degrees) or planar (a
//! projection with linear units, assumed metres).  No reprojection happens
//! anywhere in the workspace.

use std::fmt;
use std::ops::RangeInclusive;

use crate::{CoreError, CoreResult};

/// Angular vs. linear coordinate axes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrsKind {
    /// Longitude/latitude in degrees.
    Geographic,
    /// Projected, locally Euclidean, metre units.
    Projected,
}

/// The coordinate reference system attached to a collection.
///
/// Collections hold `Option<Crs>`; `None` means "unknown" and callers that
/// measure lengths treat it as WGS-84.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs {
    pub epsg: Option<u32>,
    pub kind: CrsKind,
}

/// EPSG codes of common geographic systems (2D and 3D).
const GEOGRAPHIC_EPSG: &[u32] = &[
    4326, // WGS 84
    4979, // WGS 84 (3D)
    4267, // NAD27
    4269, // NAD83
    4152, // NAD83(HARN)
    4617, // NAD83(CSRS)
    4258, // ETRS89
    4937, // ETRS89 (3D)
    4283, // GDA94
    7844, // GDA2020
    4230, // ED50
    4314, // DHDN
    4277, // OSGB36
    4171, // RGF93
    4150, // CH1903+
    4149, // CH1903
    4612, // JGD2000
    6668, // JGD2011
    4490, // CGCS2000
    4674, // SIRGAS 2000
    4167, // NZGD2000
    4019, // Unknown datum based upon the GRS 1980 ellipsoid
];

/// EPSG codes of common projections with metre units.
const PROJECTED_EPSG: &[RangeInclusive<u32>] = &[
    3857..=3857,   // WGS 84 / Pseudo-Mercator
    3395..=3395,   // WGS 84 / World Mercator
    32601..=32660, // WGS 84 / UTM north
    32701..=32760, // WGS 84 / UTM south
    25828..=25838, // ETRS89 / UTM 28N-38N
    26901..=26923, // NAD83 / UTM 1N-23N
    3035..=3035,   // ETRS89 / LAEA Europe
    2056..=2056,   // CH1903+ / LV95
    21781..=21781, // CH1903 / LV03
    27700..=27700, // OSGB36 / British National Grid
    2154..=2154,   // RGF93 / Lambert-93
    28992..=28992, // Amersfoort / RD New
    31466..=31469, // DHDN / Gauss-Kruger zones 2-5
    3006..=3006,   // SWEREF99 TM
    3067..=3067,   // ETRS89 / TM35FIN
    5070..=5070,   // NAD83 / Conus Albers
    2193..=2193,   // NZGD2000 / NZTM
];

impl Crs {
    pub const WGS84: Crs = Crs { epsg: Some(4326), kind: CrsKind::Geographic };

    /// Classify an EPSG code from the built-in tables.
    ///
    /// Codes in neither table are rejected; state the kind explicitly with
    /// [`Crs::geographic`] or [`Crs::projected`] for those.
    pub fn from_epsg(code: u32) -> CoreResult<Self> {
        if GEOGRAPHIC_EPSG.contains(&code) {
            Ok(Crs::geographic(code))
        } else if PROJECTED_EPSG.iter().any(|r| r.contains(&code)) {
            Ok(Crs::projected(code))
        } else {
            Err(CoreError::Crs(format!(
                "EPSG:{code} is not a known code; construct it with Crs::geographic or Crs::projected"
            )))
        }
    }

    pub fn geographic(epsg: u32) -> Self {
        Self { epsg: Some(epsg), kind: CrsKind::Geographic }
    }

    pub fn projected(epsg: u32) -> Self {
        Self { epsg: Some(epsg), kind: CrsKind::Projected }
    }

    /// `true` iff the axes are linear.
    #[inline]
    pub fn is_planar(&self) -> bool {
        self.kind == CrsKind::Projected
    }

    #[inline]
    pub fn is_wgs84(&self) -> bool {
        self.kind == CrsKind::Geographic && self.epsg == Some(4326)
    }
}

/// Planarity of an optional CRS.  An absent CRS is treated as geographic.
#[inline]
pub fn is_planar(crs: Option<&Crs>) -> bool {
    crs.is_some_and(Crs::is_planar)
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(code) => write!(f, "EPSG:{code}"),
            None => match self.kind {
                CrsKind::Geographic => f.write_str("unnamed geographic CRS"),
                CrsKind::Projected => f.write_str("unnamed projected CRS"),
            },
        }
    }
}
