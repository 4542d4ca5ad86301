//! The simple-coarse classifier.

use tm_core::geometry::line_length_m;
use tm_core::time::elapsed_secs;
use tm_core::{Crs, Tripleg, Triplegs, Warning};

use crate::{ModeConfig, ModeError, ModeMethod, ModeResult};

/// Result of [`predict_transport_mode`].
#[derive(Clone, Debug)]
pub struct ModeOutput {
    /// Input triplegs with `mode` set; segmentation is untouched.
    pub triplegs: Triplegs,
    pub warnings: Vec<Warning>,
}

/// How lengths are measured for a collection's CRS.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LengthPolicy {
    /// Haversine on lon/lat, metres.
    Haversine,
    /// Euclidean in CRS units, assumed metres.
    Planar,
}

impl LengthPolicy {
    /// Pick the length computation for `crs`.
    ///
    /// An absent CRS is assumed to be WGS-84 and reported with a warning.
    /// A geographic CRS other than WGS-84 is rejected, since summing its
    /// degrees would give meaningless speeds.
    pub fn for_crs(crs: Option<&Crs>) -> ModeResult<(Self, Option<Warning>)> {
        match crs {
            None => Ok((LengthPolicy::Haversine, Some(Warning::CrsAssumedWgs84))),
            Some(c) if c.is_planar() => Ok((LengthPolicy::Planar, None)),
            Some(c) if c.is_wgs84() => Ok((LengthPolicy::Haversine, None)),
            Some(c) => Err(ModeError::GeographicCrs(*c)),
        }
    }

    #[inline]
    fn is_planar(self) -> bool {
        self == LengthPolicy::Planar
    }
}

/// Mean speed of `tpl` in km/h.
///
/// A zero-duration tripleg is infinitely fast unless it also has zero
/// length, in which case it is stationary.
pub fn tripleg_speed_kmh(tpl: &Tripleg, policy: LengthPolicy) -> f64 {
    let length_m = line_length_m(&tpl.geom, policy.is_planar());
    let secs = elapsed_secs(tpl.started_at, tpl.finished_at);
    if secs > 0.0 {
        length_m / secs * 3.6
    } else if length_m > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Assign a coarse transport mode to every tripleg from its mean speed.
///
/// Fails fast on an empty collection: at this stage an empty input is far
/// more likely a caller mistake than real data.
pub fn predict_transport_mode(triplegs: &Triplegs, config: &ModeConfig) -> ModeResult<ModeOutput> {
    if triplegs.is_empty() {
        return Err(ModeError::EmptyTriplegs);
    }

    match config.method {
        ModeMethod::SimpleCoarse => {
            let (policy, warning) = LengthPolicy::for_crs(triplegs.crs.as_ref())?;
            let warnings: Vec<Warning> = warning.into_iter().map(Warning::emit).collect();

            let mut out = triplegs.clone();
            for tpl in &mut out.items {
                let speed = tripleg_speed_kmh(tpl, policy);
                tpl.mode = Some(config.categories.lookup(speed).to_owned());
            }
            tracing::debug!(triplegs = out.len(), ?policy, "transport modes assigned");

            Ok(ModeOutput { triplegs: out, warnings })
        }
    }
}
