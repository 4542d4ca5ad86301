//! Speed-bucket category mapping.
//!
//! A mapping is an ordered list of `(upper bound in km/h, label)` pairs.  It
//! must cover `(0, ∞]` without gaps: bounds strictly ascending, the first
//! positive, the last `+∞`.  A speed maps to the first bound that is `>=` it.
//! Validation happens once, in [`Categories::new`].

use crate::{ModeError, ModeResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<(f64, String)>", into = "Vec<(f64, String)>"))]
pub struct Categories {
    bounds: Vec<f64>,
    labels: Vec<String>,
}

impl Categories {
    /// Validate and build a mapping from `(bound_kmh, label)` pairs in the
    /// order given.
    pub fn new<L: Into<String>>(pairs: impl IntoIterator<Item = (f64, L)>) -> ModeResult<Self> {
        let (bounds, labels): (Vec<f64>, Vec<String>) =
            pairs.into_iter().map(|(b, l)| (b, l.into())).unzip();

        let (Some(&first), Some(&last)) = (bounds.first(), bounds.last()) else {
            return invalid("at least one category must be defined".into());
        };
        if bounds.iter().any(|b| b.is_nan()) {
            return invalid("bounds must be numbers, got NaN".into());
        }
        if first <= 0.0 {
            return invalid(format!("the smallest bound must be positive, got {first}"));
        }
        if let Some(w) = bounds.windows(2).find(|w| w[0] >= w[1]) {
            return invalid(format!(
                "bounds must be strictly ascending, got {} followed by {}",
                w[0], w[1]
            ));
        }
        if last != f64::INFINITY {
            return invalid(format!(
                "the largest bound must be infinite so every speed has a category, got {last}"
            ));
        }

        Ok(Self { bounds, labels })
    }

    /// Label of the smallest bound `>= speed_kmh`.  NaN falls in the first
    /// category.
    pub fn lookup(&self, speed_kmh: f64) -> &str {
        let i = self.bounds.partition_point(|&b| b < speed_kmh);
        // The last bound is +∞, so `i` is in range for every non-NaN speed.
        &self.labels[i.min(self.labels.len() - 1)]
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &str)> {
        self.bounds.iter().copied().zip(self.labels.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

impl Default for Categories {
    /// Walking/cycling up to 15 km/h, road vehicles up to 100 km/h, faster
    /// transport above.
    fn default() -> Self {
        Self {
            bounds: vec![15.0, 100.0, f64::INFINITY],
            labels: vec![
                "slow_mobility".to_owned(),
                "motorized_mobility".to_owned(),
                "fast_mobility".to_owned(),
            ],
        }
    }
}

fn invalid<T>(msg: String) -> ModeResult<T> {
    Err(ModeError::InvalidCategories(msg))
}

impl TryFrom<Vec<(f64, String)>> for Categories {
    type Error = ModeError;

    fn try_from(pairs: Vec<(f64, String)>) -> ModeResult<Self> {
        Categories::new(pairs)
    }
}

impl From<Categories> for Vec<(f64, String)> {
    fn from(c: Categories) -> Self {
        c.bounds.into_iter().zip(c.labels).collect()
    }
}

/// `Ok(true)` when `pairs` form a valid mapping; the validation error
/// otherwise.
pub fn check_categories<L: Into<String>>(pairs: impl IntoIterator<Item = (f64, L)>) -> ModeResult<bool> {
    Categories::new(pairs).map(|_| true)
}
