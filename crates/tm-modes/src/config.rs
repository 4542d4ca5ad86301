//! Classifier settings.

use std::fmt;
use std::str::FromStr;

use crate::{Categories, ModeError};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeMethod {
    /// Mean speed of the whole tripleg looked up in a [`Categories`] table.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "simple-coarse"))]
    SimpleCoarse,
}

impl FromStr for ModeMethod {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple-coarse" => Ok(ModeMethod::SimpleCoarse),
            other => Err(ModeError::UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for ModeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeMethod::SimpleCoarse => f.write_str("simple-coarse"),
        }
    }
}

/// Configuration for [`predict_transport_mode`](crate::predict_transport_mode).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModeConfig {
    pub method:     ModeMethod,
    pub categories: Categories,
}

impl ModeConfig {
    pub fn with_categories(categories: Categories) -> Self {
        Self { method: ModeMethod::SimpleCoarse, categories }
    }
}
