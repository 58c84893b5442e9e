use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Value of `zalpha` that disables skew.
pub const UNIFORM_SENTINEL: f64 = -1.0;

/// Popularity skew applied when drawing candidates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Skew {
    /// Every candidate is equally likely.
    #[default]
    Uniform,
    /// Rank `i` weighted by `i^-alpha`, with `alpha > 1`.
    Zipf(f64),
}

impl Skew {
    /// Interpret a command-line `zalpha`: `-1` disables skew, anything else
    /// must be a finite value strictly above 1 so that ζ(alpha) converges.
    pub fn from_zalpha(zalpha: f64) -> Result<Self> {
        if zalpha == UNIFORM_SENTINEL {
            Ok(Skew::Uniform)
        } else if zalpha.is_finite() && zalpha > 1.0 {
            Ok(Skew::Zipf(zalpha))
        } else {
            Err(Error::Config(format!(
                "Zipf alpha must be greater than 1, or -1 to disable (got {zalpha})"
            )))
        }
    }

    pub fn zalpha(&self) -> f64 {
        match self {
            Skew::Uniform => UNIFORM_SENTINEL,
            Skew::Zipf(alpha) => *alpha,
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, Skew::Uniform)
    }
}

/// How a skewed draw turns a random key into a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkewLaw {
    /// Binary search for the rank whose Zipf weight is closest to a uniform
    /// key. Kept for trace compatibility with earlier runs; the search walks
    /// a decreasing table with an increasing-array convention, so some ranks
    /// are never selected and frequencies are not monotonic in rank.
    #[default]
    ClosestWeight,
    /// Ranks drawn from a true Zipf distribution over `1..=N`.
    Zipf,
}

impl SkewLaw {
    pub fn name(&self) -> &'static str {
        match self {
            SkewLaw::ClosestWeight => "closest-weight",
            SkewLaw::Zipf => "zipf",
        }
    }
}

impl fmt::Display for SkewLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkewLaw {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "closest-weight" => Ok(SkewLaw::ClosestWeight),
            "zipf" => Ok(SkewLaw::Zipf),
            other => Err(Error::Config(format!(
                "unknown skew law '{other}' (expected closest-weight or zipf)"
            ))),
        }
    }
}
