use std::fmt;

use serde::Serialize;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// A grade on the 0-10 scale. Out-of-range inputs saturate instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(MIN_SCORE);
        }
        Self(raw.clamp(MIN_SCORE, MAX_SCORE))
    }

    pub fn zero() -> Self {
        Self(MIN_SCORE)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: Score,
    pub feedback: String,
}
