//! Market and outcome identification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported betting markets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    /// Two-way moneyline (home/away)
    H2h,
    /// Three-way moneyline (home/draw/away)
    H2h3Way,
    /// Point spread / handicap
    Spreads,
    /// Game total (over/under)
    Totals,
}

impl MarketKind {
    pub fn key(&self) -> &'static str {
        match self {
            MarketKind::H2h => "h2h",
            MarketKind::H2h3Way => "h2h_3_way",
            MarketKind::Spreads => "spreads",
            MarketKind::Totals => "totals",
        }
    }

    /// Number of mutually exclusive outcomes this market resolves to
    pub fn outcome_count(&self) -> usize {
        match self {
            MarketKind::H2h3Way => 3,
            _ => 2,
        }
    }

    /// Whether outcomes carry a point value (spread handicap or total line)
    pub fn uses_points(&self) -> bool {
        matches!(self, MarketKind::Spreads | MarketKind::Totals)
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Line value in tenths of a point (-3.5 => -35)
///
/// Books quote lines at half- and quarter-point granularity, so tenths are
/// lossless and give outcome keys `Eq + Ord + Hash` without float comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(i32);

impl Point {
    /// None for non-finite input: a NaN/infinite line is rejected, never
    /// coerced to a default
    pub fn from_f64(value: f64) -> Option<Self> {
        value
            .is_finite()
            .then(|| Self((value * 10.0).round() as i32))
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 10.0
    }

    pub fn tenths(&self) -> i32 {
        self.0
    }

    /// Absolute line value; both sides of a spread share a magnitude
    pub fn magnitude(&self) -> i32 {
        self.0.abs()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

/// Identity of one outcome within a market
///
/// Moneyline outcomes are identified by label alone; spread/total outcomes
/// by (label, point) — a home -3.5 is a different outcome from a home -7.5.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutcomeKey {
    pub label: String,
    pub point: Option<Point>,
}

impl OutcomeKey {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            point: None,
        }
    }

    pub fn with_point(label: impl Into<String>, point: f64) -> Self {
        Self {
            label: label.into(),
            point: Point::from_f64(point),
        }
    }

    /// Grouping key for one quoted line: opposite sides of the same spread
    /// (-3.5 / +3.5) collapse to the same magnitude
    pub fn line(&self) -> Option<i32> {
        self.point.map(|p| p.magnitude())
    }
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some(p) => write!(f, "{} {}", self.label, p),
            None => write!(f, "{}", self.label),
        }
    }
}
