//! Performance trend over a player's stat line.
//!
//! The "trend" is an ordinary-least-squares slope of the values
//! `[score, assists, rebounds]` against their positions `0, 1, 2`. It is a
//! single-snapshot shape measure, not a time series.

use serde::Serialize;
use std::fmt;

use crate::db::models::Player;

/// Slope band outside of which the insight text calls a trend out.
pub const INSIGHT_TREND_THRESHOLD: f64 = 0.5;

/// OLS slope of `values` against the implicit x sequence `0, 1, 2, …`.
///
///   slope = (N·Σxy − Σx·Σy) / (N·Σx² − (Σx)²)
///
/// Returns `0.0` for an empty input and whenever the denominator vanishes
/// (a single value), so the result is always finite.
pub fn regression_slope(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// The fixed regression input for one player.
pub fn stat_line(player: &Player) -> [f64; 3] {
    [
        player.score as f64,
        player.assists as f64,
        player.rebounds as f64,
    ]
}

/// Strict-sign classification reported in the `trends` summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    #[serde(rename = "Improving performance")]
    Improving,
    #[serde(rename = "Declining performance")]
    Declining,
    #[serde(rename = "Stable performance")]
    Stable,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Improving
        } else if slope < 0.0 {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "Improving performance",
            TrendDirection::Declining => "Declining performance",
            TrendDirection::Stable => "Stable performance",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub slope: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn for_player(player: &Player) -> Self {
        let slope = regression_slope(&stat_line(player));
        Trend {
            slope,
            direction: TrendDirection::from_slope(slope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slope_of_evenly_rising_sequence() {
        assert_relative_eq!(regression_slope(&[1.0, 3.0, 5.0]), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slope_of_falling_sequence() {
        assert_relative_eq!(regression_slope(&[5.0, 3.0, 1.0]), -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slope_matches_closed_form_for_three_points() {
        // With x = [0, 1, 2] the OLS slope reduces to (c − a) / 2.
        let (a, b, c) = (120.0, 30.0, 40.0);
        assert_relative_eq!(regression_slope(&[a, b, c]), (c - a) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_sequence_is_zero() {
        assert_eq!(regression_slope(&[10.0, 10.0, 10.0]), 0.0);
    }

    #[test]
    fn test_empty_sequence_is_zero() {
        assert_eq!(regression_slope(&[]), 0.0);
    }

    #[test]
    fn test_single_value_does_not_divide_by_zero() {
        let slope = regression_slope(&[42.0]);
        assert_eq!(slope, 0.0);
        assert!(slope.is_finite());
    }

    #[test]
    fn test_direction_uses_strict_sign() {
        assert_eq!(TrendDirection::from_slope(0.1), TrendDirection::Improving);
        assert_eq!(TrendDirection::from_slope(-0.1), TrendDirection::Declining);
        assert_eq!(TrendDirection::from_slope(0.0), TrendDirection::Stable);
    }

    #[test]
    fn test_direction_serializes_as_label() {
        let json = serde_json::to_string(&TrendDirection::Stable).unwrap();
        assert_eq!(json, r#""Stable performance""#);
        assert_eq!(TrendDirection::Declining.to_string(), "Declining performance");
    }
}
