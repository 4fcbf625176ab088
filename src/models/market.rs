use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a single tracked index, derived from one upstream response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub key: String,
    pub current_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub timestamp: DateTime<Utc>,
}

/// One point of the trailing intraday/daily series, shaped for the chart
/// renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntradayPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

/// Overall market direction, classified from the S&P 500 percent change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDirection {
    Up,
    Down,
    Flat,
}

impl MarketDirection {
    /// Moves inside the ±0.1% dead-zone count as flat so the headline
    /// direction does not flap on noise.
    pub fn from_percent_change(percent_change: f64) -> Self {
        if percent_change > 0.1 {
            MarketDirection::Up
        } else if percent_change < -0.1 {
            MarketDirection::Down
        } else {
            MarketDirection::Flat
        }
    }
}

impl fmt::Display for MarketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketDirection::Up => "up",
            MarketDirection::Down => "down",
            MarketDirection::Flat => "flat",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_moves_classify_as_flat() {
        assert_eq!(
            MarketDirection::from_percent_change(0.05),
            MarketDirection::Flat
        );
        assert_eq!(
            MarketDirection::from_percent_change(-0.05),
            MarketDirection::Flat
        );
    }

    #[test]
    fn dead_zone_boundaries_are_flat() {
        assert_eq!(
            MarketDirection::from_percent_change(0.1),
            MarketDirection::Flat
        );
        assert_eq!(
            MarketDirection::from_percent_change(-0.1),
            MarketDirection::Flat
        );
    }

    #[test]
    fn moves_past_the_dead_zone_classify_directionally() {
        assert_eq!(
            MarketDirection::from_percent_change(0.15),
            MarketDirection::Up
        );
        assert_eq!(
            MarketDirection::from_percent_change(-0.2),
            MarketDirection::Down
        );
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MarketDirection::Up).unwrap(),
            "\"up\""
        );
        assert_eq!(
            serde_json::from_str::<MarketDirection>("\"flat\"").unwrap(),
            MarketDirection::Flat
        );
    }
}
