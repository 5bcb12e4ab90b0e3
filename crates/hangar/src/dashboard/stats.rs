//! Static dashboard statistics.
//!
//! The figures here are illustrative display values, read once and never
//! updated; the simulator reports its real state inside its own client.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Illustrative speed values plotted by the performance chart.
pub const SPEED_SERIES: [u32; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Static statistics shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightStats {
    /// Aircraft speed readout.
    pub aircraft_speed: &'static str,
    /// Altitude readout.
    pub altitude: &'static str,
    /// Aircraft health.
    pub health: &'static str,
    /// Ammunition count.
    pub ammo: u32,
    /// When this snapshot was produced.
    pub generated_at: DateTime<Utc>,
}

impl FlightStats {
    /// The current (static) statistics.
    #[must_use]
    pub fn current() -> Self {
        Self {
            aircraft_speed: "Variable",
            altitude: "Variable",
            health: "100%",
            ammo: 100,
            generated_at: Utc::now(),
        }
    }
}

/// Build the `points` attribute of an SVG polyline for the speed series,
/// scaled to the given chart size.
#[must_use]
pub fn speed_polyline_points(width: u32, height: u32) -> String {
    let max = f64::from(*SPEED_SERIES.iter().max().unwrap_or(&1));
    let step = f64::from(width) / (SPEED_SERIES.len() as f64 - 1.0);

    SPEED_SERIES
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = i as f64 * step;
            let y = f64::from(height) * (1.0 - f64::from(*value) / max);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_series_values() {
        assert_eq!(SPEED_SERIES.len(), 10);
        assert_eq!(SPEED_SERIES[0], 10);
        assert_eq!(SPEED_SERIES[9], 100);
    }

    #[test]
    fn test_current_stats() {
        let stats = FlightStats::current();
        assert_eq!(stats.aircraft_speed, "Variable");
        assert_eq!(stats.altitude, "Variable");
        assert_eq!(stats.health, "100%");
        assert_eq!(stats.ammo, 100);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = FlightStats::current();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"ammo\":100"));
        assert!(json.contains("\"health\":\"100%\""));
        assert!(json.contains("generated_at"));
    }

    #[test]
    fn test_polyline_point_count() {
        let points = speed_polyline_points(400, 160);
        assert_eq!(points.split(' ').count(), SPEED_SERIES.len());
    }

    #[test]
    fn test_polyline_endpoints() {
        let points = speed_polyline_points(400, 160);
        let first = points.split(' ').next().unwrap();
        let last = points.split(' ').next_back().unwrap();

        // First sample sits at the left edge, 10/100 of the way up.
        assert_eq!(first, "0.0,144.0");
        // Last sample is the maximum: right edge, top of the chart.
        assert_eq!(last, "400.0,0.0");
    }
}
