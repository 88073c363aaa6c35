//! Two-driver speed comparison along the lap

use serde::Serialize;

use super::{mean, sample_std};
use crate::schema::CarData;

/// Speed difference at one distance along the lap
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedDeltaPoint {
    /// Distance of the first driver's sample (meters)
    pub distance: f64,
    /// First driver's speed minus second driver's (km/h)
    pub delta: f64,
}

/// Which driver a statistic favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Leader {
    First,
    Second,
}

impl Leader {
    fn of(value: f64) -> Self {
        if value > 0.0 { Leader::First } else { Leader::Second }
    }
}

/// Aggregate view of a speed delta trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedDeltaSummary {
    /// Largest absolute delta (km/h)
    pub max_advantage: f64,
    /// Driver holding the largest positive delta
    pub max_advantage_leader: Leader,
    pub mean_delta: f64,
    pub mean_leader: Leader,
    /// Sample standard deviation; needs two points
    pub std_delta: Option<f64>,
}

/// Speed delta trace with its summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedDelta {
    pub points: Vec<SpeedDeltaPoint>,
    pub summary: Option<SpeedDeltaSummary>,
}

/// Align two laps by distance and subtract speeds.
///
/// Each sample of `first` is paired with the `second` sample at the largest
/// distance not beyond it. Samples of `first` before `second`'s earliest
/// distance have no partner and are left out. Samples without a distance are
/// ignored on both sides.
pub fn speed_delta(first: &CarData, second: &CarData) -> SpeedDelta {
    let first = by_distance(first);
    let second = by_distance(second);

    let mut points = Vec::with_capacity(first.len());
    let mut cursor = 0;
    for &(distance, speed) in &first {
        while cursor < second.len() && second[cursor].0 <= distance {
            cursor += 1;
        }
        if cursor == 0 {
            continue;
        }
        points.push(SpeedDeltaPoint { distance, delta: speed - second[cursor - 1].1 });
    }

    let deltas: Vec<f64> = points.iter().map(|p| p.delta).collect();
    let summary = mean(&deltas).map(|mean_delta| {
        let max_delta = deltas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        SpeedDeltaSummary {
            max_advantage: deltas.iter().map(|d| d.abs()).fold(0.0, f64::max),
            max_advantage_leader: Leader::of(max_delta),
            mean_delta,
            mean_leader: Leader::of(mean_delta),
            std_delta: sample_std(&deltas),
        }
    });

    SpeedDelta { points, summary }
}

/// `(distance, speed)` pairs in ascending distance.
fn by_distance(car_data: &CarData) -> Vec<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = car_data
        .iter()
        .filter_map(|s| s.distance.filter(|d| d.is_finite()).map(|d| (d, s.speed)))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs
}
