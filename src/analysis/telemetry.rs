//! Single-lap telemetry statistics

use serde::Serialize;

use super::{mean, sample_std};
use crate::schema::CarData;

/// Headline numbers for one driver's fastest lap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySummary {
    /// km/h
    pub max_speed: f64,
    pub mean_speed: f64,
    pub min_speed: f64,
    /// Sample standard deviation; needs two samples
    pub speed_std: Option<f64>,
    pub mean_rpm: Option<f64>,
    pub max_rpm: Option<f64>,
    /// Share of samples with the DRS flap open, 0-100
    pub drs_usage_percent: f64,
    /// Largest distance value (meters)
    pub distance_covered: Option<f64>,
    /// Last minus first sample time (seconds)
    pub duration: f64,
}

impl TelemetrySummary {
    /// Summarize `car_data`; `None` when it has no finite speed samples.
    pub fn from_car_data(car_data: &CarData) -> Option<Self> {
        let speeds: Vec<f64> = car_data.iter().map(|s| s.speed).filter(|v| v.is_finite()).collect();
        let mean_speed = mean(&speeds)?;

        let rpms: Vec<f64> = car_data.iter().filter_map(|s| s.rpm).filter(|v| v.is_finite()).collect();
        let times: Vec<f64> = car_data.iter().map(|s| s.time).filter(|v| v.is_finite()).collect();
        let drs_open = car_data.iter().filter(|s| s.drs_open()).count();

        Some(Self {
            max_speed: max(&speeds)?,
            mean_speed,
            min_speed: min(&speeds)?,
            speed_std: sample_std(&speeds),
            mean_rpm: mean(&rpms),
            max_rpm: max(&rpms),
            drs_usage_percent: drs_open as f64 / car_data.len() as f64 * 100.0,
            distance_covered: max(
                &car_data.iter().filter_map(|s| s.distance).filter(|v| v.is_finite()).collect::<Vec<_>>(),
            ),
            duration: match (min(&times), max(&times)) {
                (Some(first), Some(last)) => last - first,
                _ => 0.0,
            },
        })
    }
}

/// How often one gear was engaged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GearShare {
    pub gear: u8,
    pub samples: usize,
    /// Share of samples that report a gear, 0-100
    pub percent: f64,
}

/// Per-gear sample counts in ascending gear order.
pub fn gear_usage(car_data: &CarData) -> Vec<GearShare> {
    let mut counts = [0usize; 256];
    let mut total = 0usize;
    for gear in car_data.iter().filter_map(|s| s.n_gear) {
        counts[gear as usize] += 1;
        total += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(gear, &samples)| GearShare {
            gear: gear as u8,
            samples,
            percent: samples as f64 / total as f64 * 100.0,
        })
        .collect()
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CarSample;

    fn sample(time: f64, speed: f64, gear: u8, drs: u8) -> CarSample {
        CarSample {
            time,
            speed,
            rpm: Some(10_000.0 + speed),
            n_gear: Some(gear),
            drs: Some(drs),
            distance: Some(time * 50.0),
            ..Default::default()
        }
    }

    fn lap() -> CarData {
        CarData::new(vec![
            sample(0.0, 100.0, 3, 0),
            sample(1.0, 200.0, 6, 12),
            sample(2.0, 300.0, 8, 14),
            sample(3.0, 200.0, 6, 8),
        ])
    }

    #[test]
    fn summarizes_speed_rpm_and_distance() {
        let summary = TelemetrySummary::from_car_data(&lap()).unwrap();

        assert_eq!(summary.max_speed, 300.0);
        assert_eq!(summary.min_speed, 100.0);
        assert_eq!(summary.mean_speed, 200.0);
        assert_eq!(summary.max_rpm, Some(10_300.0));
        assert_eq!(summary.mean_rpm, Some(10_200.0));
        assert_eq!(summary.distance_covered, Some(150.0));
        assert_eq!(summary.duration, 3.0);
        assert!((summary.speed_std.unwrap() - 81.6496580927726).abs() < 1e-9);
    }

    #[test]
    fn drs_usage_counts_open_samples_only() {
        // codes 12 and 14 are open, 8 is not
        let summary = TelemetrySummary::from_car_data(&lap()).unwrap();
        assert_eq!(summary.drs_usage_percent, 50.0);
    }

    #[test]
    fn empty_lap_has_no_summary() {
        assert!(TelemetrySummary::from_car_data(&CarData::default()).is_none());
    }

    #[test]
    fn gear_usage_is_sorted_by_gear() {
        let usage = gear_usage(&lap());
        let gears: Vec<u8> = usage.iter().map(|g| g.gear).collect();
        assert_eq!(gears, vec![3, 6, 8]);
        assert_eq!(usage[1].samples, 2);
        assert_eq!(usage[1].percent, 50.0);
        assert!(gear_usage(&CarData::default()).is_empty());
    }
}
