//! Per-sample car data
//!
//! [`CarData`] holds the high-frequency samples recorded during one lap. The
//! store may omit the `Distance` channel; [`CarData::with_distance`] derives it.

use serde::{Deserialize, Serialize};

/// DRS codes at or above this value mean the flap is open.
pub const DRS_OPEN_THRESHOLD: u8 = 10;

/// One car data sample
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct CarSample {
    /// Elapsed time (seconds)
    pub time: f64,
    /// Session time (seconds)
    pub session_time: Option<f64>,
    /// Speed (km/h)
    pub speed: f64,
    /// Engine RPM
    #[serde(rename = "RPM")]
    pub rpm: Option<f64>,
    /// Gear
    #[serde(rename = "nGear")]
    pub n_gear: Option<u8>,
    /// Throttle (0-100)
    pub throttle: Option<f64>,
    /// Brake applied
    pub brake: Option<bool>,
    /// Raw DRS code
    #[serde(rename = "DRS")]
    pub drs: Option<u8>,
    /// Cumulative distance (meters)
    pub distance: Option<f64>,
}

impl CarSample {
    pub fn drs_open(&self) -> bool {
        self.drs.is_some_and(|code| code >= DRS_OPEN_THRESHOLD)
    }
}

/// Time-ordered car data samples for one lap
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CarData(Vec<CarSample>);

impl CarData {
    pub fn new(samples: Vec<CarSample>) -> Self {
        Self(samples)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn samples(&self) -> &[CarSample] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CarSample> {
        self.0.iter()
    }

    /// Whether any sample carries a distance value.
    pub fn has_distance(&self) -> bool {
        self.0.iter().any(|sample| sample.distance.is_some())
    }

    /// Returns the samples with a `Distance` channel, deriving it when absent.
    ///
    /// The derived value is `time * speed / 3.6`: instantaneous speed times
    /// elapsed time, not an integral over the trajectory. It is kept for
    /// compatibility with existing recordings and is only an approximation.
    pub fn with_distance(mut self) -> Self {
        if self.has_distance() {
            return self;
        }
        for sample in &mut self.0 {
            sample.distance = Some(derived_distance(sample.time, sample.speed));
        }
        self
    }
}

/// Distance in meters from elapsed seconds and a km/h speed.
pub fn derived_distance(elapsed_seconds: f64, speed_kmh: f64) -> f64 {
    elapsed_seconds * speed_kmh / 3.6
}

impl From<Vec<CarSample>> for CarData {
    fn from(samples: Vec<CarSample>) -> Self {
        Self(samples)
    }
}

impl<'a> IntoIterator for &'a CarData {
    type Item = &'a CarSample;
    type IntoIter = std::slice::Iter<'a, CarSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(time: f64, speed: f64) -> CarSample {
        CarSample { time, speed, ..Default::default() }
    }

    #[test]
    fn derives_distance_when_channel_missing() {
        let data = CarData::new(vec![sample(0.0, 100.0), sample(1.0, 180.0), sample(2.5, 36.0)]);
        let data = data.with_distance();

        let distances: Vec<f64> = data.iter().filter_map(|s| s.distance).collect();
        assert_eq!(distances.len(), 3);
        assert!((distances[0] - 0.0).abs() < 1e-9);
        assert!((distances[1] - 50.0).abs() < 1e-9);
        assert!((distances[2] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn keeps_recorded_distance_untouched() {
        let mut first = sample(1.0, 180.0);
        first.distance = Some(12.0);
        let data = CarData::new(vec![first, sample(2.0, 200.0)]).with_distance();

        assert_eq!(data.samples()[0].distance, Some(12.0));
        assert_eq!(data.samples()[1].distance, None);
    }

    #[test]
    fn drs_open_uses_threshold() {
        let mut s = sample(0.0, 0.0);
        assert!(!s.drs_open());
        s.drs = Some(8);
        assert!(!s.drs_open());
        s.drs = Some(12);
        assert!(s.drs_open());
    }

    #[test]
    fn deserializes_channel_names() {
        let yaml = "- Time: 0.5\n  Speed: 210.0\n  RPM: 11000\n  nGear: 7\n  DRS: 12\n";
        let data: CarData = serde_yaml_ng::from_str(yaml).unwrap();
        let s = &data.samples()[0];
        assert_eq!(s.n_gear, Some(7));
        assert_eq!(s.rpm, Some(11000.0));
        assert!(s.drs_open());
        assert!(s.distance.is_none());
    }

    proptest! {
        #[test]
        fn prop_derived_distance_matches_formula(
            points in prop::collection::vec((0.0f64..120.0, 0.0f64..360.0), 1..200)
        ) {
            let data = CarData::new(points.iter().map(|&(t, v)| sample(t, v)).collect());
            let data = data.with_distance();

            for (s, &(t, v)) in data.iter().zip(points.iter()) {
                let expected = t * v / 3.6;
                let actual = s.distance.unwrap();
                prop_assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}
