//! Lap timing records
//!
//! One [`Lap`] row per driver per completed lap. Durations are seconds; every
//! column is optional because the store does not guarantee column completeness
//! for every session type.

use serde::{Deserialize, Serialize};

/// A single lap timing row
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Lap {
    /// Session time at which the lap was set (seconds)
    pub time: Option<f64>,
    /// Driver abbreviation
    pub driver: String,
    /// Driver number (string form)
    pub driver_number: String,
    /// Lap duration (seconds)
    pub lap_time: Option<f64>,
    /// Lap number
    pub lap_number: Option<u32>,
    /// Stint number
    pub stint: Option<u32>,
    /// Pit exit time (seconds)
    pub pit_out_time: Option<f64>,
    /// Pit entry time (seconds)
    pub pit_in_time: Option<f64>,
    /// Sector 1 duration (seconds)
    pub sector1_time: Option<f64>,
    /// Sector 2 duration (seconds)
    pub sector2_time: Option<f64>,
    /// Sector 3 duration (seconds)
    pub sector3_time: Option<f64>,
    /// Speed trap at intermediate 1 (km/h)
    #[serde(rename = "SpeedI1")]
    pub speed_i1: Option<f64>,
    /// Speed trap at intermediate 2 (km/h)
    #[serde(rename = "SpeedI2")]
    pub speed_i2: Option<f64>,
    /// Speed at the finish line (km/h)
    #[serde(rename = "SpeedFL")]
    pub speed_fl: Option<f64>,
    /// Speed at the longest straight (km/h)
    #[serde(rename = "SpeedST")]
    pub speed_st: Option<f64>,
    /// Personal best flag
    pub is_personal_best: Option<bool>,
    /// Tyre compound (SOFT, MEDIUM, HARD, INTERMEDIATE, WET)
    pub compound: Option<String>,
    /// Laps driven on this tyre set
    pub tyre_life: Option<f64>,
    /// Whether the tyre set was new at stint start
    pub fresh_tyre: Option<bool>,
    /// Team name
    pub team: Option<String>,
    /// Session time at lap start (seconds)
    pub lap_start_time: Option<f64>,
    /// Track status codes seen during the lap
    pub track_status: Option<String>,
    /// Running position at the end of the lap
    pub position: Option<u32>,
    /// Lap deleted by race control
    pub deleted: Option<bool>,
}

impl Lap {
    /// Lap time when present and finite.
    pub fn timed(&self) -> Option<f64> {
        self.lap_time.filter(|t| t.is_finite())
    }
}

/// Ordered collection of lap rows.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Laps(Vec<Lap>);

impl Laps {
    pub fn new(laps: Vec<Lap>) -> Self {
        Self(laps)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lap> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Lap] {
        &self.0
    }

    /// Laps of one driver by number, ascending lap number.
    pub fn pick_driver(&self, number: &str) -> Vec<&Lap> {
        let mut laps: Vec<&Lap> = self.0.iter().filter(|lap| lap.driver_number == number).collect();
        laps.sort_by_key(|lap| lap.lap_number.unwrap_or(u32::MAX));
        laps
    }

    /// Driver abbreviations in first-seen order.
    pub fn drivers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for lap in &self.0 {
            if !seen.contains(&lap.driver.as_str()) {
                seen.push(lap.driver.as_str());
            }
        }
        seen
    }

    /// Fastest timed lap over all drivers.
    pub fn pick_fastest(&self) -> Option<&Lap> {
        pick_fastest(self.0.iter())
    }
}

impl<'a> IntoIterator for &'a Laps {
    type Item = &'a Lap;
    type IntoIter = std::slice::Iter<'a, Lap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Lap>> for Laps {
    fn from(laps: Vec<Lap>) -> Self {
        Self(laps)
    }
}

/// Minimum lap time among `laps`; the earliest lap wins a tie.
pub fn pick_fastest<'a>(laps: impl IntoIterator<Item = &'a Lap>) -> Option<&'a Lap> {
    let mut fastest: Option<(&Lap, f64)> = None;
    for lap in laps {
        let Some(time) = lap.timed() else { continue };
        match fastest {
            Some((_, best)) if time >= best => {}
            _ => fastest = Some((lap, time)),
        }
    }
    fastest.map(|(lap, _)| lap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(number: &str, abbreviation: &str, lap_number: u32, lap_time: Option<f64>) -> Lap {
        Lap {
            driver: abbreviation.to_string(),
            driver_number: number.to_string(),
            lap_number: Some(lap_number),
            lap_time,
            ..Default::default()
        }
    }

    #[test]
    fn pick_driver_orders_by_lap_number() {
        let laps = Laps::new(vec![
            lap("1", "VER", 3, Some(72.0)),
            lap("44", "HAM", 1, Some(75.0)),
            lap("1", "VER", 1, Some(74.0)),
            lap("1", "VER", 2, Some(73.0)),
        ]);

        let picked: Vec<u32> =
            laps.pick_driver("1").iter().filter_map(|lap| lap.lap_number).collect();
        assert_eq!(picked, vec![1, 2, 3]);
        assert!(laps.pick_driver("16").is_empty());
    }

    #[test]
    fn pick_fastest_skips_untimed_and_prefers_earliest_tie() {
        let laps = vec![
            lap("1", "VER", 1, None),
            lap("1", "VER", 2, Some(71.5)),
            lap("1", "VER", 3, Some(f64::NAN)),
            lap("1", "VER", 4, Some(71.5)),
        ];
        let fastest = pick_fastest(laps.iter()).unwrap();
        assert_eq!(fastest.lap_number, Some(2));

        let untimed = vec![lap("1", "VER", 1, None)];
        assert!(pick_fastest(untimed.iter()).is_none());
    }

    #[test]
    fn drivers_are_listed_once_in_order() {
        let laps = Laps::new(vec![
            lap("44", "HAM", 1, None),
            lap("1", "VER", 1, None),
            lap("44", "HAM", 2, None),
        ]);
        assert_eq!(laps.drivers(), vec!["HAM", "VER"]);
    }

    #[test]
    fn deserializes_pascal_case_columns_with_gaps() {
        let yaml = r#"
- Driver: VER
  DriverNumber: "1"
  LapNumber: 5
  LapTime: 72.3
  Compound: SOFT
  SpeedST: 290.5
- Driver: HAM
  DriverNumber: "44"
"#;
        let laps: Laps = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(laps.len(), 2);
        assert_eq!(laps.as_slice()[0].compound.as_deref(), Some("SOFT"));
        assert_eq!(laps.as_slice()[0].speed_st, Some(290.5));
        assert_eq!(laps.as_slice()[1].lap_time, None);
        assert_eq!(laps.as_slice()[1].position, None);
    }
}
