//! Lap timing, tyre and weather helpers

use std::collections::HashMap;

use serde::Serialize;

use crate::colors::tyre_color;
use crate::schema::{Lap, Laps, WeatherSample};

/// Compound label used for laps without one
pub const UNKNOWN_COMPOUND: &str = "UNKNOWN";

/// Consecutive laps on one compound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TyreStint {
    pub compound: String,
    pub first_lap: u32,
    pub last_lap: u32,
    pub laps: usize,
}

impl TyreStint {
    /// Display color of the compound.
    pub fn color(&self) -> &'static str {
        tyre_color(&self.compound)
    }
}

/// Stints of driver `abbreviation`, split wherever the compound changes.
pub fn tyre_stints(laps: &Laps, abbreviation: &str) -> Vec<TyreStint> {
    let mut driver_laps: Vec<(u32, &str)> = laps
        .iter()
        .filter(|lap| lap.driver == abbreviation)
        .filter_map(|lap| {
            let compound = lap.compound.as_deref().filter(|c| !c.is_empty()).unwrap_or(UNKNOWN_COMPOUND);
            lap.lap_number.map(|n| (n, compound))
        })
        .collect();
    driver_laps.sort_by_key(|(number, _)| *number);

    let mut stints: Vec<TyreStint> = Vec::new();
    for (number, compound) in driver_laps {
        match stints.last_mut() {
            Some(stint) if stint.compound.eq_ignore_ascii_case(compound) => {
                stint.last_lap = number;
                stint.laps += 1;
            }
            _ => stints.push(TyreStint {
                compound: compound.to_uppercase(),
                first_lap: number,
                last_lap: number,
                laps: 1,
            }),
        }
    }
    stints
}

/// Fastest timed lap of the session; the earliest lap wins a tie.
pub fn fastest_lap(laps: &Laps) -> Option<&Lap> {
    laps.pick_fastest()
}

/// Last known position of each driver, best first.
///
/// A driver's position is taken from their last row that carries one; drivers
/// with no position at all are left out.
pub fn final_positions(laps: &Laps) -> Vec<(String, u32)> {
    let mut last: HashMap<&str, u32> = HashMap::new();
    for lap in laps {
        if let Some(position) = lap.position {
            last.insert(lap.driver.as_str(), position);
        }
    }

    let mut positions: Vec<(String, u32)> =
        last.into_iter().map(|(driver, position)| (driver.to_string(), position)).collect();
    positions.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    positions
}

/// Highest lap number in the table.
pub fn total_laps(laps: &Laps) -> Option<u32> {
    laps.iter().filter_map(|lap| lap.lap_number).max()
}

/// Most recent weather sample.
pub fn latest_weather(weather: &[WeatherSample]) -> Option<&WeatherSample> {
    weather.last()
}

/// `HH:MM:SS` for a duration in seconds; non-finite or negative input gives
/// `00:00:00`.
pub fn format_timedelta(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00:00".to_string();
    }
    let total = seconds.trunc() as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
