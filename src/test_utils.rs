//! Test utilities for fixture paths and synthetic session recordings
//!
//! Synthetic recordings are deterministic, so tests and benches built on them
//! can assert exact counts.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::schema::{
    CarData, CarSample, CircuitInfo, Corner, DriverResult, EventRecord, EventSchedule, Lap, Laps,
    RaceControlMessage, TrackStatusEvent, WeatherSample,
};
use crate::stores::{RecordedSession, SessionRecording, event_slug};
use crate::types::{SessionRequest, SessionType};

/// Guidance shown when session fixtures are missing from the checkout.
pub const FIXTURE_GUIDANCE: &str =
    "Session fixtures live under test-data/sessions. Regenerate them with test-data/generate_fixtures.py.";

/// Error returned when a required fixture cannot be located.
#[derive(Debug, Clone)]
pub struct FixtureError {
    message: String,
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FixtureError {}

/// The crate's test-data directory
pub fn get_test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

/// Cache directory holding the recorded fixture sessions.
pub fn require_sessions_fixture() -> Result<PathBuf, FixtureError> {
    let dir = get_test_data_dir().join("sessions");
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(FixtureError {
            message: format!("Missing session fixtures: {}. {}", dir.display(), FIXTURE_GUIDANCE),
        })
    }
}

/// 2023 grid: number, abbreviation, first name, last name, team
const GRID: [(&str, &str, &str, &str, &str); 20] = [
    ("1", "VER", "Max", "Verstappen", "Red Bull Racing"),
    ("11", "PER", "Sergio", "Perez", "Red Bull Racing"),
    ("44", "HAM", "Lewis", "Hamilton", "Mercedes"),
    ("63", "RUS", "George", "Russell", "Mercedes"),
    ("16", "LEC", "Charles", "Leclerc", "Ferrari"),
    ("55", "SAI", "Carlos", "Sainz", "Ferrari"),
    ("4", "NOR", "Lando", "Norris", "McLaren"),
    ("81", "PIA", "Oscar", "Piastri", "McLaren"),
    ("14", "ALO", "Fernando", "Alonso", "Aston Martin"),
    ("18", "STR", "Lance", "Stroll", "Aston Martin"),
    ("10", "GAS", "Pierre", "Gasly", "Alpine"),
    ("31", "OCO", "Esteban", "Ocon", "Alpine"),
    ("23", "ALB", "Alexander", "Albon", "Williams"),
    ("2", "SAR", "Logan", "Sargeant", "Williams"),
    ("21", "DEV", "Nyck", "De Vries", "AlphaTauri"),
    ("22", "TSU", "Yuki", "Tsunoda", "AlphaTauri"),
    ("77", "BOT", "Valtteri", "Bottas", "Alfa Romeo"),
    ("24", "ZHO", "Guanyu", "Zhou", "Alfa Romeo"),
    ("20", "MAG", "Kevin", "Magnussen", "Haas F1 Team"),
    ("27", "HUL", "Nico", "Hulkenberg", "Haas F1 Team"),
];

/// Shape of a synthetic recording
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSession {
    pub drivers: usize,
    pub laps: usize,
    pub samples_per_lap: usize,
    pub with_weather: bool,
}

impl SyntheticSession {
    pub fn new(drivers: usize, laps: usize) -> Self {
        Self { drivers, laps, samples_per_lap: 40, with_weather: true }
    }

    pub fn samples_per_lap(mut self, samples: usize) -> Self {
        self.samples_per_lap = samples;
        self
    }

    pub fn without_weather(mut self) -> Self {
        self.with_weather = false;
        self
    }
}

/// Number, abbreviation and result row of grid slot `slot`.
fn entrant(slot: usize) -> DriverResult {
    let (number, abbreviation, first, last, team) = match GRID.get(slot) {
        Some(&(n, a, f, l, t)) => (n.to_string(), a.to_string(), f, l, t),
        None => ((100 + slot).to_string(), format!("X{slot:02}"), "Test", "Driver", "Williams"),
    };
    DriverResult {
        full_name: format!("{first} {last}"),
        driver_number: Some(number),
        abbreviation,
        team_name: team.to_string(),
        team_color: Some("37BEDD".to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        position: Some(slot as u32 + 1),
        ..Default::default()
    }
}

fn lap_time(slot: usize, lap: usize) -> f64 {
    72.0 + slot as f64 * 0.15 + ((slot * 7 + lap * 3) % 11) as f64 * 0.1
}

fn car_data(slot: usize, samples: usize) -> CarData {
    let mut distance = 0.0;
    (0..samples)
        .map(|k| {
            let speed = 90.0 + ((k * 13) % 200) as f64 + slot as f64;
            distance += speed / 3.6 * 0.25;
            CarSample {
                time: k as f64 * 0.25,
                speed,
                rpm: Some(9000.0 + speed * 20.0),
                n_gear: Some(1 + (k % 8) as u8),
                throttle: Some(if k % 4 == 0 { 0.0 } else { 100.0 }),
                brake: Some(k % 4 == 0),
                drs: Some(if k % 5 == 0 { 12 } else { 0 }),
                distance: Some(distance),
                ..Default::default()
            }
        })
        .collect::<Vec<_>>()
        .into()
}

/// Deterministic recording with results, laps, car data for every lap,
/// messages, circuit geometry and (optionally) weather.
pub fn synthetic_recording(shape: SyntheticSession) -> SessionRecording {
    let results: Vec<DriverResult> = (0..shape.drivers).map(entrant).collect();
    let numbers: Vec<String> = results.iter().filter_map(|r| r.driver_number.clone()).collect();

    let mut laps = Vec::new();
    let mut car = BTreeMap::new();
    for (slot, row) in results.iter().enumerate() {
        let number = row.driver_number.clone().unwrap_or_default();
        let mut per_lap = BTreeMap::new();
        for lap in 1..=shape.laps {
            let second_stint = lap > shape.laps / 2;
            laps.push(Lap {
                driver: row.abbreviation.clone(),
                driver_number: number.clone(),
                lap_number: Some(lap as u32),
                lap_time: Some(lap_time(slot, lap)),
                stint: Some(if second_stint { 2 } else { 1 }),
                compound: Some(if second_stint { "MEDIUM" } else { "SOFT" }.to_string()),
                team: Some(row.team_name.clone()),
                position: Some(slot as u32 + 1),
                ..Default::default()
            });
            per_lap.insert(lap as u32, car_data(slot, shape.samples_per_lap));
        }
        car.insert(number, per_lap);
    }

    let weather = shape.with_weather.then(|| {
        (0..shape.laps.max(1))
            .map(|i| WeatherSample {
                time: i as f64 * 60.0,
                air_temp: Some(22.0 + i as f64 * 0.1),
                track_temp: Some(41.0),
                humidity: Some(55.0),
                rainfall: Some(false),
                ..Default::default()
            })
            .collect()
    });

    SessionRecording {
        session_name: Some("Qualifying".to_string()),
        date: synthetic_date(),
        weekend_session_type: Some("Qualifying".to_string()),
        event: Some(monaco_event()),
        drivers: numbers,
        results: Some(results),
        driver_records: Vec::new(),
        laps: Some(Laps::new(laps)),
        car_data: car,
        weather,
        track_status: Some(vec![TrackStatusEvent {
            time: 0.0,
            status: "1".to_string(),
            message: Some("AllClear".to_string()),
        }]),
        race_control_messages: Some(vec![RaceControlMessage {
            time: 0.0,
            category: Some("Flag".to_string()),
            message: "GREEN LIGHT - PIT EXIT OPEN".to_string(),
            flag: Some("GREEN".to_string()),
            ..Default::default()
        }]),
        circuit_info: Some(CircuitInfo {
            corners: (1..=19)
                .map(|n| Corner { number: n, distance: Some(n as f64 * 170.0), ..Default::default() })
                .collect(),
            rotation: Some(40.0),
        }),
    }
}

/// A loaded session over [`synthetic_recording`].
pub fn synthetic_session(shape: SyntheticSession) -> RecordedSession {
    RecordedSession::from_recording(
        SessionRequest::new(2023, "Monaco Grand Prix", SessionType::Qualifying),
        synthetic_recording(shape),
    )
}

pub fn monaco_event() -> EventRecord {
    EventRecord {
        round_number: Some(6),
        country: Some("Monaco".to_string()),
        location: Some("Monaco".to_string()),
        official_event_name: Some("FORMULA 1 GRAND PRIX DE MONACO 2023".to_string()),
        event_date: NaiveDate::from_ymd_opt(2023, 5, 28),
        event_name: Some("Monaco Grand Prix".to_string()),
        event_format: Some("conventional".to_string()),
        f1_api_support: Some(true),
        sessions: SessionType::ALL.into_iter().filter(|s| *s != SessionType::Sprint).collect(),
    }
}

/// Write a one-event season and a recording into `root`, laid out the way
/// [`RecordedStore`](crate::stores::RecordedStore) expects.
pub fn write_season(
    root: &Path,
    event: &EventRecord,
    session_type: SessionType,
    recording: &SessionRecording,
) -> std::io::Result<PathBuf> {
    let year = event.event_date.map_or(2023, |d| d.year());
    let season = root.join(year.to_string());
    let event_dir = season.join(event_slug(event.event_name.as_deref().unwrap_or_default()));
    std::fs::create_dir_all(&event_dir)?;

    let schedule = EventSchedule { year, events: vec![event.clone()] };
    write_yaml(&season.join("schedule.yaml"), &schedule)?;

    let path = event_dir.join(format!("{}.yaml", session_type.identifier()));
    write_yaml(&path, recording)?;
    Ok(path)
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    let text = serde_yaml_ng::to_string(value).map_err(std::io::Error::other)?;
    std::fs::write(path, text)
}

/// Session start used by synthetic recordings.
pub fn synthetic_date() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2023, 5, 27).and_then(|d| d.and_hms_opt(14, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::store::{LoadedSession, SessionStore};
    use crate::stores::RecordedStore;
    use crate::types::LoadFlags;

    #[test]
    fn synthetic_shape_is_respected() {
        let recording = synthetic_recording(SyntheticSession::new(22, 4).samples_per_lap(10));
        assert_eq!(recording.drivers.len(), 22);
        assert_eq!(recording.laps.as_ref().map(Laps::len), Some(88));
        assert_eq!(recording.car_data_for("1", 4).map(CarData::len), Some(10));
        assert_eq!(recording.drivers[21], "121");

        let dry = synthetic_recording(SyntheticSession::new(2, 2).without_weather());
        assert!(dry.weather.is_none());
    }

    #[tokio::test]
    async fn written_season_loads_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let recording = synthetic_recording(SyntheticSession::new(3, 2));
        write_season(dir.path(), &monaco_event(), SessionType::Qualifying, &recording).unwrap();

        let store = RecordedStore::new(StoreConfig::new(dir.path()));
        let request = SessionRequest::new(2023, "monaco grand prix", SessionType::Qualifying);
        let mut session = store.resolve(&request).await.unwrap();
        store.load(&mut session, LoadFlags::ALL).await.unwrap();

        assert_eq!(session.drivers(), recording.drivers.as_slice());
        assert_eq!(session.laps(), recording.laps.as_ref());
        assert_eq!(session.date(), synthetic_date());
    }

    #[test]
    fn fixture_lookup_points_at_sessions() {
        let dir = require_sessions_fixture().unwrap_or_else(|e| panic!("{e}"));
        assert!(dir.starts_with(get_test_data_dir()));
        assert!(dir.join("2023").join("schedule.yaml").is_file(), "{FIXTURE_GUIDANCE}");
    }
}
