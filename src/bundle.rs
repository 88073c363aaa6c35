//! The normalized Session Bundle
//!
//! A [`SessionBundle`] is built once per successful load and never mutated
//! afterwards. It owns the single number ↔ abbreviation mapping for the
//! session, so consumers never rebuild it from the roster themselves.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::builder::ExtractionReport;
use crate::schema::{CarData, Laps, RaceControlMessage, TrackStatusEvent, WeatherSample};
use crate::store::LoadedSession;
use crate::types::SessionRequest;

/// One entrant on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    /// Driver number (storage key for telemetry)
    pub number: String,
    /// Three-letter abbreviation (display and join key)
    pub abbreviation: String,
    pub full_name: String,
    pub team: String,
    /// Team display color
    pub team_color: String,
}

/// Bidirectional lookup between driver numbers and abbreviations.
#[derive(Debug, Clone, Default)]
pub struct DriverIndex {
    by_number: HashMap<String, usize>,
    by_abbreviation: HashMap<String, usize>,
}

impl DriverIndex {
    /// Index `drivers`; on duplicates the first entry wins.
    pub fn new(drivers: &[DriverInfo]) -> Self {
        let mut index = Self::default();
        for (position, driver) in drivers.iter().enumerate() {
            index.by_number.entry(driver.number.clone()).or_insert(position);
            index.by_abbreviation.entry(driver.abbreviation.clone()).or_insert(position);
        }
        index
    }

    pub fn position_of_number(&self, number: &str) -> Option<usize> {
        self.by_number.get(number).copied()
    }

    pub fn position_of_abbreviation(&self, abbreviation: &str) -> Option<usize> {
        self.by_abbreviation.get(abbreviation).copied()
    }

    pub fn contains_number(&self, number: &str) -> bool {
        self.by_number.contains_key(number)
    }

    pub fn contains_abbreviation(&self, abbreviation: &str) -> bool {
        self.by_abbreviation.contains_key(abbreviation)
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}

/// Keys that [`EventInfo`] may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventInfoKey {
    Name,
    Country,
    Location,
    OfficialName,
    F1ApiSupport,
    CircuitLength,
    Date,
    SessionType,
    WeekendSessionType,
}

impl EventInfoKey {
    pub const ALL: [EventInfoKey; 9] = [
        EventInfoKey::Name,
        EventInfoKey::Country,
        EventInfoKey::Location,
        EventInfoKey::OfficialName,
        EventInfoKey::F1ApiSupport,
        EventInfoKey::CircuitLength,
        EventInfoKey::Date,
        EventInfoKey::SessionType,
        EventInfoKey::WeekendSessionType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventInfoKey::Name => "Name",
            EventInfoKey::Country => "Country",
            EventInfoKey::Location => "Location",
            EventInfoKey::OfficialName => "OfficialName",
            EventInfoKey::F1ApiSupport => "F1ApiSupport",
            EventInfoKey::CircuitLength => "CircuitLength",
            EventInfoKey::Date => "Date",
            EventInfoKey::SessionType => "SessionType",
            EventInfoKey::WeekendSessionType => "WeekendSessionType",
        }
    }
}

impl fmt::Display for EventInfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventInfoKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventInfoKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown event info key '{s}'"))
    }
}

/// A present event info value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventValue {
    Text(String),
    Flag(bool),
    Meters(f64),
    Date(NaiveDateTime),
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventValue::Text(text) => f.write_str(text),
            EventValue::Flag(flag) => write!(f, "{flag}"),
            EventValue::Meters(meters) => write!(f, "{meters:.0} m"),
            EventValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Event metadata; a field is `Some` only when the store supplied a real value.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct EventInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,
    #[serde(rename = "F1ApiSupport", skip_serializing_if = "Option::is_none")]
    pub f1_api_support: Option<bool>,
    /// Circuit length in meters, from the furthest corner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_session_type: Option<String>,
}

impl EventInfo {
    pub fn get(&self, key: EventInfoKey) -> Option<EventValue> {
        let text = |value: &Option<String>| value.clone().map(EventValue::Text);
        match key {
            EventInfoKey::Name => text(&self.name),
            EventInfoKey::Country => text(&self.country),
            EventInfoKey::Location => text(&self.location),
            EventInfoKey::OfficialName => text(&self.official_name),
            EventInfoKey::F1ApiSupport => self.f1_api_support.map(EventValue::Flag),
            EventInfoKey::CircuitLength => self.circuit_length.map(EventValue::Meters),
            EventInfoKey::Date => self.date.map(EventValue::Date),
            EventInfoKey::SessionType => text(&self.session_type),
            EventInfoKey::WeekendSessionType => text(&self.weekend_session_type),
        }
    }

    pub fn contains(&self, key: EventInfoKey) -> bool {
        self.get(key).is_some()
    }

    /// Present entries in key order.
    pub fn entries(&self) -> Vec<(EventInfoKey, EventValue)> {
        EventInfoKey::ALL.into_iter().filter_map(|key| self.get(key).map(|v| (key, v))).collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the builder extracted for one request.
#[derive(Debug, Clone)]
pub struct SessionBundle {
    session: Arc<dyn LoadedSession>,
    timing: Laps,
    telemetry: BTreeMap<String, CarData>,
    weather: Vec<WeatherSample>,
    track_status: Vec<TrackStatusEvent>,
    race_control: Vec<RaceControlMessage>,
    driver_info: Vec<DriverInfo>,
    index: DriverIndex,
    event_info: EventInfo,
    report: ExtractionReport,
}

/// Parts handed from the builder to [`SessionBundle::new`].
pub(crate) struct BundleParts {
    pub session: Arc<dyn LoadedSession>,
    pub timing: Laps,
    pub telemetry: BTreeMap<String, CarData>,
    pub weather: Vec<WeatherSample>,
    pub track_status: Vec<TrackStatusEvent>,
    pub race_control: Vec<RaceControlMessage>,
    pub driver_info: Vec<DriverInfo>,
    pub event_info: EventInfo,
    pub report: ExtractionReport,
}

impl SessionBundle {
    pub(crate) fn new(parts: BundleParts) -> Self {
        let index = DriverIndex::new(&parts.driver_info);
        Self {
            session: parts.session,
            timing: parts.timing,
            telemetry: parts.telemetry,
            weather: parts.weather,
            track_status: parts.track_status,
            race_control: parts.race_control,
            driver_info: parts.driver_info,
            index,
            event_info: parts.event_info,
            report: parts.report,
        }
    }

    /// The loaded session, for follow-up calls such as circuit geometry.
    pub fn session(&self) -> &Arc<dyn LoadedSession> {
        &self.session
    }

    pub fn request(&self) -> &SessionRequest {
        self.session.request()
    }

    pub fn timing(&self) -> &Laps {
        &self.timing
    }

    /// Fastest-lap car data keyed by driver number.
    pub fn telemetry(&self) -> &BTreeMap<String, CarData> {
        &self.telemetry
    }

    pub fn telemetry_for(&self, number: &str) -> Option<&CarData> {
        self.telemetry.get(number)
    }

    pub fn telemetry_for_abbreviation(&self, abbreviation: &str) -> Option<&CarData> {
        self.number_for(abbreviation).and_then(|number| self.telemetry.get(number))
    }

    pub fn weather(&self) -> &[WeatherSample] {
        &self.weather
    }

    pub fn track_status(&self) -> &[TrackStatusEvent] {
        &self.track_status
    }

    pub fn race_control(&self) -> &[RaceControlMessage] {
        &self.race_control
    }

    pub fn driver_info(&self) -> &[DriverInfo] {
        &self.driver_info
    }

    pub fn driver_index(&self) -> &DriverIndex {
        &self.index
    }

    pub fn driver_by_number(&self, number: &str) -> Option<&DriverInfo> {
        self.index.position_of_number(number).map(|i| &self.driver_info[i])
    }

    pub fn driver_by_abbreviation(&self, abbreviation: &str) -> Option<&DriverInfo> {
        self.index.position_of_abbreviation(abbreviation).map(|i| &self.driver_info[i])
    }

    pub fn number_for(&self, abbreviation: &str) -> Option<&str> {
        self.driver_by_abbreviation(abbreviation).map(|d| d.number.as_str())
    }

    pub fn abbreviation_for(&self, number: &str) -> Option<&str> {
        self.driver_by_number(number).map(|d| d.abbreviation.as_str())
    }

    /// Abbreviations in roster order, as offered for driver selection.
    pub fn abbreviations(&self) -> Vec<&str> {
        self.driver_info.iter().map(|d| d.abbreviation.as_str()).collect()
    }

    pub fn event_info(&self) -> &EventInfo {
        &self.event_info
    }

    /// What was skipped while building, and why.
    pub fn report(&self) -> &ExtractionReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(number: &str, abbreviation: &str) -> DriverInfo {
        DriverInfo {
            number: number.to_string(),
            abbreviation: abbreviation.to_string(),
            full_name: format!("Driver {number}"),
            team: "Team".to_string(),
            team_color: "FFFFFF".to_string(),
        }
    }

    #[test]
    fn driver_index_maps_both_ways() {
        let drivers = vec![driver("1", "VER"), driver("44", "HAM"), driver("16", "LEC")];
        let index = DriverIndex::new(&drivers);

        assert_eq!(index.len(), 3);
        assert_eq!(index.position_of_number("44"), Some(1));
        assert_eq!(index.position_of_abbreviation("LEC"), Some(2));
        assert!(index.contains_number("1"));
        assert!(!index.contains_abbreviation("NOR"));
    }

    #[test]
    fn driver_index_keeps_first_duplicate() {
        let drivers = vec![driver("1", "VER"), driver("1", "XXX")];
        let index = DriverIndex::new(&drivers);
        assert_eq!(index.position_of_number("1"), Some(0));
    }

    #[test]
    fn event_info_lists_only_present_keys() {
        let info = EventInfo {
            name: Some("Monaco Grand Prix".to_string()),
            f1_api_support: Some(true),
            circuit_length: Some(3337.0),
            ..Default::default()
        };

        let keys: Vec<EventInfoKey> = info.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![EventInfoKey::Name, EventInfoKey::F1ApiSupport, EventInfoKey::CircuitLength]
        );
        assert_eq!(info.get(EventInfoKey::Name), Some(EventValue::Text("Monaco Grand Prix".into())));
        assert!(!info.contains(EventInfoKey::Country));
        assert_eq!(info.len(), 3);
    }

    #[test]
    fn event_info_serializes_without_nulls() {
        let info = EventInfo { location: Some("Monaco".to_string()), ..Default::default() };
        let yaml = serde_yaml_ng::to_string(&info).unwrap();
        assert_eq!(yaml.trim(), "Location: Monaco");
        assert!(!yaml.contains("null"));
    }

    #[test]
    fn event_info_key_round_trips_through_str() {
        for key in EventInfoKey::ALL {
            assert_eq!(key.as_str().parse::<EventInfoKey>().unwrap(), key);
        }
        assert!("Track".parse::<EventInfoKey>().is_err());
    }

    #[test]
    fn event_value_display() {
        let date = NaiveDateTime::parse_from_str("2023-05-27 14:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(EventValue::Date(date).to_string(), "2023-05-27");
        assert_eq!(EventValue::Meters(3337.4).to_string(), "3337 m");
    }
}
