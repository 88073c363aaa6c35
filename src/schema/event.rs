//! Event records, season schedules and circuit geometry

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::SessionType;

/// One event on the season calendar
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct EventRecord {
    /// Round number (0 for testing)
    pub round_number: Option<u32>,
    /// Host country
    pub country: Option<String>,
    /// Host city or venue
    pub location: Option<String>,
    /// Official event name
    pub official_event_name: Option<String>,
    /// Event date (race day)
    pub event_date: Option<NaiveDate>,
    /// Short event name (e.g. "Monaco Grand Prix")
    pub event_name: Option<String>,
    /// Weekend format (conventional, sprint, testing)
    pub event_format: Option<String>,
    /// Whether the official timing API covers this event
    #[serde(rename = "F1ApiSupport")]
    pub f1_api_support: Option<bool>,
    /// Sessions held on the weekend
    pub sessions: Vec<SessionType>,
}

impl EventRecord {
    pub fn has_session(&self, session_type: SessionType) -> bool {
        self.sessions.contains(&session_type)
    }
}

/// The events of one season
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct EventSchedule {
    pub year: i32,
    pub events: Vec<EventRecord>,
}

impl EventSchedule {
    /// Event whose name equals `name`, ignoring case.
    pub fn get_event_by_name(&self, name: &str) -> Option<&EventRecord> {
        let wanted = name.trim().to_lowercase();
        let found = self.events.iter().find(|event| {
            event.event_name.as_deref().is_some_and(|n| n.to_lowercase() == wanted)
        });
        if found.is_none() {
            debug!(name, year = self.year, "No event found matching name");
        }
        found
    }

    /// Event held as round `round_number`.
    pub fn get_event_by_round(&self, round_number: u32) -> Option<&EventRecord> {
        let found = self.events.iter().find(|event| event.round_number == Some(round_number));
        if found.is_none() {
            debug!(round_number, year = self.year, "No event found for round number");
        }
        found
    }

    /// Looser lookup used when resolving user input.
    ///
    /// Tries the exact event name, then location or country, then a substring
    /// of the event name.
    pub fn find_event(&self, query: &str) -> Option<&EventRecord> {
        let wanted = query.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        let eq = |value: &Option<String>| value.as_deref().is_some_and(|v| v.to_lowercase() == wanted);

        self.get_event_by_name(&wanted)
            .or_else(|| self.events.iter().find(|e| eq(&e.location) || eq(&e.country)))
            .or_else(|| {
                self.events.iter().find(|e| {
                    e.event_name.as_deref().is_some_and(|n| n.to_lowercase().contains(&wanted))
                })
            })
    }

    /// Event names in calendar order.
    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().filter_map(|event| event.event_name.as_deref()).collect()
    }
}

/// A numbered corner on the circuit map
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Corner {
    pub number: u32,
    pub letter: Option<String>,
    #[serde(rename = "X")]
    pub x: Option<f64>,
    #[serde(rename = "Y")]
    pub y: Option<f64>,
    pub angle: Option<f64>,
    /// Distance from the start line (meters)
    pub distance: Option<f64>,
}

/// Circuit geometry
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct CircuitInfo {
    pub corners: Vec<Corner>,
    /// Map rotation (degrees)
    pub rotation: Option<f64>,
}

impl CircuitInfo {
    /// Largest finite corner distance.
    pub fn max_corner_distance(&self) -> Option<f64> {
        self.corners
            .iter()
            .filter_map(|corner| corner.distance)
            .filter(|d| d.is_finite())
            .fold(None, |max, d| Some(max.map_or(d, |m: f64| m.max(d))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(round: u32, name: &str, location: &str, country: &str) -> EventRecord {
        EventRecord {
            round_number: Some(round),
            event_name: Some(name.to_string()),
            location: Some(location.to_string()),
            country: Some(country.to_string()),
            ..Default::default()
        }
    }

    fn schedule() -> EventSchedule {
        EventSchedule {
            year: 2023,
            events: vec![
                event(1, "Bahrain Grand Prix", "Sakhir", "Bahrain"),
                event(6, "Monaco Grand Prix", "Monaco", "Monaco"),
                event(10, "British Grand Prix", "Silverstone", "Great Britain"),
            ],
        }
    }

    #[test]
    fn exact_name_lookup_ignores_case() {
        let schedule = schedule();
        let found = schedule.get_event_by_name("monaco grand prix").unwrap();
        assert_eq!(found.round_number, Some(6));
        assert!(schedule.get_event_by_name("Monaco").is_none());
    }

    #[test]
    fn round_lookup() {
        let schedule = schedule();
        assert_eq!(
            schedule.get_event_by_round(10).and_then(|e| e.event_name.as_deref()),
            Some("British Grand Prix")
        );
        assert!(schedule.get_event_by_round(42).is_none());
    }

    #[test]
    fn find_event_falls_back_to_location_then_substring() {
        let schedule = schedule();
        assert_eq!(schedule.find_event("Monaco").and_then(|e| e.round_number), Some(6));
        assert_eq!(schedule.find_event("Silverstone").and_then(|e| e.round_number), Some(10));
        assert_eq!(schedule.find_event("bahrain grand").and_then(|e| e.round_number), Some(1));
        assert!(schedule.find_event("Atlantis").is_none());
        assert!(schedule.find_event("   ").is_none());
    }

    #[test]
    fn max_corner_distance_ignores_gaps() {
        let circuit = CircuitInfo {
            corners: vec![
                Corner { number: 1, distance: Some(150.0), ..Default::default() },
                Corner { number: 2, distance: None, ..Default::default() },
                Corner { number: 3, distance: Some(f64::NAN), ..Default::default() },
                Corner { number: 19, distance: Some(3210.5), ..Default::default() },
            ],
            rotation: Some(91.0),
        };
        assert_eq!(circuit.max_corner_distance(), Some(3210.5));
        assert_eq!(CircuitInfo::default().max_corner_distance(), None);
    }
}
