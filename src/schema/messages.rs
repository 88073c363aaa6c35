//! Track status changes and race control messages

use serde::{Deserialize, Serialize};

/// A change of track state (green, yellow, safety car, red, ...)
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct TrackStatusEvent {
    /// Session time (seconds)
    pub time: f64,
    /// Status code ("1" green, "2" yellow, "4" safety car, "5" red, ...)
    pub status: String,
    /// Status description
    pub message: Option<String>,
}

/// An official message from race control
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct RaceControlMessage {
    /// Session time (seconds)
    pub time: f64,
    /// Category (Flag, Drs, SafetyCar, Other, ...)
    pub category: Option<String>,
    /// Message text
    pub message: String,
    /// Status qualifier (e.g. DRS ENABLED)
    pub status: Option<String>,
    /// Flag shown
    pub flag: Option<String>,
    /// Scope (Track, Sector, Driver)
    pub scope: Option<String>,
    /// Sector the message applies to
    pub sector: Option<u32>,
    /// Driver number the message applies to
    pub racing_number: Option<String>,
    /// Lap number
    pub lap: Option<u32>,
}
