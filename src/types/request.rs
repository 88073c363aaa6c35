//! Load requests and load flags

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SessionType;

/// The `(year, event, session type)` triple identifying one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionRequest {
    pub year: i32,
    pub event_name: String,
    pub session_type: SessionType,
}

impl SessionRequest {
    pub fn new(year: i32, event_name: impl Into<String>, session_type: SessionType) -> Self {
        Self { year, event_name: event_name.into(), session_type }
    }

    /// Key used for caching: event name compared case-insensitively.
    pub fn cache_key(&self) -> (i32, String, SessionType) {
        (self.year, self.event_name.trim().to_lowercase(), self.session_type)
    }
}

impl fmt::Display for SessionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.event_name, self.session_type)
    }
}

/// Which data streams to populate when loading a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFlags {
    pub laps: bool,
    pub telemetry: bool,
    pub weather: bool,
    pub messages: bool,
}

impl LoadFlags {
    /// Every stream enabled, as the builder requests.
    pub const ALL: LoadFlags = LoadFlags { laps: true, telemetry: true, weather: true, messages: true };

    /// Nothing loaded yet.
    pub const NONE: LoadFlags =
        LoadFlags { laps: false, telemetry: false, weather: false, messages: false };
}

impl Default for LoadFlags {
    fn default() -> Self {
        Self::ALL
    }
}
