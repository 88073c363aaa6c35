//! On-disk layout of one recorded session
//!
//! A recording holds the raw tables a store would produce for a session,
//! under the same column names. Car data is keyed by driver number, then lap
//! number.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::schema::{
    CarData, CircuitInfo, DriverResult, EventRecord, Laps, RaceControlMessage, TrackStatusEvent,
    WeatherSample,
};

/// Raw tables of one session
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SessionRecording {
    /// Session label as the store names it
    pub session_name: Option<String>,
    /// Session start
    pub date: Option<NaiveDateTime>,
    /// Label within the weekend format
    pub weekend_session_type: Option<String>,
    /// Event record, used when the schedule does not supply one
    pub event: Option<EventRecord>,
    /// Raw driver numbers
    pub drivers: Vec<String>,
    /// Classification table; absent for sessions without results
    pub results: Option<Vec<DriverResult>>,
    /// Per-driver records answering individual lookups
    pub driver_records: Vec<DriverResult>,
    pub laps: Option<Laps>,
    /// Driver number → lap number → samples
    pub car_data: BTreeMap<String, BTreeMap<u32, CarData>>,
    pub weather: Option<Vec<WeatherSample>>,
    pub track_status: Option<Vec<TrackStatusEvent>>,
    pub race_control_messages: Option<Vec<RaceControlMessage>>,
    pub circuit_info: Option<CircuitInfo>,
}

impl SessionRecording {
    /// Per-driver record for `number`, searching driver records before results.
    pub fn driver_record(&self, number: &str) -> Option<&DriverResult> {
        let matches = |row: &&DriverResult| row.driver_number.as_deref() == Some(number);
        self.driver_records
            .iter()
            .find(matches)
            .or_else(|| self.results.as_deref().and_then(|rows| rows.iter().find(matches)))
    }

    pub fn car_data_for(&self, number: &str, lap_number: u32) -> Option<&CarData> {
        self.car_data.get(number).and_then(|laps| laps.get(&lap_number))
    }
}
