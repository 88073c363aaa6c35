//! Classification results and per-driver records

use serde::{Deserialize, Serialize};

/// One entrant's classification row, also returned by per-driver lookups
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct DriverResult {
    /// Driver number (string form)
    pub driver_number: Option<String>,
    /// Broadcast name (e.g. "M VERSTAPPEN")
    pub broadcast_name: Option<String>,
    /// Three-letter abbreviation
    pub abbreviation: String,
    /// Driver identifier slug
    pub driver_id: Option<String>,
    /// Team name
    pub team_name: String,
    /// Team color as stored by the store (hex, usually without '#')
    pub team_color: Option<String>,
    /// Team identifier slug
    pub team_id: Option<String>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Full name
    pub full_name: String,
    /// Country code
    pub country_code: Option<String>,
    /// Finishing position
    pub position: Option<u32>,
    /// Classified position ("1", "R" retired, "D" disqualified, ...)
    pub classified_position: Option<String>,
    /// Grid position
    pub grid_position: Option<u32>,
    /// Q1 best time (seconds)
    #[serde(rename = "Q1")]
    pub q1: Option<f64>,
    /// Q2 best time (seconds)
    #[serde(rename = "Q2")]
    pub q2: Option<f64>,
    /// Q3 best time (seconds)
    #[serde(rename = "Q3")]
    pub q3: Option<f64>,
    /// Total race time (seconds)
    pub time: Option<f64>,
    /// Finishing status (Finished, +1 Lap, Retired, ...)
    pub status: Option<String>,
    /// Championship points scored
    pub points: Option<f64>,
}

impl DriverResult {
    /// "First Last" built from name parts.
    pub fn joined_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
