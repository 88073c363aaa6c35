//! Weather samples

use serde::{Deserialize, Serialize};

/// Environmental conditions at one point in the session
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct WeatherSample {
    /// Session time (seconds)
    pub time: f64,
    /// Air temperature (°C)
    pub air_temp: Option<f64>,
    /// Track surface temperature (°C)
    pub track_temp: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<f64>,
    /// Air pressure (mbar)
    pub pressure: Option<f64>,
    /// Rain falling
    pub rainfall: Option<bool>,
    /// Wind speed (m/s)
    pub wind_speed: Option<f64>,
    /// Wind direction (degrees)
    pub wind_direction: Option<f64>,
}
