//! WeatherStack API response types.

use serde::Deserialize;

/// Response from GET /current.
///
/// Failures are reported with HTTP 200, `success: false` and an `error`
/// object instead of the weather members.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherStackResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<WeatherStackError>,
    #[serde(default)]
    pub location: Option<WeatherStackLocation>,
    #[serde(default)]
    pub current: Option<WeatherStackCurrent>,
}

/// Error object of a failed lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherStackError {
    pub code: u16,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

/// Location block.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherStackLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub localtime: Option<String>,
}

/// Current conditions block.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherStackCurrent {
    pub temperature: f64,
    #[serde(default)]
    pub weather_descriptions: Vec<String>,
    #[serde(default)]
    pub feelslike: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}
