//! WeatherStack provider implementation for deskmate-tools.
//!
//! Looks up current conditions for a city through the WeatherStack
//! `current` endpoint.

mod client;
mod types;

pub use client::WeatherStackClient;
pub use types::*;

/// Default WeatherStack API URL.
pub const DEFAULT_WEATHERSTACK_URL: &str = "http://api.weatherstack.com";
