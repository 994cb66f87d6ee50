//! WeatherStack API client implementation.

use async_trait::async_trait;
use deskmate_core::{
    CurrentWeather, Error, Result, Weather, WeatherLocation, WeatherProvider,
};
use tracing::{debug, warn};

use crate::types::{WeatherStackError, WeatherStackResponse};
use crate::DEFAULT_WEATHERSTACK_URL;

/// WeatherStack error codes meaning the access key is missing or invalid.
const AUTH_ERROR_CODES: [u16; 2] = [101, 102];

/// WeatherStack API client.
pub struct WeatherStackClient {
    base_url: String,
    access_key: String,
    units: String,
    client: reqwest::Client,
}

impl WeatherStackClient {
    /// Create a new WeatherStack client.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_WEATHERSTACK_URL, access_key)
    }

    /// Create a new WeatherStack client with a custom base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            units: "m".to_string(),
            client: reqwest::Client::builder()
                .user_agent("deskmate-tools")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Set the unit system (`m`, `f` or `s`).
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Unit system used for lookups.
    pub fn units(&self) -> &str {
        &self.units
    }
}

fn map_api_error(error: WeatherStackError) -> Error {
    let message = error
        .info
        .or(error.error_type)
        .unwrap_or_else(|| "Unknown WeatherStack error".to_string());

    if AUTH_ERROR_CODES.contains(&error.code) {
        Error::Auth(message)
    } else {
        Error::Api {
            status: error.code,
            message,
        }
    }
}

fn map_weather(response: WeatherStackResponse) -> Result<Weather> {
    let (Some(location), Some(current)) = (response.location, response.current) else {
        return Err(Error::InvalidData(
            "Weather response is missing location or current conditions".to_string(),
        ));
    };

    Ok(Weather {
        location: WeatherLocation {
            name: location.name.unwrap_or_default(),
            country: location.country.unwrap_or_default(),
            localtime: location.localtime.unwrap_or_default(),
        },
        current: CurrentWeather {
            temperature: current.temperature,
            weather_descriptions: current.weather_descriptions,
            feelslike: current.feelslike,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
        },
    })
}

#[async_trait]
impl WeatherProvider for WeatherStackClient {
    fn provider_name(&self) -> &'static str {
        "weatherstack"
    }

    async fn current_weather(&self, city: &str) -> Result<Weather> {
        if city.trim().is_empty() {
            return Err(Error::InvalidData("City must not be empty".to_string()));
        }

        let url = format!("{}/current", self.base_url);
        debug!(city = city, units = %self.units, "WeatherStack lookup");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("query", city),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status = status_code, body = %message, "WeatherStack error response");
            return Err(Error::from_status(status_code, message));
        }

        let body: WeatherStackResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidData(format!("Failed to parse response: {}", e)))?;

        if body.success == Some(false) || body.error.is_some() {
            let error = body.error.unwrap_or(WeatherStackError {
                code: 0,
                error_type: None,
                info: None,
            });
            warn!(code = error.code, "WeatherStack lookup failed");
            return Err(map_api_error(error));
        }

        map_weather(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_api_error_auth() {
        let err = map_api_error(WeatherStackError {
            code: 101,
            error_type: Some("invalid_access_key".into()),
            info: Some("You have not supplied a valid API Access Key.".into()),
        });
        assert!(matches!(err, Error::Auth(m) if m.contains("valid API Access Key")));
    }

    #[test]
    fn test_map_api_error_other() {
        let err = map_api_error(WeatherStackError {
            code: 615,
            error_type: Some("request_failed".into()),
            info: None,
        });
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 615);
                assert_eq!(message, "request_failed");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_map_weather_missing_blocks() {
        let response = WeatherStackResponse {
            success: None,
            error: None,
            location: None,
            current: None,
        };
        assert!(matches!(map_weather(response), Err(Error::InvalidData(_))));
    }

    // =========================================================================
    // Integration tests with httpmock
    // =========================================================================

    mod integration {
        use super::*;
        use httpmock::prelude::*;
        use serde_json::json;

        fn create_test_client(server: &MockServer) -> WeatherStackClient {
            WeatherStackClient::with_base_url(server.base_url(), "test_key")
        }

        fn sample_weather_json() -> serde_json::Value {
            json!({
                "request": {"type": "City", "query": "New York, United States of America"},
                "location": {
                    "name": "New York",
                    "country": "United States of America",
                    "localtime": "2024-03-01 09:15"
                },
                "current": {
                    "temperature": 7,
                    "weather_descriptions": ["Partly cloudy"],
                    "feelslike": 4,
                    "humidity": 61,
                    "wind_speed": 13
                }
            })
        }

        #[tokio::test]
        async fn test_current_weather() {
            let server = MockServer::start();

            let mock = server.mock(|when, then| {
                when.method(GET)
                    .path("/current")
                    .query_param("access_key", "test_key")
                    .query_param("query", "New York")
                    .query_param("units", "m");
                then.status(200).json_body(sample_weather_json());
            });

            let client = create_test_client(&server);
            let weather = client.current_weather("New York").await.unwrap();

            mock.assert();
            assert_eq!(weather.location.name, "New York");
            assert_eq!(weather.location.localtime, "2024-03-01 09:15");
            assert_eq!(weather.current.temperature, 7.0);
            assert_eq!(weather.current.weather_descriptions, vec!["Partly cloudy"]);
            assert_eq!(weather.current.humidity, Some(61.0));
        }

        #[tokio::test]
        async fn test_units_parameter() {
            let server = MockServer::start();

            let mock = server.mock(|when, then| {
                when.method(GET).path("/current").query_param("units", "f");
                then.status(200).json_body(sample_weather_json());
            });

            let client = create_test_client(&server).with_units("f");
            client.current_weather("Austin").await.unwrap();
            mock.assert();
        }

        #[tokio::test]
        async fn test_invalid_access_key() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(GET).path("/current");
                then.status(200).json_body(json!({
                    "success": false,
                    "error": {
                        "code": 101,
                        "type": "invalid_access_key",
                        "info": "You have not supplied a valid API Access Key."
                    }
                }));
            });

            let client = create_test_client(&server);
            let result = client.current_weather("Paris").await;
            assert!(matches!(result, Err(Error::Auth(_))));
        }

        #[tokio::test]
        async fn test_unknown_city() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(GET).path("/current");
                then.status(200).json_body(json!({
                    "success": false,
                    "error": {
                        "code": 615,
                        "type": "request_failed",
                        "info": "Your API request failed. Please try again or contact support."
                    }
                }));
            });

            let client = create_test_client(&server);
            let result = client.current_weather("Atlantis").await;
            assert!(matches!(result, Err(Error::Api { status: 615, .. })));
        }

        #[tokio::test]
        async fn test_http_error() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(GET).path("/current");
                then.status(503).body("Service Unavailable");
            });

            let client = create_test_client(&server);
            let result = client.current_weather("Berlin").await;
            assert!(matches!(result, Err(Error::Api { status: 503, .. })));
        }

        #[tokio::test]
        async fn test_empty_city_is_rejected() {
            let server = MockServer::start();
            let client = create_test_client(&server);
            let result = client.current_weather("  ").await;
            assert!(matches!(result, Err(Error::InvalidData(_))));
        }
    }
}
