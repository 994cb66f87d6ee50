//! Common test utilities.
//!
//! Provider responses are recorded as JSON fixtures under `tests/fixtures/`
//! and served by a local [`MockServer`], so the real clients run end to end
//! without network access or secrets.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use deskmate_mcp::ToolHandler;
use deskmate_monday::MondayClient;
use deskmate_weather::WeatherStackClient;
use httpmock::MockServer;
use serde_json::Value;

/// Load a fixture from `tests/fixtures/{provider}/{name}.json`.
pub fn load_fixture(provider: &str, name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(provider)
        .join(format!("{}.json", name));

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Handler serving board tools from a monday.com client pointed at `server`.
pub fn monday_handler(server: &MockServer) -> ToolHandler {
    let client = MondayClient::with_base_url(server.url("/v2"), "test_token");
    ToolHandler::new().with_board_provider(Arc::new(client))
}

/// Handler serving the weather tool from a WeatherStack client pointed at `server`.
pub fn weather_handler(server: &MockServer) -> ToolHandler {
    let client = WeatherStackClient::with_base_url(server.base_url(), "test_key");
    ToolHandler::new().with_weather_provider(Arc::new(client))
}
