//! Tool handlers for MCP server.
//!
//! This module implements the actual tool execution logic,
//! calling providers and rendering output through the pipeline.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use deskmate_core::config::{MONDAY_TOKEN_ENV, WEATHER_KEY_ENV};
use deskmate_core::{BoardFilter, BoardProvider, Error, ItemQuery, WeatherProvider};
use deskmate_pipeline::format::{failure_to_text, greeting_message, greeting_to_text};
use deskmate_pipeline::{Pipeline, PipelineConfig};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{ToolCallResult, ToolDefinition};
use crate::tools;

/// Tool handler that executes tools using providers.
pub struct ToolHandler {
    boards: Option<Arc<dyn BoardProvider>>,
    weather: Option<Arc<dyn WeatherProvider>>,
    pipeline_config: PipelineConfig,
    default_board_limit: u32,
}

impl ToolHandler {
    /// Create a handler without providers. Only local tools are served.
    pub fn new() -> Self {
        Self {
            boards: None,
            weather: None,
            pipeline_config: PipelineConfig::default(),
            default_board_limit: BoardFilter::default().limit,
        }
    }

    /// Serve the board tools from `provider`.
    pub fn with_board_provider(mut self, provider: Arc<dyn BoardProvider>) -> Self {
        self.boards = Some(provider);
        self
    }

    /// Serve the weather tool from `provider`.
    pub fn with_weather_provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }

    /// Create with custom pipeline configuration.
    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline_config = config;
        self
    }

    /// Page size used when a board list call gives no `limit`.
    pub fn with_default_board_limit(mut self, limit: u32) -> Self {
        self.default_board_limit = limit.max(1);
        self
    }

    /// Get available tool definitions.
    pub fn available_tools(&self) -> Vec<ToolDefinition> {
        let mut tools = Vec::new();
        if self.boards.is_some() {
            tools.extend(tools::board_tools());
        }
        if self.weather.is_some() {
            tools.extend(tools::weather_tools());
        }
        tools.extend(tools::local_tools());
        tools
    }

    /// Log every tool the server is about to offer.
    pub fn log_registered_tools(&self) {
        let tools = self.available_tools();
        for tool in &tools {
            tracing::info!(tool = %tool.name, "Registered tool");
        }
        if self.boards.is_none() {
            tracing::warn!("{} is not set, monday.com tools are disabled", MONDAY_TOKEN_ENV);
        }
        if self.weather.is_none() {
            tracing::warn!("{} is not set, weather tool is disabled", WEATHER_KEY_ENV);
        }
        tracing::info!("Registered {} tools", tools.len());
    }

    /// Execute a tool by name with arguments.
    pub async fn execute(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let arguments = arguments.unwrap_or(Value::Null);
        match name {
            tools::BOARD_LIST => self.handle_board_list(arguments).await,
            tools::BOARD_DETAILS => self.handle_board_details(arguments).await,
            tools::BOARD_ITEM => self.handle_board_item(arguments).await,
            tools::CURRENT_USER => self.handle_current_user().await,
            tools::WEATHER => self.handle_weather(arguments).await,
            tools::GREET => self.handle_greet(arguments),
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline::with_config(self.pipeline_config.clone())
    }

    fn board_provider(&self) -> Result<&Arc<dyn BoardProvider>, ToolCallResult> {
        self.boards.as_ref().ok_or_else(|| {
            ToolCallResult::error(format!(
                "monday.com is not configured. Set {} to enable this tool.",
                MONDAY_TOKEN_ENV
            ))
        })
    }

    fn weather_provider(&self) -> Result<&Arc<dyn WeatherProvider>, ToolCallResult> {
        self.weather.as_ref().ok_or_else(|| {
            ToolCallResult::error(format!(
                "Weather lookups are not configured. Set {} to enable this tool.",
                WEATHER_KEY_ENV
            ))
        })
    }

    /// Handle monday_get_board_list tool call.
    async fn handle_board_list(&self, arguments: Value) -> ToolCallResult {
        let provider = match self.board_provider() {
            Ok(p) => p,
            Err(result) => return result,
        };
        let params: BoardListParams = parse_params(arguments);

        let filter = BoardFilter {
            limit: params.limit.unwrap_or(self.default_board_limit).max(1),
            page: params.page.unwrap_or(1).max(1),
        };

        match provider.get_boards(filter).await {
            Ok(boards) => {
                tracing::debug!(
                    "Got {} boards from {}",
                    boards.len(),
                    provider.provider_name()
                );
                let output = self.pipeline().transform_board_list(&boards, filter);
                ToolCallResult::text(output.to_string_with_hints())
                    .with_structured(json!({ "result": boards }))
            }
            Err(e) => failure("board list", "BoardListError", e),
        }
    }

    /// Handle monday_get_board_details tool call.
    async fn handle_board_details(&self, arguments: Value) -> ToolCallResult {
        let provider = match self.board_provider() {
            Ok(p) => p,
            Err(result) => return result,
        };
        let board_id = match id_param(&arguments, "boardId") {
            Ok(id) => id,
            Err(result) => return result,
        };

        let params: BoardDetailsParams = parse_params(arguments);
        let query = if params.all_items {
            ItemQuery::all()
        } else {
            ItemQuery::default()
        };

        match provider.get_board_details(&board_id, query).await {
            Ok(board) => {
                let output = self
                    .pipeline()
                    .transform_board_details(&board_id, board.as_ref());
                ToolCallResult::text(output.to_string_with_hints())
                    .with_structured(json!({ "result": board }))
            }
            Err(e) => failure("board details", "BoardDetailsError", e),
        }
    }

    /// Handle monday_get_board_item_list tool call.
    async fn handle_board_item(&self, arguments: Value) -> ToolCallResult {
        let provider = match self.board_provider() {
            Ok(p) => p,
            Err(result) => return result,
        };
        let item_id = match id_param(&arguments, "itemId") {
            Ok(id) => id,
            Err(result) => return result,
        };

        match provider.get_item_content(&item_id).await {
            Ok(item) => {
                let output = self.pipeline().transform_item(&item);
                ToolCallResult::text(output.to_string_with_hints())
                    .with_structured(json!({ "result": item }))
            }
            Err(e) => failure("item content", "ItemContentError", e),
        }
    }

    /// Handle monday_get_me tool call.
    async fn handle_current_user(&self) -> ToolCallResult {
        let provider = match self.board_provider() {
            Ok(p) => p,
            Err(result) => return result,
        };

        match provider.get_current_user().await {
            Ok(user) => {
                let output = self.pipeline().transform_user(&user);
                ToolCallResult::text(output.to_string_with_hints())
                    .with_structured(json!({ "result": user }))
            }
            Err(e) => failure("user info", "UserInfoError", e),
        }
    }

    /// Handle get_weather_data tool call.
    async fn handle_weather(&self, arguments: Value) -> ToolCallResult {
        let provider = match self.weather_provider() {
            Ok(p) => p,
            Err(result) => return result,
        };
        let city = match string_param(&arguments, "city") {
            Ok(city) => city,
            Err(result) => return result,
        };

        match provider.current_weather(&city).await {
            Ok(weather) => {
                tracing::debug!("Got weather for {} from {}", city, provider.provider_name());
                let output = self.pipeline().transform_weather(&city, &weather);
                ToolCallResult::text(output.to_string_with_hints()).with_structured(json!({
                    "location": { "localtime": weather.location.localtime },
                    "current": {
                        "temperature": weather.current.temperature,
                        "weather_descriptions": weather.current.weather_descriptions,
                    }
                }))
            }
            Err(e) => failure("weather data", "WeatherError", e),
        }
    }

    /// Handle greet tool call.
    fn handle_greet(&self, arguments: Value) -> ToolCallResult {
        let name = match string_param(&arguments, "name") {
            Ok(name) => name,
            Err(result) => return result,
        };
        let params: GreetParams = parse_params(arguments);
        let lang = params.lang.as_deref().unwrap_or("en");

        let greeting = greeting_message(&name, lang);
        let date_time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        ToolCallResult::text(greeting_to_text(&greeting, &date_time)).with_structured(json!({
            "greeting": greeting,
            "dateTime": date_time,
        }))
    }
}

impl Default for ToolHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error result carrying both the failure text and its structured form.
fn failure(what: &str, error_type: &str, error: Error) -> ToolCallResult {
    tracing::warn!("Failed to retrieve {}: {}", what, error);
    let message = error.to_string();
    ToolCallResult::error(failure_to_text(what, &message)).with_structured(json!({
        "result": {
            "error": true,
            "type": error_type,
            "message": message,
        }
    }))
}

/// Lenient parse: unknown or mistyped optional fields fall back to defaults.
fn parse_params<T: for<'de> Deserialize<'de> + Default>(arguments: Value) -> T {
    serde_json::from_value(arguments).unwrap_or_default()
}

fn missing_param(name: &str) -> ToolCallResult {
    ToolCallResult::error(format!("Missing required parameter: {}", name))
}

/// IDs are accepted both as strings and as numbers.
fn id_param(arguments: &Value, name: &str) -> Result<String, ToolCallResult> {
    match arguments.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(missing_param(name)),
    }
}

fn string_param(arguments: &Value, name: &str) -> Result<String, ToolCallResult> {
    match arguments.get(name).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(missing_param(name)),
    }
}

/// Parameters for monday_get_board_list tool.
#[derive(Debug, Default, Deserialize)]
struct BoardListParams {
    limit: Option<u32>,
    page: Option<u32>,
}

/// Optional parameters for monday_get_board_details tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardDetailsParams {
    #[serde(default)]
    all_items: bool,
}

/// Parameters for greet tool.
#[derive(Debug, Default, Deserialize)]
struct GreetParams {
    lang: Option<String>,
}
