//! Provider traits for the external services exposed as tools.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Board, BoardFilter, ItemContent, ItemQuery, User, Weather};

/// Trait for project-management services (monday.com and alike).
#[async_trait]
pub trait BoardProvider: Send + Sync {
    /// Get the provider name (e.g., "monday")
    fn provider_name(&self) -> &'static str;

    /// Get a page of boards
    async fn get_boards(&self, filter: BoardFilter) -> Result<Vec<Board>>;

    /// Get a board with the items matching `query`, or `None` if no such board
    async fn get_board_details(&self, board_id: &str, query: ItemQuery) -> Result<Option<Board>>;

    /// Get an item with its description flattened to plain text
    async fn get_item_content(&self, item_id: &str) -> Result<ItemContent>;

    /// Get current authenticated user
    async fn get_current_user(&self) -> Result<User>;
}

/// Trait for weather lookup services.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Get the provider name (e.g., "weatherstack")
    fn provider_name(&self) -> &'static str;

    /// Get current weather for a city
    async fn current_weather(&self, city: &str) -> Result<Weather>;
}
