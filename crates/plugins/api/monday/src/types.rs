//! monday.com API response types.
//!
//! These types represent the raw GraphQL responses from the monday.com v2 API.
//! They are deserialized and then mapped to unified types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// GraphQL envelope
// =============================================================================

/// Request body sent to the GraphQL endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// Response envelope returned by the GraphQL endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
    /// Set instead of `errors` for complexity and rate limit failures
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Single entry of the `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

// =============================================================================
// User
// =============================================================================

/// monday.com user representation.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_thumb: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response data of the `me` query.
#[derive(Debug, Clone, Deserialize)]
pub struct MeData {
    #[serde(default)]
    pub me: Option<MondayUser>,
}

// =============================================================================
// Board
// =============================================================================

/// monday.com board representation.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayBoard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_terminology: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub views: Option<Vec<MondayView>>,
    #[serde(default)]
    pub items_page: Option<MondayItemsPage>,
}

/// Board view.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayView {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub view_type: Option<String>,
}

/// Page of items inside a board.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayItemsPage {
    #[serde(default)]
    pub items: Vec<MondayItemRef>,
}

/// Item reference inside an items page.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayItemRef {
    pub id: String,
    pub name: String,
}

/// Response data of `boards` queries.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardsData {
    #[serde(default)]
    pub boards: Vec<MondayBoard>,
}

// =============================================================================
// Item and document
// =============================================================================

/// monday.com item with its description document.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<MondayDocument>,
}

/// Document attached to an item.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub blocks: Option<Vec<MondayBlock>>,
}

/// Raw document block.
///
/// `content` is a JSON scalar: normally a string holding encoded JSON, but
/// an inline object is accepted as well.
#[derive(Debug, Clone, Deserialize)]
pub struct MondayBlock {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub doc_id: String,
    #[serde(default)]
    pub content: Option<Value>,
}

/// Response data of `items` queries.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsData {
    #[serde(default)]
    pub items: Vec<MondayItem>,
}
