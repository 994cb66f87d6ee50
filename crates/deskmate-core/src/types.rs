//! Common types shared by providers, the pipeline and the MCP server.

use serde::{Deserialize, Serialize};

// =============================================================================
// Users
// =============================================================================

/// Represents a user of a board service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// =============================================================================
// Boards and items
// =============================================================================

/// A view configured on a board (table, kanban, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub view_type: String,
}

/// Minimal item reference as returned inside a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
}

/// Represents a board.
///
/// `items` is only populated by detail queries; list queries leave it `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_terminology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<BoardView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemSummary>>,
}

/// An item with its description flattened to plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemContent {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// One block of a rich-text document attached to an item.
///
/// `content` is a JSON document encoded as a string. It is kept opaque here
/// and decoded by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBlock {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "documentId")]
    pub doc_id: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl DocumentBlock {
    /// Create a block with only content set.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Pagination for board listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    pub limit: u32,
    pub page: u32,
}

impl Default for BoardFilter {
    fn default() -> Self {
        Self { limit: 10, page: 1 }
    }
}

/// A single rule of an item query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRule {
    pub column_id: String,
    pub compare_value: String,
    /// Operator name; `None` means the service default (`any_of`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Rules used to filter items when fetching board details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub rules: Vec<ItemRule>,
}

impl ItemQuery {
    /// Query matching every item of the board.
    pub fn all() -> Self {
        Self { rules: Vec::new() }
    }
}

impl Default for ItemQuery {
    /// Items assigned to the current user that are ready to start.
    fn default() -> Self {
        Self {
            rules: vec![
                ItemRule {
                    column_id: "task_owner".to_string(),
                    compare_value: "assigned_to_me".to_string(),
                    operator: None,
                },
                ItemRule {
                    column_id: "task_status".to_string(),
                    compare_value: "Ready to start".to_string(),
                    operator: Some("contains_terms".to_string()),
                },
            ],
        }
    }
}

// =============================================================================
// Weather
// =============================================================================

/// Location block of a weather report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub localtime: String,
}

/// Current conditions of a weather report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    #[serde(default)]
    pub weather_descriptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feelslike: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

/// Current weather for a city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub location: WeatherLocation,
    pub current: CurrentWeather,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_filter_default() {
        let filter = BoardFilter::default();
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_item_query_default_rules() {
        let query = ItemQuery::default();
        assert_eq!(query.rules.len(), 2);
        assert_eq!(query.rules[0].column_id, "task_owner");
        assert_eq!(query.rules[0].operator, None);
        assert_eq!(query.rules[1].compare_value, "Ready to start");
        assert_eq!(query.rules[1].operator.as_deref(), Some("contains_terms"));
        assert!(ItemQuery::all().rules.is_empty());
    }

    #[test]
    fn test_document_block_accepts_both_id_spellings() {
        let a: DocumentBlock =
            serde_json::from_str(r#"{"id":"1","doc_id":"d1","content":"{}"}"#).unwrap();
        let b: DocumentBlock =
            serde_json::from_str(r#"{"id":"1","documentId":"d1","content":"{}"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.doc_id, "d1");
    }

    #[test]
    fn test_document_block_missing_content() {
        let block: DocumentBlock = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert!(block.content.is_none());
    }

    #[test]
    fn test_board_serialization_skips_empty() {
        let board = Board {
            id: "1".into(),
            name: "Roadmap".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&board).unwrap();
        assert!(json.get("views").is_none());
        assert!(json.get("items").is_none());
        assert!(json.get("description").unwrap().is_null());
    }

    #[test]
    fn test_board_view_type_rename() {
        let view: BoardView =
            serde_json::from_str(r#"{"id":"7","name":"Main","type":"BoardView"}"#).unwrap();
        assert_eq!(view.view_type, "BoardView");
    }
}
