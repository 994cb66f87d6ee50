//! monday.com GraphQL client implementation.

use async_trait::async_trait;
use deskmate_core::{
    Board, BoardFilter, BoardProvider, BoardView, DocumentBlock, Error, ItemContent, ItemQuery,
    ItemSummary, Result, User,
};
use deskmate_pipeline::extract_block_contents;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::types::{
    BoardsData, GraphQlRequest, GraphQlResponse, ItemsData, MeData, MondayBlock, MondayBoard,
    MondayUser,
};
use crate::DEFAULT_MONDAY_URL;

const BOARD_LIST_QUERY: &str = r#"query ($limit: Int, $page: Int) {
  boards(limit: $limit, page: $page) {
    id
    name
    description
    item_terminology
    url
    views {
      type
      id
      name
    }
  }
}"#;

const BOARD_DETAILS_QUERY: &str = r#"query ($ids: [ID!], $rules: [ItemsQueryRule!]) {
  boards(ids: $ids) {
    id
    name
    items_page(query_params: { rules: $rules }) {
      items {
        id
        name
      }
    }
  }
}"#;

const ITEM_CONTENT_QUERY: &str = r#"query ($ids: [ID!]) {
  items(ids: $ids) {
    id
    name
    description {
      id
      blocks {
        id
        doc_id
        content
      }
    }
  }
}"#;

const ME_QUERY: &str = r#"query {
  me {
    id
    name
    email
    photo_thumb
    title
  }
}"#;

/// monday.com API client.
pub struct MondayClient {
    base_url: String,
    token: String,
    api_version: Option<String>,
    client: reqwest::Client,
}

impl MondayClient {
    /// Create a new monday.com client.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_MONDAY_URL, token)
    }

    /// Create a new monday.com client with a custom endpoint (for testing).
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            api_version: None,
            client: reqwest::Client::builder()
                .user_agent("deskmate-tools")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Pin the API version sent in the `API-Version` header.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Run a GraphQL query and return its `data` member.
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        debug!(url = %self.base_url, variables = %variables, "monday GraphQL request");

        let mut request = self
            .client
            .post(&self.base_url)
            .header("Authorization", &self.token)
            .header("Content-Type", "application/json");

        if let Some(version) = &self.api_version {
            request = request.header("API-Version", version);
        }

        let response = request
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Handle response and map errors.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status = status_code, body = %message, "monday API error response");
            return Err(Error::from_status(status_code, message));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::InvalidData(format!("Failed to parse response: {}", e)))?;

        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(errors = %message, "monday GraphQL errors");
            return Err(Error::GraphQl(message));
        }

        if let Some(message) = envelope.error_message {
            warn!(error = %message, "monday API error message");
            return Err(Error::GraphQl(message));
        }

        envelope
            .data
            .ok_or_else(|| Error::InvalidData("Response contained no data".to_string()))
    }
}

/// monday.com IDs are numeric; reject anything else before it reaches the API.
fn validate_id(kind: &str, id: &str) -> Result<()> {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "{} ID must be numeric, got '{}'",
            kind, id
        )))
    }
}

// =============================================================================
// Mapping functions: monday.com types -> Unified types
// =============================================================================

fn map_user(user: MondayUser) -> User {
    User {
        id: user.id,
        name: user.name,
        email: user.email,
        photo_url: user.photo_thumb,
        title: user.title,
    }
}

fn map_board(board: MondayBoard) -> Board {
    Board {
        id: board.id,
        name: board.name,
        description: board.description,
        item_terminology: board.item_terminology,
        url: board.url,
        views: board
            .views
            .unwrap_or_default()
            .into_iter()
            .map(|v| BoardView {
                id: v.id,
                name: v.name,
                view_type: v.view_type.unwrap_or_default(),
            })
            .collect(),
        items: board.items_page.map(|page| {
            page.items
                .into_iter()
                .map(|i| ItemSummary {
                    id: i.id,
                    name: i.name,
                })
                .collect()
        }),
    }
}

/// Block content is a JSON scalar. A string is passed through; an inline
/// value is re-encoded so the extractor sees the same text either way.
fn map_block(block: MondayBlock) -> DocumentBlock {
    let content = match block.content {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    };
    DocumentBlock {
        id: block.id,
        doc_id: block.doc_id,
        content,
    }
}

// =============================================================================
// Trait implementation
// =============================================================================

#[async_trait]
impl BoardProvider for MondayClient {
    fn provider_name(&self) -> &'static str {
        "monday"
    }

    async fn get_boards(&self, filter: BoardFilter) -> Result<Vec<Board>> {
        let variables = json!({ "limit": filter.limit, "page": filter.page });
        let data: BoardsData = self.query(BOARD_LIST_QUERY, variables).await?;
        debug!(count = data.boards.len(), "Fetched boards");
        Ok(data.boards.into_iter().map(map_board).collect())
    }

    async fn get_board_details(&self, board_id: &str, query: ItemQuery) -> Result<Option<Board>> {
        validate_id("Board", board_id)?;

        let variables = json!({ "ids": [board_id], "rules": query.rules });
        let data: BoardsData = self.query(BOARD_DETAILS_QUERY, variables).await?;
        Ok(data.boards.into_iter().next().map(map_board))
    }

    async fn get_item_content(&self, item_id: &str) -> Result<ItemContent> {
        validate_id("Item", item_id)?;

        let data: ItemsData = self
            .query(ITEM_CONTENT_QUERY, json!({ "ids": [item_id] }))
            .await?;

        let item = data
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Item {} not found", item_id)))?;

        let blocks: Vec<DocumentBlock> = item
            .description
            .and_then(|d| d.blocks)
            .unwrap_or_default()
            .into_iter()
            .map(map_block)
            .collect();

        debug!(item_id = item_id, blocks = blocks.len(), "Extracting item description");

        Ok(ItemContent {
            id: item.id,
            name: item.name,
            description: extract_block_contents(&blocks),
        })
    }

    async fn get_current_user(&self) -> Result<User> {
        let data: MeData = self.query(ME_QUERY, json!({})).await?;
        data.me
            .map(map_user)
            .ok_or_else(|| Error::NotFound("Current user not returned".to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
