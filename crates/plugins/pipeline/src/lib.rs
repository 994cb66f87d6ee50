//! Pipeline plugins for output transformation.
//!
//! This crate turns provider data into what the LLM actually reads:
//!
//! - **Blocks**: flatten rich document blocks into plain text
//! - **Format**: short text summaries for every tool
//! - **Truncation**: previews and output size limits with agent hints
//!
//! # Example
//!
//! ```ignore
//! use deskmate_pipeline::{extract_block_contents, Pipeline};
//!
//! let description = extract_block_contents(&blocks);
//! let output = Pipeline::new().transform_board_list(&boards, filter);
//! println!("{}", output.to_string_with_hints());
//! ```

pub mod blocks;
pub mod format;
pub mod truncation;

pub use blocks::{extract_block, extract_block_contents, BlockOutcome, SkipReason};

use deskmate_core::{Board, BoardFilter, ItemContent, User, Weather};

/// Output from a pipeline transformation.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// The rendered text
    pub content: String,
    /// Whether the content was cut to fit the size limit
    pub truncated: bool,
    /// Hint for the agent about hidden content
    pub agent_hint: Option<String>,
}

impl TransformOutput {
    /// Create a new output with content.
    pub fn new(content: String) -> Self {
        Self {
            content,
            truncated: false,
            agent_hint: None,
        }
    }

    /// Attach a hint for the agent.
    pub fn with_hint(mut self, hint: String) -> Self {
        self.agent_hint = Some(hint);
        self
    }

    /// Get the final output including any agent hints.
    pub fn to_string_with_hints(&self) -> String {
        if let Some(hint) = &self.agent_hint {
            format!("{}\n\n{}", self.content, hint)
        } else {
            self.content.clone()
        }
    }
}

/// Configuration for pipeline transformations.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum characters for the rendered text
    pub max_chars: usize,
    /// Weather unit code, used for the temperature symbol
    pub weather_units: String,
    /// Whether to include agent hints about pagination and truncation
    pub include_hints: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chars: 8000,
            weather_units: "m".to_string(),
            include_hints: true,
        }
    }
}

/// Pipeline rendering provider data into tool text.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Render a page of boards.
    ///
    /// A full page means more boards may exist, which is reported as a hint.
    pub fn transform_board_list(&self, boards: &[Board], filter: BoardFilter) -> TransformOutput {
        let content = format::board_list_to_text(boards, filter.page, filter.limit);
        let mut output = TransformOutput::new(content);

        let page_full = filter.limit > 0 && boards.len() >= filter.limit as usize;
        if self.config.include_hints && page_full {
            // No hint past the last addressable page
            if let Some(next_page) = filter.page.checked_add(1) {
                output = output.with_hint(format!(
                    "📊 Page {} is full. Use `page={}` with `limit={}` to look for more boards.",
                    filter.page, next_page, filter.limit
                ));
            }
        }

        self.apply_char_limit(output)
    }

    /// Render a board lookup, `None` meaning the board was not found.
    pub fn transform_board_details(&self, board_id: &str, board: Option<&Board>) -> TransformOutput {
        let content = match board {
            Some(board) => format::board_details_to_text(board),
            None => format::board_not_found_text(board_id),
        };
        self.apply_char_limit(TransformOutput::new(content))
    }

    /// Render an item with a description preview.
    pub fn transform_item(&self, item: &ItemContent) -> TransformOutput {
        self.apply_char_limit(TransformOutput::new(format::item_to_text(item)))
    }

    /// Render the current user.
    pub fn transform_user(&self, user: &User) -> TransformOutput {
        self.apply_char_limit(TransformOutput::new(format::user_to_text(user)))
    }

    /// Render a weather report.
    pub fn transform_weather(&self, city: &str, weather: &Weather) -> TransformOutput {
        let content = format::weather_to_text(city, weather, &self.config.weather_units);
        self.apply_char_limit(TransformOutput::new(content))
    }

    /// Apply character limit to output.
    fn apply_char_limit(&self, mut output: TransformOutput) -> TransformOutput {
        if output.content.chars().count() > self.config.max_chars {
            output.content = truncation::truncate_string(&output.content, self.config.max_chars);
            output.truncated = true;
            if self.config.include_hints {
                output.agent_hint = Some(format!(
                    "⚠️ Output truncated to {} chars. Use pagination or a smaller limit to get the rest.",
                    self.config.max_chars
                ));
            }
        }
        output
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
