//! MCP tool definitions.
//!
//! Tools are grouped by the provider they need, so the server only
//! advertises what it can actually serve.

use serde_json::{json, Value};

use crate::protocol::{ToolAnnotations, ToolDefinition};

pub const BOARD_LIST: &str = "monday_get_board_list";
pub const BOARD_DETAILS: &str = "monday_get_board_details";
pub const BOARD_ITEM: &str = "monday_get_board_item_list";
pub const CURRENT_USER: &str = "monday_get_me";
pub const WEATHER: &str = "get_weather_data";
pub const GREET: &str = "greet";

/// Languages understood by the greeting tool.
pub const GREETING_LANGUAGES: [&str; 5] = ["en", "pt", "es", "fr", "de"];

fn read_only(
    name: &str,
    title: &str,
    description: &str,
    input_schema: Value,
    output_schema: Value,
    open_world: bool,
) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        title: Some(title.to_string()),
        description: description.to_string(),
        input_schema,
        output_schema: Some(output_schema),
        annotations: Some(ToolAnnotations {
            read_only_hint: Some(true),
            open_world_hint: Some(open_world),
        }),
    }
}

/// Schema of `{ "result": ... }` payloads, including the error shape.
fn result_schema(result: Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "result": {
                "anyOf": [
                    result,
                    {
                        "type": "object",
                        "properties": {
                            "error": { "type": "boolean" },
                            "type": { "type": "string" },
                            "message": { "type": "string" }
                        },
                        "required": ["error", "type", "message"]
                    }
                ]
            }
        },
        "required": ["result"]
    })
}

fn id_schema(description: &str) -> Value {
    json!({
        "type": ["string", "integer"],
        "description": description
    })
}

/// Tools backed by a board provider.
pub fn board_tools() -> Vec<ToolDefinition> {
    let board = json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" },
            "name": { "type": "string" },
            "description": { "type": ["string", "null"] },
            "item_terminology": { "type": "string" },
            "url": { "type": "string" },
            "views": { "type": "array" },
            "items": { "type": "array" }
        },
        "required": ["id", "name"]
    });

    vec![
        read_only(
            BOARD_LIST,
            "Board List",
            "List monday.com boards with their views, one page at a time",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of boards per page (default: 10)",
                        "minimum": 1
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number starting at 1 (default: 1)",
                        "minimum": 1
                    }
                }
            }),
            result_schema(json!({ "type": "array", "items": board.clone() })),
            true,
        ),
        read_only(
            BOARD_DETAILS,
            "Board Details",
            "Get a monday.com board with the items assigned to you that are ready to start, or all of its items",
            json!({
                "type": "object",
                "properties": {
                    "boardId": id_schema("ID of the board"),
                    "allItems": {
                        "type": "boolean",
                        "description": "Return every item instead of your items ready to start (default: false)"
                    }
                },
                "required": ["boardId"]
            }),
            result_schema(json!({ "anyOf": [board, { "type": "null" }] })),
            true,
        ),
        read_only(
            BOARD_ITEM,
            "Board Item",
            "Get a monday.com item with its description document flattened to plain text",
            json!({
                "type": "object",
                "properties": {
                    "itemId": id_schema("ID of the item")
                },
                "required": ["itemId"]
            }),
            result_schema(json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "name": { "type": "string" },
                    "description": { "type": "string" }
                },
                "required": ["id", "name", "description"]
            })),
            true,
        ),
        read_only(
            CURRENT_USER,
            "Current User",
            "Get the monday.com user that owns the API token",
            json!({ "type": "object", "properties": {} }),
            result_schema(json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "name": { "type": ["string", "null"] },
                    "email": { "type": ["string", "null"] },
                    "photo_url": { "type": "string" },
                    "title": { "type": "string" }
                },
                "required": ["id"]
            })),
            true,
        ),
    ]
}

/// Tools backed by a weather provider.
pub fn weather_tools() -> Vec<ToolDefinition> {
    vec![read_only(
        WEATHER,
        "Weather Data",
        "Get current weather conditions for a city",
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. \"New York\""
                }
            },
            "required": ["city"]
        }),
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "object",
                    "properties": { "localtime": { "type": "string" } },
                    "required": ["localtime"]
                },
                "current": {
                    "type": "object",
                    "properties": {
                        "temperature": { "type": "number" },
                        "weather_descriptions": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["temperature", "weather_descriptions"]
                }
            }
        }),
        true,
    )]
}

/// Tools that need no external service.
pub fn local_tools() -> Vec<ToolDefinition> {
    vec![read_only(
        GREET,
        "Greeting Tool",
        "Greet someone by name in one of several languages, with the current time",
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the person to greet"
                },
                "lang": {
                    "type": "string",
                    "enum": GREETING_LANGUAGES,
                    "description": "Language of the greeting (default: en)"
                }
            },
            "required": ["name"]
        }),
        json!({
            "type": "object",
            "properties": {
                "greeting": { "type": "string" },
                "dateTime": { "type": "string", "format": "date-time" }
            },
            "required": ["greeting", "dateTime"]
        }),
        false,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique() {
        let mut names: Vec<String> = board_tools()
            .into_iter()
            .chain(weather_tools())
            .chain(local_tools())
            .map(|t| t.name)
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 6);
    }

    #[test]
    fn test_all_tools_are_read_only() {
        for tool in board_tools().into_iter().chain(weather_tools()).chain(local_tools()) {
            let annotations = tool.annotations.expect("annotations");
            assert_eq!(annotations.read_only_hint, Some(true), "{}", tool.name);
            assert!(tool.output_schema.is_some(), "{}", tool.name);
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_required_arguments() {
        let tools = board_tools();
        let details = tools.iter().find(|t| t.name == BOARD_DETAILS).unwrap();
        assert_eq!(details.input_schema["required"], json!(["boardId"]));

        let item = tools.iter().find(|t| t.name == BOARD_ITEM).unwrap();
        assert_eq!(item.input_schema["required"], json!(["itemId"]));

        let greet = &local_tools()[0];
        assert_eq!(greet.input_schema["required"], json!(["name"]));
        assert_eq!(
            greet.input_schema["properties"]["lang"]["enum"],
            json!(["en", "pt", "es", "fr", "de"])
        );
    }
}
