//! Text rendering of tool results.
//!
//! Every tool answers with a short human-readable summary next to its
//! structured payload. The renderers here produce that summary.

use deskmate_core::{Board, ItemContent, User, Weather};

use crate::truncation;

/// Characters of an item description shown in a summary.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const GREETING_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

// ============================================================================
// Boards
// ============================================================================

/// Summary of a page of boards.
pub fn board_list_to_text(boards: &[Board], page: u32, limit: u32) -> String {
    let suffix = if boards.len() == 1 { "" } else { "s" };
    let list = boards
        .iter()
        .map(|b| format!("• {} (ID: {})", b.name, b.id))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "✓ Retrieved {} board{} (page {}, limit {})\n\n{}",
        boards.len(),
        suffix,
        page,
        limit,
        list
    )
}

/// Summary of a board and its filtered items.
pub fn board_details_to_text(board: &Board) -> String {
    let items = board.items.as_deref().unwrap_or_default();
    let item_list = if items.is_empty() {
        "  (no items)".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("  • {} (ID: {})", item.name, item.id))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "✓ Retrieved board: {}\nBoard ID: {}\nFiltered Items ({}):\n{}",
        board.name,
        board.id,
        items.len(),
        item_list
    )
}

/// Message for a board lookup that matched nothing.
pub fn board_not_found_text(board_id: &str) -> String {
    format!("⚠ No board found with ID: {}", board_id)
}

// ============================================================================
// Items
// ============================================================================

/// Summary of an item with a shortened description.
pub fn item_to_text(item: &ItemContent) -> String {
    let description = if item.description.is_empty() {
        "(no description)".to_string()
    } else {
        truncation::preview(&item.description, DESCRIPTION_PREVIEW_CHARS)
    };

    format!(
        "✓ Retrieved item: {}\nItem ID: {}\nDescription: {}",
        item.name, item.id, description
    )
}

// ============================================================================
// Users
// ============================================================================

/// Summary of the authenticated user.
pub fn user_to_text(user: &User) -> String {
    let or = |value: Option<&str>, fallback: &'static str| -> String {
        value
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };

    format!(
        "✓ Current user: {}\nUser ID: {}\nEmail: {}",
        or(user.name.as_deref(), "Unknown"),
        or(Some(user.id.as_str()), "N/A"),
        or(user.email.as_deref(), "N/A")
    )
}

// ============================================================================
// Weather
// ============================================================================

/// Temperature unit symbol for a WeatherStack unit code.
pub fn temperature_unit(units: &str) -> &'static str {
    match units {
        "f" => "°F",
        "s" => "K",
        _ => "°C",
    }
}

/// Weather report for a city.
pub fn weather_to_text(city: &str, weather: &Weather, units: &str) -> String {
    let descriptions = weather
        .current
        .weather_descriptions
        .iter()
        .map(|d| format!("• {}", d))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🌤️  Weather Report for {}\n\n{}\n\n🌡️  Temperature: {}{}\n\n🕐  Local Time: {}\n\n{}",
        city,
        descriptions,
        weather.current.temperature,
        temperature_unit(units),
        weather.location.localtime,
        RULE
    )
}

// ============================================================================
// Greeting
// ============================================================================

/// Greeting sentence in one of the supported languages.
///
/// Unknown language codes fall back to English.
pub fn greeting_message(name: &str, lang: &str) -> String {
    match lang {
        "pt" => format!("Olá, {}! Bem-vindo ao servidor MCP.", name),
        "es" => format!("¡Hola, {}! Bienvenido al servidor MCP.", name),
        "fr" => format!("Bonjour, {}! Bienvenue sur le serveur MCP.", name),
        "de" => format!("Hallo, {}! Willkommen beim MCP-Server.", name),
        _ => format!("Hello, {}! Welcome to the MCP server.", name),
    }
}

/// Full greeting card with a timestamp.
pub fn greeting_to_text(greeting: &str, date_time: &str) -> String {
    format!(
        "{}\n\n{}\n📅 Date & Time: {}\n{}\n\nWe're delighted to serve you today!",
        greeting, GREETING_RULE, date_time, GREETING_RULE
    )
}

// ============================================================================
// Errors
// ============================================================================

/// Failure message shown in place of a result.
pub fn failure_to_text(what: &str, message: &str) -> String {
    format!("✗ Failed to retrieve {}: {}", what, message)
}
