//! monday.com provider implementation for deskmate-tools.
//!
//! This crate talks to the monday.com GraphQL API to list boards, read a
//! board's filtered items, fetch item descriptions as plain text and
//! identify the current user. It is read-only.

mod client;
mod types;

pub use client::MondayClient;
pub use types::*;

/// Default monday.com API URL.
pub const DEFAULT_MONDAY_URL: &str = "https://api.monday.com/v2";
