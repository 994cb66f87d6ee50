//! MCP (Model Context Protocol) server for deskmate-tools.
//!
//! This crate exposes monday.com boards, weather lookups and a greeting
//! as MCP tools over stdio.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use handlers::ToolHandler;
pub use server::McpServer;
pub use transport::StdioTransport;
