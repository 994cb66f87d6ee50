//! Core traits, types, and error handling for deskmate-tools.
//!
//! This crate provides the foundational abstractions used across all deskmate components.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use provider::{BoardProvider, WeatherProvider};
pub use types::*;
