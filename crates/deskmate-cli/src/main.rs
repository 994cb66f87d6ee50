//! Deskmate CLI - Command-line interface for deskmate-tools.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use deskmate_core::config::{MONDAY_TOKEN_ENV, WEATHER_KEY_ENV};
use deskmate_core::{Config, Credentials};
use deskmate_mcp::{McpServer, ToolHandler};
use deskmate_monday::MondayClient;
use deskmate_pipeline::PipelineConfig;
use deskmate_weather::WeatherStackClient;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deskmate")]
#[command(author, version, about = "Deskmate - monday.com and weather tools for AI assistants", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdin/stdout
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List monday.com boards
    Boards {
        /// Boards per page
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show a monday.com board and its items ready to start
    Board {
        /// Board ID
        id: String,

        /// List every item instead of your items ready to start
        #[arg(short, long)]
        all: bool,
    },

    /// Show a monday.com item and its description
    Item {
        /// Item ID
        id: String,
    },

    /// Show the monday.com user owning the token
    Me,

    /// Show current weather for a city
    Weather {
        /// City name
        city: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value (e.g. `monday.board_limit 25`)
    Set {
        /// Key in `section.field` form
        key: String,
        /// New value
        value: String,
    },

    /// Print a configuration value
    Get {
        /// Key in `section.field` form
        key: String,
    },

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries MCP messages, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Serve) => {
            let handler = build_handler(&Config::load()?, &Credentials::from_env());
            let mut server = McpServer::new(handler);
            server.run().await?;
        }
        Some(Commands::Config { command }) => run_config(command)?,
        Some(Commands::Boards { limit, page }) => {
            let mut args = json!({ "page": page });
            if let Some(limit) = limit {
                args["limit"] = json!(limit);
            }
            run_tool("monday_get_board_list", args).await?;
        }
        Some(Commands::Board { id, all }) => {
            run_tool(
                "monday_get_board_details",
                json!({ "boardId": id, "allItems": all }),
            )
            .await?;
        }
        Some(Commands::Item { id }) => {
            run_tool("monday_get_board_item_list", json!({ "itemId": id })).await?;
        }
        Some(Commands::Me) => run_tool("monday_get_me", json!({})).await?,
        Some(Commands::Weather { city }) => {
            run_tool("get_weather_data", json!({ "city": city })).await?;
        }
        None => {
            println!("Deskmate - monday.com and weather tools for AI assistants");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}

/// Build a tool handler from configuration and environment secrets.
///
/// A provider whose secret is missing is left out.
fn build_handler(config: &Config, credentials: &Credentials) -> ToolHandler {
    let monday = config.monday_or_default();
    let weather = config.weather_or_default();

    let mut handler = ToolHandler::new().with_pipeline_config(PipelineConfig {
        weather_units: weather.units.clone(),
        ..Default::default()
    });

    if let Some(limit) = monday.board_limit {
        handler = handler.with_default_board_limit(limit);
    }

    match &credentials.monday_token {
        Some(token) => {
            let mut client = MondayClient::with_base_url(&monday.api_url, token.clone());
            if let Some(version) = &monday.api_version {
                client = client.with_api_version(version.clone());
            }
            handler = handler.with_board_provider(Arc::new(client));
        }
        None => tracing::debug!("{} not set, skipping monday.com", MONDAY_TOKEN_ENV),
    }

    match &credentials.weather_key {
        Some(key) => {
            let client = WeatherStackClient::with_base_url(&weather.api_url, key.clone())
                .with_units(weather.units);
            handler = handler.with_weather_provider(Arc::new(client));
        }
        None => tracing::debug!("{} not set, skipping weather", WEATHER_KEY_ENV),
    }

    handler
}

/// Run one tool and print its text. Tool failures become a non-zero exit.
async fn run_tool(name: &str, arguments: serde_json::Value) -> anyhow::Result<()> {
    let handler = build_handler(&Config::load()?, &Credentials::from_env());
    let result = handler.execute(name, Some(arguments)).await;
    let text = result.first_text().unwrap_or_default();

    if result.is_error == Some(true) {
        anyhow::bail!("{}", text);
    }

    println!("{}", text);
    Ok(())
}

fn run_config(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load()?;
            let monday = config.monday_or_default();
            let weather = config.weather_or_default();
            let credentials = Credentials::from_env();
            let status = |set: bool| if set { "set" } else { "not set" };

            println!("[monday]");
            println!("api_url = {}", monday.api_url);
            println!(
                "api_version = {}",
                monday.api_version.as_deref().unwrap_or("(default)")
            );
            println!(
                "board_limit = {}",
                monday
                    .board_limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "(default)".to_string())
            );
            println!(
                "{} = {}",
                MONDAY_TOKEN_ENV,
                status(credentials.monday_token.is_some())
            );
            println!();
            println!("[weather]");
            println!("api_url = {}", weather.api_url);
            println!("units = {}", weather.units);
            println!(
                "{} = {}",
                WEATHER_KEY_ENV,
                status(credentials.weather_key.is_some())
            );
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load()?;
            config
                .set(&key, &value)
                .with_context(|| format!("Failed to set {}", key))?;
            config.save()?;
            tracing::info!("Set {} = {}", key, value);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load()?;
            match config.get(&key)? {
                Some(value) => println!("{}", value),
                None => println!("(not set)"),
            }
        }
        ConfigCommands::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}
