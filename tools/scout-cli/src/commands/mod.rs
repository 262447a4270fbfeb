//! CLI command implementations.

pub mod admin;
pub mod config;
pub mod product;
pub mod search;
pub mod shell;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Show at most N products.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,

    /// Also fetch merchant offers.
    #[arg(short, long)]
    pub offers: bool,
}

/// Arguments for the offers command.
#[derive(Args)]
pub struct OffersArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the shell command.
#[derive(Args)]
pub struct ShellArgs {
    /// Run this search before prompting.
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Control the catalog parser.
    Parser {
        #[command(subcommand)]
        command: ParserCommand,
    },
    /// Show or replace upstream API keys.
    Keys {
        #[command(subcommand)]
        command: KeysCommand,
    },
    /// Print a backend service's logs.
    Logs {
        /// Service name (backend, parser, ...).
        service: String,
    },
    /// Manage stored products.
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
    /// Show search statistics.
    Stats,
}

#[derive(Subcommand)]
pub enum ParserCommand {
    /// Show parser status.
    Status,
    /// Start parsing a catalog page.
    Start {
        /// Catalog page URL.
        url: String,
        /// Category to file products under.
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Stop the running parser.
    Stop,
}

#[derive(Subcommand)]
pub enum KeysCommand {
    /// Show masked keys.
    Show,
    /// Replace keys.
    Set {
        /// Comma-separated Gemini keys.
        #[arg(long, default_value = "")]
        gemini: String,
        /// Comma-separated SerpApi keys.
        #[arg(long, default_value = "")]
        serpapi: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all stored products.
    List,
    /// Add a product from a JSON file ("-" for stdin).
    Add {
        file: String,
    },
    /// Update a product from a JSON file ("-" for stdin).
    Update {
        file: String,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default config file in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
