use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokémon catalog from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output flags
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog entries, one page at a time
    #[command(visible_alias = "ls")]
    List {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Also compute each entry's dominant artwork color
        #[arg(long)]
        colors: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Search the whole catalog by name or number
    #[command(visible_alias = "s")]
    Search {
        /// Name fragment (case-insensitive) or catalog number
        query: String,

        /// Also compute each match's dominant artwork color
        #[arg(long)]
        colors: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show the detail record for one Pokémon
    Show {
        /// Name or catalog number
        name: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Compute the dominant color of a Pokémon's artwork
    Color {
        /// Name or catalog number
        #[arg(required_unless_present = "file")]
        name: Option<String>,

        /// Use a local image file instead of downloading artwork
        #[arg(long, conflicts_with = "name")]
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Display current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Print one configuration value
    Get {
        /// api_base_url, artwork_base_url, page_size, search_index_limit, request_timeout
        key: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Set a configuration value
    Set {
        /// api_base_url, artwork_base_url, page_size, search_index_limit, request_timeout
        key: String,

        /// New value
        value: String,

        #[command(flatten)]
        output: OutputOptions,
    },
}
