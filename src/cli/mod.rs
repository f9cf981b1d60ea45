//! CLI module - Command-line interface for imagesearcher
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// imagesearcher - search Unsplash photos from the terminal
#[derive(Parser)]
#[command(name = "imagesearcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search photos and remember the query
    #[command(alias = "s")]
    Search {
        /// Search query (may be empty)
        query: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Save each result's full-size image into this directory
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },

    /// Download one image, e.g. a result's full-size URL
    #[command(alias = "d")]
    Download {
        /// Image URL
        url: String,
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Show recent searches
    #[command(alias = "h")]
    History {
        /// Only show entries containing this text (case-insensitive)
        filter: Option<String>,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
