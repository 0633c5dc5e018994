//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

use crate::config::RenderStyle;

/// Composite trees and handler chains: render the sample tree, push requests down the sample chain
#[derive(Parser, Debug)]
#[command(name = "treechain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the sample tree and push the sample requests (default)
    Demo,

    /// Render only the sample tree
    Tree {
        /// Override the configured render style
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Push requests through the sample chain
    Request {
        /// Request values, tried in order
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a config template
    Template,
}
