//! CLI module for the user registry
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server
//! - `check-config`: print the resolved configuration and exit

pub mod check_config;
pub mod serve;

use clap::{Parser, Subcommand};

/// User Registry - in-memory user records with validation
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print the resolved configuration as JSON
    CheckConfig,
}
