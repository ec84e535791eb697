//! CLI for the Fantasy Cricket League API

pub mod serve;

use clap::{Parser, Subcommand};

/// Fantasy Cricket League API - roster building, scoring and league
/// administration
#[derive(Parser)]
#[command(name = "fantasy-cricket-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
