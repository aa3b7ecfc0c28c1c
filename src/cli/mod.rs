//! CLI module for the Employee Directory API

pub mod serve;

use clap::{Parser, Subcommand};

/// Employee Directory API - CRUD over an in-memory employee store
#[derive(Parser)]
#[command(name = "employee-directory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}
