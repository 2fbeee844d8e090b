//! Command-line / environment configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "colleges.db";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Where the college database lives
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// SQLite database file (created if missing)
    #[arg(long, env = "COLLEGE_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

/// API server settings
#[derive(Debug, Clone, Parser)]
#[command(name = "college-server", version, about = "College catalog REST API")]
pub struct ServerConfig {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Address to listen on
    #[arg(long, env = "COLLEGE_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,
}

/// Operator CLI
#[derive(Debug, Parser)]
#[command(name = "college-api", version, about = "Manage the college catalog")]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bulk-create colleges from a CSV with a `collegeName` column
    Import {
        csv: PathBuf,
    },
    /// Print stored colleges
    List {
        /// Only colleges starting with this character
        #[arg(long)]
        letter: Option<String>,
    },
    /// Print the code generated for a name
    Code {
        name: String,
    },
}
