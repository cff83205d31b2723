//! CLI module - Command-line interface for docket-watch

mod commands;

use clap::{Parser, Subcommand};

/// docket-watch - Court case movement monitor
/// Polls DataJud for tracked cases and emails new movements
#[derive(Parser)]
#[command(name = "docket-watch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scheduler and HTTP API until interrupted
    #[command(alias = "-d", alias = "--daemon")]
    Daemon,

    /// Synchronize every tracked case once and send digests
    #[command(alias = "check")]
    Sync,

    /// Start tracking a case
    #[command(alias = "a")]
    Add {
        /// Case number as indexed by DataJud
        case_number: String,
        /// Tribunal index alias, e.g. api_publica_tjsp
        tribunal_alias: String,
        /// Where alerts and digests are sent
        recipient_email: String,
    },

    /// List tracked cases
    #[command(alias = "ls", alias = "l")]
    List,

    /// Show recorded movements of a case
    #[command(alias = "h")]
    History {
        /// Case ID
        case_id: i32,
        /// Number of entries to show
        #[arg(default_value = "20")]
        limit: u64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
