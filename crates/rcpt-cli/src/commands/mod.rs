//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

/// Output format shared by the processing commands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}
