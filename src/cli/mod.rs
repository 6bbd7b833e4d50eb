//! CLI module for Poemshelf
//!
//! Provides command-line access to the poem collection. Running without a
//! subcommand opens the viewer instead.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::print_error;
use output::OutputFormat;

/// Poemshelf - browse a published poem collection
#[derive(Parser, Debug)]
#[command(name = "poemshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Site base URL, overriding the configured one
    #[arg(long, global = true, env = "POEMSHELF_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "poemshelf=debug,info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List poems in display order
    List {
        /// Only show poems with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show the most common tags
    Tags,

    /// Show the full loader state
    Status,

    /// Verify the manifest can be loaded
    Check,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run the CLI with parsed arguments
pub async fn run(command: Commands, output: &OutputOptions, base_url: Option<String>) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::List { tag } => commands::poems::list(base_url, tag, format).await,
        Commands::Tags => commands::poems::tags(base_url, format).await,
        Commands::Status => commands::poems::status(base_url, format).await,
        Commands::Check => commands::poems::check(base_url, format).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_viewer() {
        let cli = Cli::try_parse_from(["poemshelf"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "poemshelf",
            "list",
            "--tag",
            "sea",
            "--json",
            "--base-url",
            "https://example.org/",
        ])
        .unwrap();

        assert!(cli.output.json);
        assert_eq!(cli.base_url.as_deref(), Some("https://example.org/"));
        match cli.command {
            Some(Commands::List { tag }) => assert_eq!(tag.as_deref(), Some("sea")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_log_filter() {
        let cli = Cli::try_parse_from(["poemshelf", "tags", "-v"]).unwrap();
        assert_eq!(cli.output.default_log_filter(), "poemshelf=debug,info");

        let cli = Cli::try_parse_from(["poemshelf", "tags", "-q"]).unwrap();
        assert_eq!(cli.output.default_log_filter(), "error");
    }
}
