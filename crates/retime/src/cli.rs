use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retime")]
#[command(author, version, about = "Fix capture timestamps of multi-chunk GoPro recordings", long_about = None)]
pub struct Cli {
    /// Config file (default: ./retime.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute capture times and update every chunk through the media API
    Fix {
        #[command(flatten)]
        input: InputArgs,

        /// Bearer token (overrides RETIME_ACCESS_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Saved media library page to read the bearer token from
        #[arg(long)]
        token_page: Option<PathBuf>,

        /// Only show what would be updated without sending anything
        #[arg(long)]
        dry_run: bool,

        /// Lower bound of the pause between updates, in milliseconds
        #[arg(long)]
        min_delay_ms: Option<u64>,

        /// Upper bound (exclusive) of the pause between updates, in milliseconds
        #[arg(long)]
        max_delay_ms: Option<u64>,
    },

    /// Print the computed capture times only
    Plan {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check whether a saved media library page carries an access token
    InspectToken {
        /// Saved media library page
        #[arg(long)]
        page: PathBuf,
    },
}

/// Where the selected chunks and the start time come from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON manifest of selected chunks
    #[arg(long, conflicts_with = "page", required_unless_present = "page")]
    pub manifest: Option<PathBuf>,

    /// Saved media library page with the chunks selected
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Correct capture time of the first chunk (RFC 3339 or "YYYY-MM-DD HH:MM[:SS]")
    #[arg(long)]
    pub start: Option<String>,

    /// Offset for start times given without one, e.g. "+02:00"
    #[arg(long)]
    pub utc_offset: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_manifest_and_page_conflict() {
        let result = Cli::try_parse_from(["retime", "plan", "--manifest", "a.json", "--page", "b.html"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["retime", "plan"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fix_arguments() {
        let cli = Cli::try_parse_from([
            "retime",
            "fix",
            "--manifest",
            "chunks.json",
            "--start",
            "2024-01-01T00:00:00Z",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Fix { input, dry_run, token, .. } => {
                assert_eq!(input.manifest, Some(PathBuf::from("chunks.json")));
                assert_eq!(input.start.as_deref(), Some("2024-01-01T00:00:00Z"));
                assert!(dry_run);
                assert!(token.is_none());
            }
            _ => panic!("expected fix"),
        }
    }
}
