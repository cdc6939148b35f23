use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repostats")]
#[command(about = "Contributor and daily activity statistics for git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, global = true, help = "Log debug details to stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, conflicts_with = "repo", help = "Read commit records from a JSON file instead of a repository")]
    pub input: Option<PathBuf>,

    #[arg(long, conflicts_with = "input", help = "Directory for the commit cache database")]
    pub cache: Option<PathBuf>,

    #[arg(long, conflicts_with = "input", help = "Do not read or write the commit cache")]
    pub no_cache: bool,

    #[arg(long, conflicts_with = "input", help = "Include merge commits")]
    pub include_merges: bool,

    #[arg(long, conflicts_with = "input", help = "Only walk history reachable from HEAD instead of every reference")]
    pub head_only: bool,

    #[arg(long, help = "Only count commits on or after this date (YYYY-MM-DD, RFC3339, or e.g. '30days')")]
    pub since: Option<String>,

    #[arg(long, help = "Only count commits up to this date (YYYY-MM-DD, RFC3339, or e.g. '1week')")]
    pub until: Option<String>,

    #[arg(long, help = "Only count commits by this exact author name")]
    pub author: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Contributors,
    Activity,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Totals, top contributors and activity overview
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Per-contributor commit and line totals
    Contributors {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Output as CSV")]
        csv: bool,
    },
    /// Commits per day, including days without commits
    Activity {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Output as CSV")]
        csv: bool,
    },
    /// Every author name in the history, ignoring filters
    Authors {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Write a table as CSV
    Export {
        #[arg(long, value_enum, help = "Table to export")]
        table: ExportTable,

        #[arg(long, short, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Summary { json, ndjson } => crate::summary::exec(self.common, json, ndjson),
            Commands::Contributors { json, ndjson, csv } => {
                crate::contributors::exec(self.common, json, ndjson, csv)
            }
            Commands::Activity { json, ndjson, csv } => {
                crate::activity::exec(self.common, json, ndjson, csv)
            }
            Commands::Authors { json } => crate::contributors::exec_authors(self.common, json),
            Commands::Export { table, output } => crate::export::exec(self.common, table, output),
        }
    }
}
