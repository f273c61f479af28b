//! Command-line definitions for the `wikicorpus` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Build a plain-text corpus from a MediaWiki site.
///
/// ```sh
/// # Discover article URLs, then download them into batch files
/// wikicorpus crawl
/// wikicorpus harvest --batch-size 100
///
/// # Both steps in one go, logging to a file as well
/// wikicorpus --log-file corpus.log run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a RON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk the all-pages index and write the discovered article URLs
    Crawl(CrawlArgs),
    /// Download every URL in the URL file into batch files
    Harvest(HarvestArgs),
    /// Crawl, then harvest what the crawl found
    Run(RunArgs),
    /// Load the batch directory and report what it holds
    Stats(StatsArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct CrawlArgs {
    /// First index page to fetch
    #[arg(long)]
    pub start_url: Option<String>,

    /// Where the discovered URLs are written
    #[arg(long)]
    pub urls_file: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct HarvestArgs {
    /// URL list to harvest
    #[arg(long)]
    pub urls_file: Option<PathBuf>,

    /// Directory for batch files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Records per batch file
    #[arg(short, long)]
    pub batch_size: Option<usize>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// First index page to fetch
    #[arg(long)]
    pub start_url: Option<String>,

    /// Where the discovered URLs are written and read back from
    #[arg(long)]
    pub urls_file: Option<PathBuf>,

    /// Directory for batch files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Records per batch file
    #[arg(short, long)]
    pub batch_size: Option<usize>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct StatsArgs {
    /// Directory holding the batch files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
