use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seasonfix")]
#[command(author, version, about = "Rename episodes under season folders to `<Series> SxxEyy`")]
pub struct Cli {
    /// Root directory containing series folders
    #[arg(required = true)]
    pub root: PathBuf,

    /// Show what would be done without renaming files
    #[arg(short, long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}
