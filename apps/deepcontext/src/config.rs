use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `# <path>` header followed by the file content, per file
    Text,
    /// The full analysis result as JSON
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "deepcontext")]
#[command(about = "Collect a JS/TS file and the local files it imports", long_about = None)]
pub struct Config {
    /// File or directory to analyze
    pub path: PathBuf,

    /// Number of import hops to follow from the starting files
    #[arg(default_value_t = 0)]
    pub depth: usize,

    /// Log every resolution decision
    #[arg(long)]
    pub debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// List each file's resolved imports under its header (text format only)
    #[arg(long)]
    pub imports: bool,
}
