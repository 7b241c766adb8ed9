mod config;
mod reporter;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::{LevelFilter, debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

use crate::config::{Config, Format};

fn main() -> Result<()> {
    let cfg = Config::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Warn).parse_default_env();
    if cfg.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();
    debug!("Parsed CLI arguments: {:?}", cfg);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!(
        "Analyzing {} with depth {} (using {} threads)",
        cfg.path.display(),
        cfg.depth,
        num_threads
    );

    let result = deepcontext_core::analyze(&cfg.path, cfg.depth, cfg.debug)?;

    match cfg.format {
        Format::Text => reporter::print_content_dump(&mut stdout, &result, cfg.imports)?,
        Format::Json => reporter::print_json(&mut stdout, &result)?,
    }
    stdout.flush()?;

    if cfg.debug {
        eprintln!(
            "\n{} Finished in {}ms on {} files (using {} threads).",
            "●".bright_blue(),
            start.elapsed().as_millis().to_string().cyan(),
            result.content.len().to_string().cyan(),
            num_threads.to_string().cyan()
        );
    }

    Ok(())
}
