//! Test-fixture generator
//!
//! Writes a small fixed set of multi-page PDFs for trying out the other tools.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use pdf_pagetools::logging;
use pdf_pagetools::pdf::{create_test_pdfs, DEFAULT_FIXTURE_DIR};

/// Create multi-page test PDFs
#[derive(Parser)]
#[command(name = "create-test-pdfs")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Directory to write the test PDFs to
    #[arg(long, default_value = DEFAULT_FIXTURE_DIR)]
    dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let created = create_test_pdfs(&cli.dir)
        .with_context(|| format!("Failed to create test PDFs in {}", cli.dir.display()))?;

    println!(
        "Created {} test PDFs in {} directory",
        created.len(),
        cli.dir.display()
    );

    Ok(())
}
