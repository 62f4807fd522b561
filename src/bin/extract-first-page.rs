//! First-page extractor
//!
//! Takes the first page of each input PDF and saves them all to a single PDF.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;

use pdf_pagetools::logging;
use pdf_pagetools::pdf::{collect_pdf_inputs, extract_first_pages};

/// Extract the first page from each PDF and combine them into a single PDF
#[derive(Parser)]
#[command(name = "extract-first-page")]
#[command(author, version, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Combine the first pages of three files
    extract-first-page -o covers.pdf one.pdf two.pdf three.pdf

    # Combine the first page of every PDF in a folder
    extract-first-page -o covers.pdf handouts/")]
struct Cli {
    /// Output PDF file path
    #[arg(short, long)]
    output: PathBuf,

    /// Input PDF files or directories containing PDFs
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

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
    let pdf_files = collect_pdf_inputs(&cli.inputs);
    if pdf_files.is_empty() {
        bail!("No valid PDF files to process.");
    }

    let report = extract_first_pages(&pdf_files, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    if report.extracted == 0 {
        bail!("No pages were processed successfully.");
    }

    println!("\nAll first pages saved to {}", cli.output.display());
    println!(
        "Processed {} out of {} PDF files successfully.",
        report.extracted, report.attempted
    );

    Ok(())
}
