//! Page-number stamper
//!
//! Adds page numbers to a PDF file or to every PDF in a directory.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::Parser;
use log::warn;

use pdf_pagetools::fonts::StandardFont;
use pdf_pagetools::layout::Position;
use pdf_pagetools::logging;
use pdf_pagetools::open::open_file;
use pdf_pagetools::pdf::{stamp_path, StampOptions};

/// Add page numbers to PDF files
#[derive(Parser)]
#[command(name = "add-pagenumber")]
#[command(author, version, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Number a single file at the bottom centre
    add-pagenumber -i input.pdf -o output.pdf

    # Number every PDF in a directory, bottom-right, in 10pt Times
    add-pagenumber -i handouts/ -o numbered/ -p bottomright -f tiro -s 10

    # Number a file and open the result
    add-pagenumber -i input.pdf -o output.pdf --open")]
struct Cli {
    /// Input PDF file or directory
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF file or directory
    #[arg(short, long)]
    output: PathBuf,

    /// Position of the page numbers: bottom, top, bottomright, bottomleft, topright, topleft
    #[arg(short, long, default_value = "bottom")]
    position: Position,

    /// Font to use for page numbers (helv, tiro, cour, hebo, ... or a standard PDF font name)
    #[arg(short, long, default_value = "helv", value_parser = parse_font)]
    font: StandardFont,

    /// Font size in points
    #[arg(short, long, default_value_t = 12.0, value_parser = parse_font_size)]
    size: f32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Open the output PDF file(s) when done
    #[arg(long)]
    open: bool,
}

fn parse_font(name: &str) -> std::result::Result<StandardFont, String> {
    StandardFont::from_name(name).map_err(|e| e.to_string())
}

fn parse_font_size(value: &str) -> std::result::Result<f32, String> {
    let size: f32 = value
        .parse()
        .map_err(|_| format!("invalid font size '{}'", value))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("font size must be positive, got {}", value))
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    println!("Adding page numbers to {}...", cli.input.display());

    let options = StampOptions {
        position: cli.position,
        font: cli.font,
        font_size: cli.size,
    };

    let report = stamp_path(&cli.input, &cli.output, &options);

    if cli.open {
        for output in &report.outputs {
            if let Err(e) = open_file(output) {
                warn!("Could not open {}: {}", output.display(), e);
            }
        }
    }

    if report.succeeded() == 0 {
        println!("\nFailed to process any PDF files.");
        bail!("Make sure the input is a readable PDF file or a directory containing PDF files.");
    }

    println!(
        "\nSuccessfully added page numbers to {} PDF file(s).",
        report.succeeded()
    );
    if report.failed > 0 {
        println!("{} PDF file(s) could not be processed.", report.failed);
    }

    Ok(())
}
