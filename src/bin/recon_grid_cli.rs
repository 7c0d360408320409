//! CLI tool for recon-grid - ingests a dataset and outputs the grid options
//!
//! Usage:
//!   recon_grid_cli <data.json>                       # Output JSON to stdout
//!   recon_grid_cli <data.json> --agg "Amount;Difference"
//!   recon_grid_cli <data.json> -o options.json       # Output JSON to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use recon_grid::config::DEFAULT_HEIGHT;
use recon_grid::present::{EditMode, GridOptions};
use recon_grid::{ingest, ColumnHints, ReconcileOptions};

fn main() {
    recon_grid::logging::init(log::LevelFilter::Warn);

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: recon_grid_cli <data.json> [--agg A;B] [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut agg: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--agg" => agg = rest.next().map(String::as_str),
            "-o" => output_path = rest.next().map(String::as_str),
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Ingest (malformed data degrades to an empty schema, logged to stderr)
    let dataset = ingest(Some(&data), &ColumnHints::from_lists(agg, None, None));
    eprintln!(
        "{} rows, {} columns",
        dataset.records.len(),
        dataset.columns.len()
    );
    let identity_field = ReconcileOptions::default().identity_field;
    let options = GridOptions::build(&dataset, EditMode::LOCKED, &identity_field, DEFAULT_HEIGHT);

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&options) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
