//! CLI tool for gridctrl - loads CSV/TSV into a grid, optionally sorts it,
//! and prints the result as TSV
//!
//! Usage:
//!   gridctrl_cli <input.csv>                       # Echo as TSV
//!   gridctrl_cli <input.csv> --header              # First row is a fixed header
//!   gridctrl_cli <input.csv> --sort 2 [--desc]     # Sort rows on column 2 (text)
//!   gridctrl_cli <input.csv> --sort 2 --numeric    # Sort numerically
//!   gridctrl_cli <input.csv> -o out.tsv            # Write to a file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridctrl::text::{copy_selection, load_delimited};
use gridctrl::{Delimiter, Grid, GridConfig};

const USAGE: &str =
    "Usage: gridctrl_cli <input.csv|input.tsv> [--header] [--sort COL [--desc] [--numeric]] [-o output.tsv]";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut header = false;
    let mut sort_col: Option<u32> = None;
    let mut descending = false;
    let mut numeric = false;
    let mut output_path: Option<&String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--header" => header = true,
            "--desc" => descending = true,
            "--numeric" => numeric = true,
            "--sort" if i + 1 < args.len() => {
                i += 1;
                sort_col = match args[i].parse() {
                    Ok(col) => Some(col),
                    Err(_) => {
                        eprintln!("Invalid column: {}", args[i]);
                        std::process::exit(1);
                    }
                };
            }
            "-o" if i + 1 < args.len() => {
                i += 1;
                output_path = Some(&args[i]);
            }
            other => {
                eprintln!("Unknown argument: {other}\n{USAGE}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read input file
    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let text = String::from_utf8_lossy(&data);
    let delimiter = if input_path.ends_with(".tsv") {
        Delimiter::Tab
    } else {
        Delimiter::detect(&text)
    };

    // Load into a grid
    let mut grid = Grid::new(GridConfig::default());
    let (rows, cols) = match load_delimited(&mut grid, &text, delimiter) {
        Ok(size) => size,
        Err(e) => {
            eprintln!("Error loading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    if header && rows > 0 {
        grid.set_fixed_row_count(1).unwrap();
    }

    // Sort
    if let Some(col) = sort_col {
        let sorted = if numeric {
            grid.sort_numeric_items(col, !descending)
        } else {
            grid.sort_text_items(col, !descending)
        };
        if !sorted {
            eprintln!("Column {col} out of range (grid has {cols} columns)");
            std::process::exit(1);
        }
    }

    // Select everything (fixed rows included) and copy it out
    grid.set_fixed_row_count(0).unwrap();
    grid.select_all();
    let tsv = copy_selection(&grid);

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &tsv) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {} ({} rows x {} columns)", path, rows, cols);
        }
        None => {
            io::stdout().write_all(tsv.as_bytes()).unwrap();
            println!();
        }
    }
}
