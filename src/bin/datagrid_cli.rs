//! CLI tool for datagrid - answers page requests against a JSON table
//!
//! Usage:
//!   datagrid_cli <table.json>                       # First page as JSON
//!   datagrid_cli <table.json> --rows 20 --start 40  # Any page
//!   datagrid_cli <table.json> --sort price --desc   # Sorted page
//!   datagrid_cli <table.json> --columns             # Include the column model
//!   datagrid_cli <table.json> --render 640x200      # Draw the grid as text
//!   datagrid_cli <table.json> -o page.json          # Write to a file
//!
//! The table file holds `{"columnModel": [...], "rows": [...]}`.

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};

use datagrid::config::DataSourceSpec;
use datagrid::layout::Rect;
use datagrid::render::TextRenderer;
use datagrid::{Datagrid, GridOptions, MemoryTable, PageRequest, SortDirection};

const USAGE: &str = "Usage: datagrid_cli <table.json> [--rows N] [--start N] [--sort FIELD] \
                     [--desc] [--columns] [--render WxH] [-o output.json]";

#[derive(Debug, Default)]
struct Args {
    input: String,
    request: PageRequest,
    sort: Option<String>,
    descending: bool,
    render: Option<(f32, f32)>,
    output: Option<String>,
}

fn parse_size(value: &str) -> Option<(f32, f32)> {
    let (w, h) = value.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut iter = args.iter().skip(1);
    let mut parsed = Args {
        input: iter.next().ok_or_else(|| USAGE.to_string())?.clone(),
        ..Args::default()
    };
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };
        match flag.as_str() {
            "--rows" => {
                parsed.request.page_size = value()?.parse().map_err(|e| format!("--rows: {e}"))?;
            }
            "--start" => {
                parsed.request.row_offset =
                    value()?.parse().map_err(|e| format!("--start: {e}"))?;
            }
            "--sort" => parsed.sort = Some(value()?),
            "--desc" => parsed.descending = true,
            "--columns" => parsed.request.include_column_model = true,
            "--render" => {
                let size = value()?;
                parsed.render =
                    Some(parse_size(&size).ok_or_else(|| format!("bad size: {size}"))?);
            }
            "-o" => parsed.output = Some(value()?),
            other => return Err(format!("unknown argument: {other}\n{USAGE}")),
        }
    }
    if let Some(field) = &parsed.sort {
        let direction = if parsed.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        parsed.request = parsed.request.clone().with_sort(field.clone(), direction);
    }
    Ok(parsed)
}

/// Lay the page out in a grid of the given size and draw it as text.
fn render(table: &MemoryTable, args: &Args, (width, height): (f32, f32)) -> Result<String, String> {
    let page = table.page(&args.request).map_err(|e| e.to_string())?;
    let options = GridOptions {
        column_model: Some(table.column_model.clone()),
        data_source: Some(DataSourceSpec::Rows(page.result_set)),
        sortable: true,
        freezable: true,
        ..GridOptions::default()
    };
    let mut grid =
        Datagrid::new(options, Rect::new(0.0, 0.0, width, height)).map_err(|e| e.to_string())?;
    let out = grid.start();
    let mut text = TextRenderer::new();
    grid.present(&mut text, &out).map_err(|e| e.to_string())?;
    Ok(text.output())
}

fn run(args: &Args) -> Result<String, String> {
    let raw = fs::read_to_string(&args.input)
        .map_err(|e| format!("Error reading {}: {e}", args.input))?;
    let table = MemoryTable::from_json(&raw).map_err(|e| format!("Error parsing table: {e}"))?;
    if let Some(size) = args.render {
        return render(&table, args, size);
    }
    let page = table.page(&args.request).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&page).map_err(|e| format!("Error serializing JSON: {e}"))
}

fn main() {
    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let text = match run(&args) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Error writing {path}: {e}");
                std::process::exit(1);
            }
            eprintln!("Written: {path}");
        }
        None => {
            let mut stdout = io::stdout();
            if stdout.write_all(text.as_bytes()).is_err() || writeln!(stdout).is_err() {
                std::process::exit(1);
            }
        }
    }
}
