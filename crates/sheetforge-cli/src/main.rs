//! sheetforge CLI - generate demonstration workbooks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetforge::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetforge")]
#[command(author, version, about = "Generate demonstration xlsx workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// A bare workbook with one named, empty sheet
    Blank {
        /// Output path (default: blank-<timestamp>.xlsx in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// A student roster: shared-string header row plus two data rows
    Roster {
        /// Output path (default: roster-<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// An attendance sheet with styled headers and rich-text cells
    Attendance {
        /// Output path (default: attendance-<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// A sheet demonstrating merged cell ranges
    Merged {
        /// Output path (default: merged-<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Blank { output } => run(build_blank()?, output, "blank"),
        Commands::Roster { output } => run(build_roster()?, output, "roster"),
        Commands::Attendance { output } => run(build_attendance()?, output, "attendance"),
        Commands::Merged { output } => run(build_merged()?, output, "merged"),
    }
}

fn run(workbook: Workbook, output: Option<PathBuf>, name: &str) -> Result<()> {
    let path = output.unwrap_or_else(|| default_output_path(name));

    workbook
        .save(&path)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    println!("Save Path: {}", path.display());
    Ok(())
}

/// Timestamped filename in the current directory, e.g. roster-20260805143000.xlsx
fn default_output_path(name: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    PathBuf::from(format!("{}-{}.xlsx", name, stamp))
}

fn build_blank() -> Result<Workbook, Error> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet("myFirstSheet")?;
    Ok(workbook)
}

fn build_roster() -> Result<Workbook, Error> {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet("Roster")?;
    let mut sheet = workbook.sheet_mut(idx).unwrap();

    sheet.set_default_column_width(15.0)?;
    sheet.set_default_row_height(15.0)?;
    sheet.set_column_width(0, 0, 5.0)?;
    sheet.set_column_width(1, 2, 30.0)?;

    // Header row goes through the shared-string table
    let headers = ["No.", "Name", "Age", "Class", "Tutor"];
    for (col, header) in headers.iter().enumerate() {
        sheet.set_shared_text(0, col as u16, *header, None)?;
    }

    let rows = [
        ["1", "Alice Wang", "18", "Class A", "Ms. Lin"],
        ["2", "Ben Li", "19", "Class B", "Ms. Lin"],
    ];
    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            sheet.set_raw(row as u32 + 1, col as u16, *value, None)?;
        }
    }

    Ok(workbook)
}

fn build_attendance() -> Result<Workbook, Error> {
    let mut workbook = Workbook::new();

    let (header_style, body_style) = {
        let styles = workbook.styles_mut();
        let bold = styles.register_font(Font::new().bold(true).color(Color::BLACK))?;
        let border = styles.register_border(Border::outline(BorderEdge::thin()))?;
        let header = styles.register_style(
            bold,
            0,
            border,
            Some(Alignment::new().horizontal(HorizontalAlignment::Center)),
        )?;
        let body = styles.register_style(
            0,
            0,
            border,
            Some(Alignment::new().horizontal(HorizontalAlignment::Center)),
        )?;
        (header, body)
    };

    let idx = workbook.add_worksheet("AttendanceSheet")?;
    let mut sheet = workbook.sheet_mut(idx).unwrap();

    sheet.set_default_column_width(15.0)?;
    sheet.set_default_row_height(13.5)?;
    sheet.set_column_width(0, 0, 5.0)?;
    sheet.set_column_width(1, 2, 10.0)?;

    for (col, header) in ["No.", "Name", "Dept.", "Present", "Absent"]
        .iter()
        .enumerate()
    {
        sheet.set_shared_text(0, col as u16, *header, Some(header_style))?;
    }

    // The last header cell mixes run formats inside one shared entry
    let rate_header = RichText::new()
        .run("Rate (")
        .styled_run(
            "unit: %",
            RunStyle::new().bold(true).size(11.0).color(Color::DODGER_BLUE),
        )
        .run(")");
    sheet.set_shared_rich_text(0, 5, rate_header, Some(header_style))?;

    let rows = [
        ("1", "Zhang", "Engineering", "19", "1", "95", Color::ORANGE),
        ("2", "Li", "Engineering", "18", "2", "90", Color::ORANGE),
        ("3", "Wang", "Engineering", "20", "0", "100", Color::GREEN),
        ("4", "Liu", "HR", "20", "0", "100", Color::GREEN),
    ];
    for (i, (no, name, dept, present, absent, rate, rate_color)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.set_raw(row, 0, *no, Some(body_style))?;
        sheet.set_raw(row, 1, *name, Some(body_style))?;
        sheet.set_raw(row, 2, *dept, Some(body_style))?;
        sheet.set_raw(row, 3, *present, Some(body_style))?;
        sheet.set_raw(row, 4, *absent, Some(body_style))?;

        let rate_text = RichText::new()
            .styled_run(*rate, RunStyle::new().size(11.0).color(*rate_color))
            .styled_run("%", RunStyle::new().size(11.0));
        sheet.set_rich_text(row, 5, rate_text, Some(body_style))?;
    }

    Ok(workbook)
}

fn build_merged() -> Result<Workbook, Error> {
    let mut workbook = Workbook::new();

    let centered = {
        let styles = workbook.styles_mut();
        styles.register_style(0, 0, 0, Some(Alignment::center()))?
    };

    let idx = workbook.add_worksheet("MergeSheet")?;
    let mut sheet = workbook.sheet_mut(idx).unwrap();

    // Group label spanning three rows; only the anchor cell carries data
    sheet.set_shared_text(0, 0, "Engineering", Some(centered))?;
    sheet.merge("A1:A3")?;

    sheet.set_raw(0, 1, "Zhang", None)?;
    sheet.set_raw(1, 1, "Li", None)?;
    sheet.set_raw(2, 1, "Wang", None)?;

    // Banner across the table head
    sheet.set_shared_text(4, 0, "Q3 Attendance", Some(centered))?;
    sheet.merge("A5:B5")?;

    Ok(workbook)
}
