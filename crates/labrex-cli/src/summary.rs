use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{BatchResult, FileStatus};

pub fn print_summary(result: &BatchResult) {
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Type"),
        header_cell("Status"),
        header_cell("Output"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for outcome in &result.outcomes {
        let type_cell = match outcome.schema {
            Some(label) => Cell::new(label).fg(Color::Blue),
            None => dim_cell("-"),
        };
        let (status_cell, output_cell) = match &outcome.status {
            FileStatus::Succeeded { json_path, .. } => (
                Cell::new("OK").fg(Color::Green).add_attribute(Attribute::Bold),
                Cell::new(json_path.display()),
            ),
            FileStatus::Failed { message } => (
                Cell::new("FAILED")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                Cell::new(message).fg(Color::Red),
            ),
        };
        table.add_row(vec![
            Cell::new(&outcome.file_name),
            type_cell,
            status_cell,
            output_cell,
        ]);
    }
    println!("{table}");
    println!(
        "{} succeeded, {} failed",
        result.succeeded(),
        result.failed()
    );
    if result.failed() > 0 {
        println!("Re-run with -v for per-file failure detail.");
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
