use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use interact_cli::types::{CombinationSummary, InteractionSummary, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }
    if let Some(combinations) = &result.combinations {
        print_combinations(combinations);
    }
    if let Some(interactions) = &result.interactions {
        print_interactions(interactions);
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_combinations(summary: &CombinationSummary) {
    println!(
        "Patients: {}  Events: {}  Skipped rows: {}",
        summary.patients, summary.events, summary.skipped_rows
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Window"),
        header_cell("Pairs"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for window in &summary.windows {
        table.add_row(vec![
            Cell::new(window.bucket.label()),
            count_cell(window.pairs, Color::Green),
            path_cell(window.output.as_deref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Timeline tree"),
        dim_cell("-"),
        path_cell(summary.timeline.as_deref()),
    ]);
    println!("{table}");
}

fn print_interactions(summary: &InteractionSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Profile"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Profile medications"),
        Cell::new(summary.profile_size),
    ]);
    table.add_row(vec![
        Cell::new("Knowledge-base entries"),
        Cell::new(summary.knowledge_base_entries),
    ]);
    table.add_row(vec![
        Cell::new("Interactions"),
        count_cell(summary.interactions, Color::Yellow),
    ]);
    let not_found = if summary.not_found.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(summary.not_found.join(", ")).fg(Color::Red)
    };
    table.add_row(vec![Cell::new("Not found"), not_found]);
    table.add_row(vec![
        Cell::new("Output"),
        path_cell(summary.output.as_deref()),
    ]);
    println!("{table}");
}

fn path_cell(path: Option<&Path>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
