use std::fs;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info;

use interact_cli::pipeline::{EventSource, RunOptions, run};
use interact_cli::types::RunResult;
use interact_engine::InteractionIndex;
use interact_ingest::{CsvOptions, read_knowledge_base};

use crate::cli::{LookupArgs, RunArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let options = RunOptions {
        events: EventSource::from_path(&args.events),
        profile: args.profile.clone(),
        knowledge_base: args.knowledge_base.clone(),
        output_dir: args.output_dir.clone(),
        csv: CsvOptions {
            delimiter: args.delimiter,
            ..CsvOptions::default()
        },
        write_tree: !args.no_tree,
        dry_run: args.dry_run,
    };
    let result = run(&options);
    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&result).context("serialize run summary")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "run summary written");
    }
    Ok(result)
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let entries = read_knowledge_base(&args.knowledge_base).with_context(|| {
        format!("load knowledge base from {}", args.knowledge_base.display())
    })?;
    let index = InteractionIndex::build(entries);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Query"),
        header_cell("Entry"),
        header_cell("Match"),
        header_cell("Interactions"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let mut unmatched = Vec::new();
    for name in &args.names {
        match index.lookup_match(name) {
            Some(found) => {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(&found.entry.primary_name),
                    Cell::new(found.kind),
                    Cell::new(found.entry.interactions.len()),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(name),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
                unmatched.push(name.as_str());
            }
        }
    }
    println!("{table}");
    if !unmatched.is_empty() {
        println!("Not found: {}", unmatched.join(", "));
    }
    Ok(())
}
