//! View command implementation.

use crate::cli::ViewArgs;
use crate::error::Result;
use crate::output::Formatter;
use kronos_graph::GraphExport;
use std::fs;

/// Execute the view command.
pub fn execute_view(args: ViewArgs, formatter: &Formatter) -> Result<()> {
    let export = GraphExport::from_json(&fs::read_to_string(&args.file)?)?;
    let view = export.reload();

    println!(
        "{}",
        formatter.info(&format!("Analysis {} for {}", export.analysis_id, export.target))
    );
    println!("{}", formatter.format_view(&view, export.filters.show_directions())?);
    println!("{}", formatter.format_stats(&view.stats));
    for line in formatter.format_warnings(&export.warnings) {
        eprintln!("{}", line);
    }

    Ok(())
}
