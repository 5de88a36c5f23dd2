use qry_core::CatalogEntry;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `qry catalog`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = qry_core::catalog::entries();
    match flags.format {
        OutputFormat::Text => {
            output::print_text(&render_text(&entries));
            Ok(())
        }
        format => output::output(&entries, format),
    }
}

/// One aligned line per entry: code, fatal marker, template.
fn render_text(entries: &[CatalogEntry]) -> String {
    let width = entries.iter().map(|e| e.code.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.fatal { "fatal" } else { "" };
            format!("{:<width$}  {marker:<5}  {}", entry.code, entry.template)
                .trim_end()
                .to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
