use qry_core::{CatalogEntry, ErrorReport};
use schemars::schema_for;

use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `qry schema`. Text output is pretty JSON.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Report => schema_for!(ErrorReport),
        SchemaTarget::Catalog => schema_for!(Vec<CatalogEntry>),
    };
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Text | OutputFormat::Json => OutputFormat::Json,
    };
    output::output(&schema, format)
}
