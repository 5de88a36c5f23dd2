use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use qry_core::InputInfo;

/// Root subcommands for `qry`.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build an error from a catalog code and print it
    Render(RenderArgs),
    /// List every error code in the catalog
    Catalog,
    /// Print a JSON schema for tooling output
    Schema(SchemaArgs),
}

/// Arguments for `qry render`.
#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    /// Error code, with or without prefix (`err:XPST0003`, `XPST0003`)
    pub code: String,
    /// Message arguments, in placeholder order
    pub args: Vec<String>,
    #[arg(long, conflicts_with = "query")]
    pub line: Option<u32>,
    #[arg(long, requires = "line")]
    pub column: Option<u32>,
    #[arg(long, requires = "line")]
    pub file: Option<String>,
    /// Propagation entry, `FILE:LINE:COL` or `LINE:COL`; repeatable
    #[arg(long = "trace", value_name = "FILE:LINE:COL", value_parser = parse_trace_entry)]
    pub trace: Vec<InputInfo>,
    /// Query text to derive the position from
    #[arg(long)]
    pub query: Option<PathBuf>,
    /// Byte offset into `--query` where parsing stopped
    #[arg(long, requires = "query")]
    pub mark: Option<usize>,
    /// Value carried by the error, rendered as a string item
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long)]
    pub uncatchable: bool,
}

/// Arguments for `qry schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value = "report")]
    pub target: SchemaTarget,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    Report,
    Catalog,
}

/// Parse `FILE:LINE:COL` or `LINE:COL`. The file part may itself contain colons.
pub fn parse_trace_entry(raw: &str) -> Result<InputInfo, String> {
    let mut parts = raw.rsplitn(3, ':');
    let column = parts.next().unwrap_or_default();
    let line = parts
        .next()
        .ok_or_else(|| format!("expected FILE:LINE:COL or LINE:COL, got '{raw}'"))?;
    let file = parts.next();

    let line: u32 = line
        .parse()
        .map_err(|_| format!("invalid line '{line}' in '{raw}'"))?;
    let column: u32 = column
        .parse()
        .map_err(|_| format!("invalid column '{column}' in '{raw}'"))?;

    let info = InputInfo::new(line, column);
    Ok(match file {
        Some(file) if !file.is_empty() => info.with_file(file),
        _ => info,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use qry_core::InputInfo;

    use super::{Commands, SchemaTarget, parse_trace_entry};
    use crate::cli::Cli;

    #[test]
    fn trace_entry_with_file() {
        assert_eq!(
            parse_trace_entry("main.xq:4:2"),
            Ok(InputInfo::new(4, 2).with_file("main.xq"))
        );
    }

    #[test]
    fn trace_entry_file_may_contain_colons() {
        assert_eq!(
            parse_trace_entry("C:\\q\\a.xq:1:9"),
            Ok(InputInfo::new(1, 9).with_file("C:\\q\\a.xq"))
        );
    }

    #[test]
    fn trace_entry_without_file() {
        assert_eq!(parse_trace_entry("7:3"), Ok(InputInfo::new(7, 3)));
    }

    #[test]
    fn trace_entry_rejects_garbage() {
        assert!(parse_trace_entry("12").is_err());
        assert!(parse_trace_entry("a.xq:x:1").is_err());
        assert!(parse_trace_entry("a.xq:1:").is_err());
    }

    #[test]
    fn render_collects_positional_args_and_traces() {
        let cli = Cli::try_parse_from([
            "qry",
            "render",
            "XPST0017",
            "fn:foo",
            "--trace",
            "a.xq:1:1",
            "--trace",
            "2:5",
        ])
        .expect("cli should parse");

        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.code, "XPST0017");
        assert_eq!(args.args, vec!["fn:foo".to_string()]);
        assert_eq!(args.trace.len(), 2);
        assert_eq!(args.trace[1], InputInfo::new(2, 5));
    }

    #[test]
    fn mark_requires_query() {
        assert!(Cli::try_parse_from(["qry", "render", "XPST0003", "--mark", "3"]).is_err());
    }

    #[test]
    fn line_and_query_conflict() {
        let parsed = Cli::try_parse_from([
            "qry", "render", "XPST0003", "--line", "1", "--query", "q.xq",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn schema_defaults_to_report() {
        let cli = Cli::try_parse_from(["qry", "schema"]).expect("cli should parse");
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema");
        };
        assert_eq!(args.target, SchemaTarget::Report);
    }
}
