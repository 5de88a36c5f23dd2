use anyhow::Context;
use qry_config::QryConfig;
use qry_core::{ErrorArg, ErrorKind, ErrorReport, InputInfo, QueryError, StringParser, Value};

use crate::cli::root_commands::RenderArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `qry render`.
pub fn handle(args: &RenderArgs, config: &QryConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let error = build_error(args)?;
    tracing::debug!(code = %error.name(), catchable = error.is_catchable(), "rendering error");

    match flags.format {
        OutputFormat::Text => {
            output::print_text(&error.render_with(&config.messages));
            Ok(())
        }
        format => output::output(&ErrorReport::from_error(&error, &config.messages), format),
    }
}

/// Assemble a [`QueryError`] from command-line arguments.
pub fn build_error(args: &RenderArgs) -> anyhow::Result<QueryError> {
    let kind = ErrorKind::from_code(&args.code)?;
    let mut error = QueryError::limit(kind, args.args.iter().map(ErrorArg::from));

    if let Some(line) = args.line {
        let mut info = InputInfo::new(line, args.column.unwrap_or(1));
        if let Some(file) = &args.file {
            info = info.with_file(file);
        }
        error.set_position(info);
    } else if let Some(path) = &args.query {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read query file {}", path.display()))?;
        let mut parser = StringParser::new(input).with_file(path.display().to_string());
        parser.set_mark(args.mark.unwrap_or(0));
        error.mark_position(&parser);
    }

    for entry in &args.trace {
        error.add_trace(Some(entry.clone()));
    }
    if let Some(value) = &args.value {
        error.set_value(Value::from(value.as_str()));
    }
    if args.uncatchable {
        error.mark_uncatchable();
    }
    Ok(error)
}
