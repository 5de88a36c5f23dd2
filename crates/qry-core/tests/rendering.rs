//! End-to-end rendering and report tests.

use pretty_assertions::assert_eq;
use qry_core::{
    ErrorArg, ErrorDescriptor, ErrorKind, ErrorReport, InputInfo, LineBreak, MessageText, QName,
    QueryError, ResultExt, StringParser, Value, query_error,
};
use schemars::schema_for;

fn lf() -> MessageText {
    MessageText {
        line_break: LineBreak::Lf,
        ..MessageText::default()
    }
}

fn xyz() -> ErrorDescriptor {
    ErrorDescriptor::new(QName::local_only("XYZ0001"), "unexpected token '%'")
}

#[test]
fn descriptor_without_position_or_trace() {
    let err = query_error!(xyz(), "}");
    let rendered = err.render_message();

    assert!(rendered.contains("[XYZ0001] unexpected token '}'"));
    assert!(!rendered.contains("Stopped at"));
    assert!(!rendered.contains("Stack Trace"));
    assert_eq!(err.to_string(), rendered);
}

#[test]
fn position_and_two_trace_entries() {
    let mut err = query_error!(@ InputInfo::new(4, 7), xyz(), "}");
    err.add_trace(Some(InputInfo::new(8, 1)))
        .add_trace(Some(InputInfo::new(12, 3)));

    let rendered = err.render_with(&lf());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        [
            "Stopped at 4/7:",
            "[XYZ0001] unexpected token '}'",
            "Stack Trace:",
            "- 8/1",
            "- 12/3",
        ]
    );
}

#[test]
fn omitted_sections_leave_no_stray_separators() {
    let err = query_error!(xyz(), "}");
    let rendered = err.render_with(&lf());
    assert!(!rendered.starts_with('\n'));
    assert!(!rendered.ends_with('\n'));
    assert!(!rendered.contains("\n\n"));

    let mut traced = query_error!(xyz(), "}");
    traced.add_trace(Some(InputInfo::new(1, 1)));
    let rendered = traced.render_with(&lf());
    assert!(rendered.starts_with("[XYZ0001]"));
    assert!(!rendered.contains("\n\n"));
}

#[test]
fn byte_arguments_render_as_text() {
    let err = QueryError::with_descriptor(
        None,
        ErrorKind::UnexpectedToken,
        [ErrorArg::from(b"return".to_vec())],
    );
    assert_eq!(err.message(), "Unexpected token 'return'.");
}

#[test]
fn parser_positions_a_lookahead_error() {
    let source = "for $x in 1 to 3\nreturn $x +";
    let mut parser = StringParser::new(source).with_file("loop.xq");
    parser.set_mark(source.len() + 5);

    let mut err = query_error!(ErrorKind::UnexpectedToken, "EOF");
    err.mark_position(&parser);

    assert_eq!(err.file(), Some("loop.xq"));
    assert_eq!((err.line(), err.column()), (2, 12));
    assert_eq!(err.marked_column(), source.len() + 5);
    assert!(err.render_with(&lf()).starts_with("Stopped at loop.xq, 2/12:\n[XPST0003]"));
}

#[test]
fn propagation_builds_breadcrumbs() {
    fn evaluate(depth: u32) -> qry_core::QueryResult<i64> {
        if depth == 0 {
            return Err(query_error!(@ InputInfo::new(1, 10), ErrorKind::DivisionByZero));
        }
        evaluate(depth - 1).in_frame(Some(&InputInfo::new(depth + 1, 1).with_file("lib.xq")))
    }

    let err = evaluate(2).unwrap_err();
    let rendered = err.render_with(&lf());
    assert_eq!(
        rendered,
        "Stopped at 1/10:\n[FOAR0001] Division by zero.\nStack Trace:\n- lib.xq, 2/1\n- lib.xq, 3/1"
    );
}

#[test]
fn report_validates_against_its_schema() {
    let info = InputInfo::new(2, 3).with_file("q.xq");
    let mut err = query_error!(@ info, ErrorKind::TypeMismatch, "xs:integer", "xs:string")
        .with_value(Value::sequence([Value::from("a"), Value::Integer(1)]));
    err.set_suggestions(vec!["xs:integer(...)".to_owned()])
        .add_trace(Some(InputInfo::new(5, 1)));

    let report = err.report();
    assert_eq!(report.code, "err:XPTY0004");
    assert_eq!(report.message, "Expected xs:integer, found xs:string.");
    assert_eq!(report.line, 2);
    assert!(report.catchable);

    let schema = serde_json::to_value(schema_for!(ErrorReport)).unwrap();
    let instance = serde_json::to_value(&report).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    let errors: Vec<String> = validator.iter_errors(&instance).map(|e| format!("{e}")).collect();
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");

    let recovered: ErrorReport = serde_json::from_value(instance).unwrap();
    assert_eq!(recovered, report);
}

#[test]
fn report_with_non_finite_value_round_trips() {
    let no_args: Vec<ErrorArg> = Vec::new();
    let err = QueryError::with_descriptor(None, ErrorKind::DivisionByZero, no_args)
        .with_value(Value::sequence([Value::Double(f64::NAN), Value::Double(f64::INFINITY)]));
    let report = err.report();

    let schema = serde_json::to_value(schema_for!(ErrorReport)).unwrap();
    let instance = serde_json::to_value(&report).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    assert!(validator.is_valid(&instance));

    let recovered: ErrorReport = serde_json::from_value(instance).unwrap();
    let Value::Sequence(items) = recovered.value else {
        panic!("expected a sequence");
    };
    assert!(matches!(items[0], Value::Double(d) if d.is_nan()));
    assert_eq!(items[1], Value::Double(f64::INFINITY));
}
