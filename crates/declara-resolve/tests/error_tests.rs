use std::sync::Arc;

use declara_resolve::{
    accept_if, resolve, AcceptAll, ErrorPolicy, ReferenceKind, RejectCalls, ResolutionError, Resolver,
    ResolverOptions,
};
use declara_source::DeclaraError;
use expect_test::expect;
use miette::{Diagnostic, SourceSpan};

use crate::common::{init_logger, parse, schema};

fn resolve_err(text: &str) -> ResolutionError {
    let schema = schema();
    let document = parse(text);
    Resolver::new(&schema)
        .resolve(&document.block)
        .expect_err("resolution should fail")
}

fn message(text: &str) -> String {
    resolve_err(text).to_string()
}

#[test]
fn test_unknown_property() {
    let err = resolve_err("n3.x = 1");
    assert_eq!(
        err,
        ResolutionError::UnresolvedReference {
            name: "n3".to_string(),
            kind: ReferenceKind::Property,
            scope: "TopLevel".to_string(),
            span: (0, 2).into(),
        }
    );
    expect!["Unresolved reference: `n3` is not a property of `TopLevel`"].assert_eq(&err.to_string());
}

#[test]
fn test_unknown_final_segment() {
    let err = resolve_err("n1.y = 1");
    assert!(matches!(
        err,
        ResolutionError::UnresolvedReference { ref name, kind: ReferenceKind::Property, ref scope, .. }
            if name == "y" && scope == "Nested"
    ));
    assert_eq!(err.span(), SourceSpan::from((3, 1)));
}

#[test]
fn test_primitive_segment_is_not_a_receiver() {
    expect!["Unresolved reference: `version` is not a configurable receiver of `TopLevel`"]
        .assert_eq(&message("version.x = 1"));
}

#[test]
fn test_unit_call_result_is_not_a_receiver() {
    let err = resolve_err("n1.tag(\"a\").x = 1");
    assert_eq!(
        err,
        ResolutionError::UnresolvedReference {
            name: "tag".to_string(),
            kind: ReferenceKind::Receiver,
            scope: "Nested".to_string(),
            span: (3, 3).into(),
        }
    );
    expect!["Unresolved reference: `describe` is not a configurable receiver of `TopLevel`"]
        .assert_eq(&message("describe().x = 1"));
}

#[test]
fn test_unknown_member_of_call_result() {
    let err = resolve_err("plugins { id(\"a\").enabled = true }");
    expect!["Unresolved reference: `enabled` is not a property of `PluginDefinition`"].assert_eq(&err.to_string());
    expect!["Unresolved reference: `kapt` is not a function of `PluginDefinition`"]
        .assert_eq(&message("plugins { id(\"a\").kapt() }"));
}

#[test]
fn test_configuring_call_is_not_a_receiver() {
    expect!["Schema mismatch: `n1` configures `Nested` and cannot be used as a value"]
        .assert_eq(&message("n1 { }.x = 1"));
}

#[test]
fn test_unknown_function() {
    let err = resolve_err("n1 { }\nn3 { x = 1 }");
    assert!(matches!(
        err,
        ResolutionError::UnresolvedReference { ref name, kind: ReferenceKind::Function, .. } if name == "n3"
    ));
    assert_eq!(err.span(), SourceSpan::from((7, 2)));
}

#[test]
fn test_unknown_function_in_nested_scope() {
    expect!["Unresolved reference: `describe` is not a function of `Nested`"]
        .assert_eq(&message("n1 { describe() }"));
}

#[test]
fn test_configuring_function_without_block() {
    expect!["Schema mismatch: `n1` configures `Nested` and must be called with a trailing block"]
        .assert_eq(&message("n1()"));
}

#[test]
fn test_plain_function_with_block() {
    let err = resolve_err("describe() { }");
    expect!["Schema mismatch: `describe` does not take a trailing block"].assert_eq(&err.to_string());
    assert_eq!(err.span(), SourceSpan::from((11, 3)));
}

#[test]
fn test_read_only_property() {
    expect!["Schema mismatch: `count` is read-only and cannot be assigned"].assert_eq(&message("count = 1"));
    expect!["Schema mismatch: `n1.child` is read-only and cannot be assigned"]
        .assert_eq(&message("n1.child = n2"));
}

#[test]
fn test_value_type_mismatch() {
    expect!["Schema mismatch: `x` expects a value of type `Int`, found `String`"]
        .assert_eq(&message("n1 { x = \"four\" }"));
    expect!["Schema mismatch: `version` expects a value of type `String`, found `Int`"]
        .assert_eq(&message("version = n1.x"));
}

#[test]
fn test_argument_count_mismatch() {
    expect!["Schema mismatch: `id` expects 1 argument(s), found 0"].assert_eq(&message("plugins { id() }"));
    expect!["Schema mismatch: `describe` expects 0 argument(s), found 1"]
        .assert_eq(&message("version = describe(1)"));
}

#[test]
fn test_argument_type_mismatch() {
    let err = resolve_err("plugins { id(42) }");
    expect!["Schema mismatch: argument `id` of `id` expects `String`, found `Int`"].assert_eq(&err.to_string());
    assert_eq!(err.span(), SourceSpan::from((13, 2)));
}

#[test]
fn test_configuring_function_as_value() {
    expect!["Schema mismatch: `n1` configures `Nested` and cannot be used as a value"]
        .assert_eq(&message("version = n1 { }"));
}

#[test]
fn test_bare_expressions_are_unsupported() {
    let err = resolve_err("42");
    assert_eq!(
        err,
        ResolutionError::UnsupportedStatement {
            kind: "literal",
            scope: "TopLevel".to_string(),
            span: (0, 2).into(),
        }
    );
    expect!["Unsupported statement: a bare property access has no meaning in `Nested`"]
        .assert_eq(&message("n1 { x }"));
}

#[test]
fn test_abort_stops_at_first_error() {
    init_logger();
    let schema = schema();
    let document = parse("n1.x = 1\nn1 { x = true }\nn3.x = 2");

    let err = Resolver::new(&schema).resolve(&document.block).unwrap_err();

    assert!(matches!(err, ResolutionError::SchemaMismatch { .. }));
}

#[test]
fn test_filtered_statements_are_never_resolved() {
    let schema = schema();
    let document = parse("n1.x = 1\nn3.x = 2\nbroken { nothing = here }");

    let filter = accept_if(|statement, _| {
        let text = statement.origin().text();
        !text.starts_with("n3") && !text.starts_with("broken")
    });
    let result = resolve(&schema, &document.block, &filter).unwrap();
    assert_eq!(result.assignments.len(), 1);

    let document = parse("n2 { unknown = 1; x = \"wrong\" }");
    let result = resolve(&schema, &document.block, &RejectCalls::named("n2")).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_skip_statement_records_errors_per_scope() {
    init_logger();
    let schema = schema();
    let document = parse(
        r#"
        n1.x = 1
        n3.x = 2
        n1 {
            x = "bad"
            x = 5
        }
        n2.x = 3
        "#,
    );
    let options = ResolverOptions::default().with_error_policy(ErrorPolicy::SkipStatement);

    let result = Resolver::new(&schema)
        .with_options(options)
        .resolve(&document.block)
        .unwrap();

    assert_eq!(result.assignments.len(), 2);
    assert_eq!(result.skipped.len(), 1);
    assert!(matches!(
        &result.skipped[0],
        ResolutionError::UnresolvedReference { name, .. } if name == "n3"
    ));

    let nested = result.calls[0].nested.as_ref().unwrap();
    assert_eq!(nested.assignments.len(), 1);
    assert_eq!(nested.assignments[0].value.text(), "5");
    assert_eq!(nested.skipped.len(), 1);
    assert!(matches!(nested.skipped[0], ResolutionError::SchemaMismatch { .. }));

    assert_eq!(result.all_skipped().len(), 2);
    assert!(!result.is_empty());
}

#[test]
fn test_fully_skipped_scope_is_empty() {
    let schema = schema();
    let document = parse("n1 { x = \"bad\"; y = 1 }");
    let options = ResolverOptions::default().with_error_policy(ErrorPolicy::SkipStatement);

    let result = Resolver::new(&schema)
        .with_options(options)
        .resolve(&document.block)
        .unwrap();

    let nested = result.calls[0].nested.as_ref().unwrap();
    assert_eq!(nested.len(), 0);
    assert!(nested.is_empty());
    assert_eq!(nested.skipped.len(), 2);
    assert_eq!(result.len(), 1);
    assert!(!result.is_empty());
}

#[test]
fn test_skip_statement_drops_call_with_bad_shape() {
    let schema = schema();
    let document = parse("n1()\nn2 { x = 1 }");
    let options = ResolverOptions {
        error_policy: ErrorPolicy::SkipStatement,
    };

    let result = Resolver::new(&schema)
        .with_options(options)
        .resolve_filtered(&document.block, &AcceptAll)
        .unwrap();

    assert_eq!(result.calls.len(), 1);
    assert_eq!(result.calls[0].name(), "n2");
    assert_eq!(result.skipped.len(), 1);
}

#[test]
fn test_options_from_toml() {
    let options: ResolverOptions = toml::from_str("error-policy = \"skip-statement\"").unwrap();
    assert_eq!(options.error_policy, ErrorPolicy::SkipStatement);

    let options: ResolverOptions = toml::from_str("").unwrap();
    assert_eq!(options, ResolverOptions::default());

    assert!(toml::from_str::<ResolverOptions>("error-policy = \"retry\"").is_err());
}

#[test]
fn test_error_renders_against_document() {
    let schema = schema();
    let document = parse("n1 {\n    x = \"four\"\n}");
    let err = Resolver::new(&schema).resolve(&document.block).unwrap_err();

    assert_eq!(
        err.code().map(|code| code.to_string()),
        Some("declara_resolve::schema_mismatch".to_string())
    );

    let report = err.report(Arc::clone(&document.source));
    let mut rendered = String::new();
    miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
        .render_report(&mut rendered, &report)
        .unwrap();

    assert!(rendered.contains("declara_resolve::schema_mismatch"));
    assert!(rendered.contains("x = \"four\""));
    assert!(rendered.contains("here"));
}
