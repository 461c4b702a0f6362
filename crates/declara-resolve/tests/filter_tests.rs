use std::cell::RefCell;

use declara_resolve::{accept_if, resolve, RejectCalls, StatementFilter};
use declara_syntax::Statement;

use crate::common::{init_logger, parse, schema};

#[test]
fn test_rejected_block_is_never_shown_to_the_filter() {
    init_logger();
    let schema = schema();
    let document = parse("n1 { x = 4; child { x = 6 } }\nn2 { x = 5 }");

    let seen = RefCell::new(Vec::new());
    let filter = accept_if(|statement, _| {
        seen.borrow_mut().push(statement.origin().text().to_string());
        statement.as_call().map_or(true, |call| call.name() != "n1")
    });
    let result = resolve(&schema, &document.block, &filter).unwrap();

    assert_eq!(
        seen.into_inner(),
        vec![
            "n1 { x = 4; child { x = 6 } }".to_string(),
            "n2 { x = 5 }".to_string(),
            "x = 5".to_string(),
        ]
    );
    assert_eq!(result.all_assignments().len(), 1);
    assert_eq!(result.all_calls().len(), 1);
}

#[test]
fn test_cascade_reaches_every_depth() {
    let schema = schema();
    let document = parse(
        r#"
        n1 {
            x = 1
            child {
                x = 2
                child { x = 3 }
            }
        }
        "#,
    );

    let result = resolve(&schema, &document.block, &RejectCalls::named("child")).unwrap();

    let values: Vec<_> = result.all_assignments().iter().map(|a| a.value.text()).collect();
    assert_eq!(values, vec!["1"]);
    assert!(result.calls[0].nested.as_ref().unwrap().calls.is_empty());
}

#[test]
fn test_rejected_call_hides_statements_that_would_pass() {
    let schema = schema();
    let document = parse("n1 { x = 4 }");

    // Accepts every assignment, so `x = 4` would pass if it were ever asked.
    let filter = accept_if(|statement, _| statement.as_assignment().is_some());
    let result = resolve(&schema, &document.block, &filter).unwrap();

    assert!(result.is_empty());
}

#[test]
fn test_context_tracks_scope_depth_and_path() {
    let schema = schema();
    let document = parse("n1 { child { x = 1 } }\nversion = \"v\"\nplugins { id(\"a\") }");

    let seen = RefCell::new(Vec::new());
    let filter = accept_if(|_, context| {
        seen.borrow_mut().push((
            context.depth(),
            context.path().join("."),
            context.scope().name().to_string(),
            context.enclosing_call().map(str::to_string),
        ));
        true
    });
    resolve(&schema, &document.block, &filter).unwrap();

    let expected = vec![
        (0, "".to_string(), "TopLevel".to_string(), None),
        (1, "n1".to_string(), "Nested".to_string(), Some("n1".to_string())),
        (2, "n1.child".to_string(), "Nested".to_string(), Some("child".to_string())),
        (0, "".to_string(), "TopLevel".to_string(), None),
        (0, "".to_string(), "TopLevel".to_string(), None),
        (1, "plugins".to_string(), "Plugins".to_string(), Some("plugins".to_string())),
    ];
    assert_eq!(seen.into_inner(), expected);
}

#[test]
fn test_filter_sees_statement_kinds() {
    let schema = schema();
    let document = parse("version = \"1\"\nn1 { x = 1 }\nn1.tag(\"a\")");

    let kinds = RefCell::new(Vec::new());
    let filter = accept_if(|statement, context| {
        if context.is_top_level() {
            kinds.borrow_mut().push(match statement {
                Statement::Assignment(_) => "assignment",
                Statement::Call(call) if call.has_block() => "block call",
                Statement::Call(_) => "call",
                Statement::Expression(_) => "expression",
            });
        }
        true
    });
    resolve(&schema, &document.block, &filter).unwrap();

    assert_eq!(kinds.into_inner(), vec!["assignment", "block call", "call"]);
}

/// A filter implemented as a named type instead of a closure.
struct MaxDepth(usize);

impl StatementFilter for MaxDepth {
    fn accepts(&self, _statement: &Statement, context: &declara_resolve::ResolutionContext<'_>) -> bool {
        context.depth() < self.0
    }
}

#[test]
fn test_custom_filter_type() {
    let schema = schema();
    let document = parse("n1 { x = 1; child { x = 2; child { x = 3 } } }");

    let result = resolve(&schema, &document.block, &MaxDepth(2)).unwrap();

    let values: Vec<_> = result.all_assignments().iter().map(|a| a.value.text()).collect();
    assert_eq!(values, vec!["1"]);
    let child = &result.calls[0].nested.as_ref().unwrap().calls[0];
    assert!(child.nested.as_ref().unwrap().is_empty());
}
