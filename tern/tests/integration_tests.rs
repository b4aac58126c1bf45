use tern::Session;
use tern_source::ParseError;

fn eval(input: &str) -> String {
    let mut session = Session::new();
    match session.eval(input) {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => "<none>".to_string(),
        Err(err) => format!("parser error: {}", err),
    }
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(eval("1 + 2 * 3;"), "7");
}

#[test]
fn var_binding() {
    let mut session = Session::new();
    let value = session.eval("var a = 10; a - 4;").unwrap().unwrap();
    assert_eq!(value.to_string(), "6");

    let a = session.scope().get("a").and_then(|a| a.cast_to_number());
    assert_eq!(a, Some(10.0));
}

#[test]
fn if_else() {
    assert_eq!(eval("if (1 < 2) 42; else 0;"), "42");
    assert_eq!(eval("if (1 > 2) 42;"), "null");
}

#[test]
fn optional_semicolons() {
    assert_eq!(eval("if (1 < 2) 42 else 0"), "42");
    assert_eq!(eval("var a = 1 var b = 2; b;"), "2");
    assert_eq!(eval("1 2"), "2");
}

#[test]
fn parenthesised_label_is_rejected() {
    assert_eq!(eval("(a): 1"), "parser error: SyntaxError: unexpected token :");
}

#[test]
fn double_bang() {
    assert_eq!(eval("!!0 == false;"), "true");
}

#[test]
fn string_inspection() {
    assert_eq!(eval("var s = \"hi\"; s;"), "hi");
}

#[test]
fn parse_error_keeps_session() {
    let mut session = Session::new();
    session.eval("var a = 1;").unwrap();

    let err = session.eval("1 +").unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)));
    assert_eq!(err.to_string(), "SyntaxError: unexpected token end of input");

    let value = session.eval("a + 1;").unwrap().unwrap();
    assert_eq!(value.to_string(), "2");
}

#[test]
fn empty_input() {
    assert_eq!(eval(""), "<none>");
    assert_eq!(eval("   \n"), "<none>");
}

#[test]
fn bindings_persist_across_inputs() {
    let mut session = Session::new();
    session.eval("var x = 2;").unwrap();
    session.eval("x = x * 21;").unwrap();
    assert_eq!(session.eval("x;").unwrap().unwrap().to_string(), "42");
}

#[test]
fn runtime_errors_are_values() {
    assert_eq!(eval("y;"), "{ message: identifier not found: y }");
    assert_eq!(eval("1 + 'a'; 2;"), "{ message: type mismatch: number + string }");
}

#[test]
fn lexical_errors() {
    assert_eq!(
        eval("var s = 'abc"),
        "parser error: var s = 'abc\n        ^\nUncaught SyntaxError: Invalid or unexpected token"
    );
    assert_eq!(
        eval("1;\n/* open"),
        "parser error: /* open\n^\nUncaught SyntaxError: Invalid or unexpected token"
    );
    assert_eq!(
        eval("3in"),
        "parser error: 3in\n ^\nUncaught SyntaxError: Invalid or unexpected token"
    );
    assert_eq!(
        eval("a = `b"),
        "parser error: a = `b\n    ^\nUncaught SyntaxError: Invalid or unexpected token"
    );
}

#[test]
fn deep_nesting() {
    let depth = 200;
    let input = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    let output = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(move || eval(&input))
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(output, "1");
}

#[test]
fn script() {
    let script = r#"#!/usr/bin/env tern
// pick the larger value
var a = 3, b = 4;
var max = a > b ? a : b;
/* b wins */
if (max == b) {
    max = max * 10
} else {
    max = 0
}
"#;
    assert_eq!(eval(script), "40");
}
