//! Generator golden tests: full token sequences against the exact
//! JavaScript text they should produce.

mod common;

use common::{ident, num, punct, semi, tok, var, ws};
use php2js_rs::{GenerateErrorKind, generate};

// -----------------------------------------------------------
// Full-program goldens.
// -----------------------------------------------------------

#[test]
fn golden_class_with_methods() {
    let tokens = vec![
        tok("T_DOC_COMMENT", "/**\n * A pocket calculator.\n */"),
        tok("T_WHITESPACE", "\n"),
        tok("T_ABSTRACT", "abstract"),
        ws(),
        tok("T_CLASS", "class"),
        ws(),
        ident("Calculator"),
        ws(),
        punct("{"),
        tok("T_WHITESPACE", "\n    "),
        tok("T_DOC_COMMENT", "/**\n     * Adds two numbers.\n     */"),
        tok("T_WHITESPACE", "\n    "),
        tok("T_PUBLIC", "public"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("add"),
        punct("("),
        var("$a"),
        punct(","),
        ws(),
        var("$b"),
        ws(),
        punct("="),
        ws(),
        ident("true"),
        punct(")"),
        ws(),
        punct("{"),
        tok("T_WHITESPACE", "\n        "),
        num("1"),
        ws(),
        punct("+"),
        ws(),
        num("2"),
        ws(),
        punct("*"),
        ws(),
        num("3"),
        semi(),
        tok("T_WHITESPACE", "\n    "),
        punct("}"),
        tok("T_WHITESPACE", "\n\n    "),
        tok("T_STATIC", "static"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("version"),
        punct("("),
        punct(")"),
        ws(),
        punct("{"),
        tok("T_WHITESPACE", "\n        "),
        num("7"),
        semi(),
        tok("T_WHITESPACE", "\n    "),
        punct("}"),
        tok("T_WHITESPACE", "\n"),
        punct("}"),
    ];

    let expected = "\
/**
 * A pocket calculator.
 */
var Calculator = exports.Calculator = function () { throw new Error('Calculator is abstract'); };

/**
 * Adds two numbers.
 */
Calculator.prototype.add = function (a, b) {
    if (b === undefined) { b = true; }
    1 + 2 * 3;
};

exports.version = function () {
    7;
};
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn golden_if_between_statements() {
    let tokens = vec![
        num("1"),
        semi(),
        ws(),
        tok("T_IF", "if"),
        ws(),
        punct("("),
        num("2"),
        ws(),
        punct("+"),
        ws(),
        num("3"),
        punct(")"),
        ws(),
        punct("{"),
        ws(),
        num("4"),
        semi(),
        ws(),
        punct("}"),
        ws(),
        num("5"),
        semi(),
    ];

    let expected = "\
1;
if (2 + 3) {
    4;
}
5;
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn golden_nested_if_indents_twice() {
    let tokens = vec![
        tok("T_IF", "if"),
        punct("("),
        num("1"),
        punct(")"),
        punct("{"),
        tok("T_IF", "if"),
        punct("("),
        num("2"),
        punct(")"),
        punct("{"),
        num("3"),
        semi(),
        punct("}"),
        punct("}"),
    ];

    let expected = "\
if (1) {
    if (2) {
        3;
    }
}
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn golden_default_parameter_guard() {
    let tokens = vec![
        tok("T_CLASS", "class"),
        ws(),
        ident("Switch"),
        ws(),
        punct("{"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("flip"),
        punct("("),
        var("$state"),
        ws(),
        punct("="),
        ws(),
        tok("T_CONSTANT_ENCAPSED_STRING", "'on'"),
        punct(")"),
        ws(),
        punct("{"),
        punct("}"),
        ws(),
        punct("}"),
    ];

    let expected = "\
var Switch = exports.Switch = function () {};

Switch.prototype.flip = function (state) {
    if (state === undefined) { state = \"on\"; }
};
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn golden_uppercase_boolean_default() {
    let tokens = vec![
        tok("T_CLASS", "class"),
        ws(),
        ident("Toggle"),
        ws(),
        punct("{"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("reset"),
        punct("("),
        var("$on"),
        ws(),
        punct("="),
        ws(),
        ident("FALSE"),
        punct(")"),
        ws(),
        punct("{"),
        punct("}"),
        ws(),
        punct("}"),
    ];

    let expected = "\
var Toggle = exports.Toggle = function () {};

Toggle.prototype.reset = function (on) {
    if (on === undefined) { on = false; }
};
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn golden_static_function_at_top_level() {
    let tokens = vec![
        tok("T_STATIC", "static"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("boot"),
        punct("("),
        punct(")"),
        ws(),
        punct("{"),
        ws(),
        num("1"),
        semi(),
        ws(),
        punct("}"),
    ];

    let expected = "\
exports.boot = function () {
    1;
};
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn golden_boolean_and_condition() {
    let tokens = vec![
        tok("T_IF", "if"),
        ws(),
        punct("("),
        var("$ready"),
        ws(),
        tok("T_BOOLEAN_AND", "&&"),
        ws(),
        num("1"),
        punct(")"),
        ws(),
        punct("{"),
        ws(),
        num("2"),
        semi(),
        ws(),
        punct("}"),
    ];

    let expected = "\
if (ready && 1) {
    2;
}
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

// -----------------------------------------------------------
// Streaming behavior.
// -----------------------------------------------------------

#[test]
fn unclosed_containers_still_assemble() {
    let tokens = vec![
        tok("T_CLASS", "class"),
        ws(),
        ident("Partial"),
        ws(),
        punct("{"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("half"),
        punct("("),
        punct(")"),
        ws(),
        punct("{"),
        ws(),
        num("1"),
        semi(),
    ];

    let expected = "\
var Partial = exports.Partial = function () {};

Partial.prototype.half = function () {
    1;
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn else_token_becomes_a_placeholder() {
    let tokens = vec![
        tok("T_IF", "if"),
        punct("("),
        num("1"),
        punct(")"),
        punct("{"),
        num("2"),
        semi(),
        punct("}"),
        ws(),
        tok("T_ELSE", "else"),
    ];

    let expected = "\
if (1) {
    2;
}
/* unhandled T_ELSE \"else\" */
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

#[test]
fn generation_is_repeatable() {
    let tokens = vec![
        var("$x"),
        ws(),
        punct("="),
        ws(),
        num("1"),
        ws(),
        punct("."),
        ws(),
        num("2"),
        semi(),
    ];
    let first = generate(&tokens).expect("generate failed");
    let second = generate(&tokens).expect("generate failed");
    assert_eq!(first, second);
    assert_eq!(first, "x = 1 + 2;\n");
}

// -----------------------------------------------------------
// Doc comments flow straight into the output.
// -----------------------------------------------------------

#[test]
fn doc_comment_before_a_statement_is_kept() {
    let tokens = vec![
        tok("T_DOC_COMMENT", "/** note */"),
        ws(),
        num("1"),
        semi(),
    ];
    assert_eq!(
        generate(&tokens).expect("generate failed"),
        "/** note */\n1;\n"
    );
}

#[test]
fn doc_comments_between_statements_are_all_kept() {
    let tokens = vec![
        tok("T_DOC_COMMENT", "/** a */"),
        ws(),
        num("1"),
        semi(),
        ws(),
        tok("T_DOC_COMMENT", "/** b */"),
        ws(),
        num("2"),
        semi(),
    ];
    assert_eq!(
        generate(&tokens).expect("generate failed"),
        "/** a */\n1;\n\n/** b */\n2;\n"
    );
}

#[test]
fn consecutive_doc_comments_all_appear() {
    let tokens = vec![
        tok("T_DOC_COMMENT", "/** one */"),
        tok("T_DOC_COMMENT", "/** two */"),
    ];
    assert_eq!(
        generate(&tokens).expect("generate failed"),
        "/** one */\n/** two */\n"
    );
}

#[test]
fn doc_comment_at_end_of_input_still_appears() {
    let tokens = vec![num("1"), semi(), ws(), tok("T_DOC_COMMENT", "/** tail */")];
    assert_eq!(
        generate(&tokens).expect("generate failed"),
        "1;\n\n/** tail */\n"
    );
}

#[test]
fn doc_comment_inside_a_function_body_is_indented() {
    let tokens = vec![
        tok("T_CLASS", "class"),
        ws(),
        ident("C"),
        ws(),
        punct("{"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("f"),
        punct("("),
        punct(")"),
        ws(),
        punct("{"),
        ws(),
        tok("T_DOC_COMMENT", "/** inner */"),
        ws(),
        num("1"),
        semi(),
        ws(),
        punct("}"),
        ws(),
        punct("}"),
    ];

    let expected = "\
var C = exports.C = function () {};

C.prototype.f = function () {
    /** inner */
    1;
};
";
    assert_eq!(generate(&tokens).expect("generate failed"), expected);
}

// -----------------------------------------------------------
// Generator errors.
// -----------------------------------------------------------

#[test]
fn unknown_default_value() {
    let tokens = vec![
        tok("T_CLASS", "class"),
        ws(),
        ident("C"),
        ws(),
        punct("{"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        ident("f"),
        punct("("),
        var("$x"),
        punct("="),
        ident("null"),
        punct(")"),
        punct("{"),
        punct("}"),
        punct("}"),
    ];
    let err = generate(&tokens).expect_err("should fail");
    assert_eq!(
        err.kind,
        GenerateErrorKind::UnknownDefaultLiteral {
            found: "null".to_string(),
        }
    );
}

#[test]
fn missing_function_name() {
    let tokens = vec![
        tok("T_CLASS", "class"),
        ws(),
        ident("C"),
        ws(),
        punct("{"),
        ws(),
        tok("T_FUNCTION", "function"),
        ws(),
        punct("("),
    ];
    let err = generate(&tokens).expect_err("should fail");
    assert_eq!(
        err.kind,
        GenerateErrorKind::UnexpectedToken {
            expected: "a function name",
            found: "(".to_string(),
        }
    );
}
