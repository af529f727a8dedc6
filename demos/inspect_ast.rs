//! Build the typed tree from a token dump and walk it.

use php2js_rs::ast::Node;

fn main() {
    // Token dump for:
    //
    //   <?php
    //   class Greeter {
    //       static function version($major = true) {
    //           1 + 2;
    //       }
    //   }
    //   3 * 4;
    let dump = r#"[
        {"type": "T_OPEN_TAG", "text": "<?php\n"},
        {"type": "T_CLASS", "text": "class"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_STRING", "text": "Greeter"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "{", "text": "{"},
        {"type": "T_WHITESPACE", "text": "\n    "},
        {"type": "T_STATIC", "text": "static"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_FUNCTION", "text": "function"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_STRING", "text": "version"},
        {"type": "(", "text": "("},
        {"type": "T_VARIABLE", "text": "$major"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "=", "text": "="},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_STRING", "text": "true"},
        {"type": ")", "text": ")"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "{", "text": "{"},
        {"type": "T_WHITESPACE", "text": "\n        "},
        {"type": "T_LNUMBER", "text": "1"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "+", "text": "+"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_LNUMBER", "text": "2"},
        {"type": ";", "text": ";"},
        {"type": "T_WHITESPACE", "text": "\n    "},
        {"type": "}", "text": "}"},
        {"type": "T_WHITESPACE", "text": "\n"},
        {"type": "}", "text": "}"},
        {"type": "T_WHITESPACE", "text": "\n"},
        {"type": "T_LNUMBER", "text": "3"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "*", "text": "*"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_LNUMBER", "text": "4"},
        {"type": ";", "text": ";"}
    ]"#;

    let file = php2js_rs::parse_json(dump).expect("parse failed");

    println!("Top-level nodes: {}", file.children.len());
    for node in &file.children {
        match node {
            Node::Class(class) => {
                println!("  Class: {} ({} member(s))", class.name, class.children.len());
                for member in &class.children {
                    if let Node::Function(function) = member {
                        let marker = if function.modifiers.is_static {
                            " [static]"
                        } else {
                            ""
                        };
                        println!(
                            "    Function: {}{marker} ({} parameter(s))",
                            function.name,
                            function.parameters.len()
                        );
                    }
                }
            }
            Node::Function(function) => println!("  Function: {}", function.name),
            Node::If(stmt) => println!("  If: {:?}", stmt.condition),
            Node::Expr(expr) => println!("  Statement: {expr:?}"),
        }
    }
}
