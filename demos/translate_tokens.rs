//! Translate an embedded PHP token dump to JavaScript.

fn main() {
    // Token dump for:
    //
    //   <?php
    //   class Calculator {
    //       function add($a, $b) {
    //           $a + $b;
    //       }
    //   }
    let dump = r#"[
        {"type": "T_OPEN_TAG", "text": "<?php\n"},
        {"type": "T_CLASS", "text": "class"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_STRING", "text": "Calculator"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "{", "text": "{"},
        {"type": "T_WHITESPACE", "text": "\n    "},
        {"type": "T_FUNCTION", "text": "function"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_STRING", "text": "add"},
        {"type": "(", "text": "("},
        {"type": "T_VARIABLE", "text": "$a"},
        {"type": ",", "text": ","},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_VARIABLE", "text": "$b"},
        {"type": ")", "text": ")"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "{", "text": "{"},
        {"type": "T_WHITESPACE", "text": "\n        "},
        {"type": "T_VARIABLE", "text": "$a"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "+", "text": "+"},
        {"type": "T_WHITESPACE", "text": " "},
        {"type": "T_VARIABLE", "text": "$b"},
        {"type": ";", "text": ";"},
        {"type": "T_WHITESPACE", "text": "\n    "},
        {"type": "}", "text": "}"},
        {"type": "T_WHITESPACE", "text": "\n"},
        {"type": "}", "text": "}"}
    ]"#;

    let tokens = php2js_rs::decode(dump).expect("decode failed");
    println!("Decoded {} token(s)", tokens.len());

    let js = php2js_rs::generate(&tokens).expect("generate failed");
    println!("\nJavaScript output:\n{js}");
}
