//! CLI tool to inspect and translate PHP token dumps.

use std::fs;
use std::process::ExitCode;

use php2js_rs::ast::Node;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: php2js <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  check      Check if token dump(s) build a clean tree");
        eprintln!("  ast        Build the typed tree and print it");
        eprintln!("  translate  Translate token dump(s) to JavaScript on stdout");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  php2js check calculator.json");
        eprintln!("  php2js ast calculator.json");
        eprintln!("  php2js translate calculator.json");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "check" => match php2js_rs::parse_json(&content) {
                Ok(file) => {
                    let classes = file
                        .children
                        .iter()
                        .filter(|n| matches!(n, Node::Class(_)))
                        .count();
                    let functions = file
                        .children
                        .iter()
                        .filter(|n| matches!(n, Node::Function(_)))
                        .count();
                    let statements = file.children.len() - classes - functions;
                    eprintln!(
                        "{path}: valid ({classes} class(es), \
                         {functions} function(s), \
                         {statements} statement(s))"
                    );
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "ast" => match php2js_rs::decode(&content) {
                Ok(tokens) => match php2js_rs::parse_named(&tokens, path.as_str()) {
                    Ok(file) => println!("{file:#?}"),
                    Err(e) => {
                        eprintln!("{path}: {e}");
                        had_error = true;
                    }
                },
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "translate" => match php2js_rs::decode(&content) {
                Ok(tokens) => match php2js_rs::generate_named(&tokens, path.as_str()) {
                    Ok(js) => print!("{js}"),
                    Err(e) => {
                        eprintln!("{path}: {e}");
                        had_error = true;
                    }
                },
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
