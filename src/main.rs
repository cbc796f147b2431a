use std::io::{self, Write};

use rusp::interpreter::{self, Builtin, EnvRef, Value};
use rusp::lexer::Token;
use rusp::parser::{self, ParseState};
use rusp::reader;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    let files: Vec<String> = std::env::args().skip(1).collect();
    let root = interpreter::root_env();

    if files.is_empty() {
        return repl(&root);
    }

    for filename in files {
        let result = interpreter::call(
            &root,
            Value::Builtin(Builtin::Load),
            vec![Value::String(filename)],
        );
        if matches!(result, Value::Error(_)) {
            println!("{result}");
        }
    }

    Ok(())
}

fn repl(env: &EnvRef) -> anyhow::Result<()> {
    println!("Rusp Version {VERSION}");
    println!("Press Ctrl+C to Exit, or type 'exit 1'\n");

    let stdin = io::stdin();
    loop {
        print!("rusp> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            return Ok(());
        }

        run_line(env, &line);
    }
}

/// Evaluate one line of input, printing every top-level result. Lex and
/// parse failures are reported and the prompt continues.
fn run_line(env: &EnvRef, line: &str) {
    let tokens = match Token::lex(line) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{error}");
            return;
        }
    };

    let mut state = ParseState::new(tokens);
    match parser::parse(&mut state) {
        Ok(nodes) => {
            for value in reader::read_program(nodes) {
                println!("{}", interpreter::eval(env, value));
            }
        }
        Err(error) => eprintln!("{error}"),
    }
}
