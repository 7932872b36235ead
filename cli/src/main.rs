use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use reckon::{Engine, error_message};
use tracing::debug;

mod command;

use command::Command;

/// Reckon - an arithmetic expression evaluator
#[derive(Parser, Debug)]
#[command(name = "reckon")]
#[command(about = "Evaluate arithmetic expressions", long_about = None)]
struct Args {
    /// Expression to evaluate (if not provided, starts an interactive session)
    expression: Option<String>,
}

const HELP: &str = "\
Enter an expression to evaluate it.

  expr           evaluate an expression, e.g. 2 + 3 * 4
  name = expr    evaluate and store the result in a variable
  name?  or  ?name   show a variable's value
  ?              list all variables
  help           show this help
  quit           leave (also: exit, done)

Operators: + - * / \\ (modulo) ^ (power), postfix % (percent).
Built-in functions include sin, cos, sqrt, ln, log, min, max, avg and more.";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut engine = Engine::with_default_env();

    if let Some(expression) = args.expression {
        return match engine.evaluate(&expression) {
            Ok(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error {}: {}", err.code(), error_message(err.code()));
                ExitCode::FAILURE
            }
        };
    }

    repl(&mut engine);
    ExitCode::SUCCESS
}

fn repl(engine: &mut Engine) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            return;
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        if line.trim().is_empty() {
            continue;
        }

        match command::classify(&line) {
            Command::Quit => return,
            Command::Help => println!("{HELP}"),
            Command::List => {
                let mut bindings = Vec::new();
                engine.for_each_variable(|name, value| bindings.push((name.to_string(), value)));
                bindings.sort_by(|a, b| a.0.cmp(&b.0));
                if bindings.is_empty() {
                    println!("no variables defined");
                }
                for (name, value) in bindings {
                    println!("{name} = {value}");
                }
            }
            Command::Show(name) => match engine.get_variable(name) {
                Ok(value) => println!("{name} = {value}"),
                Err(err) => println!("{err}"),
            },
            Command::Assign { name, expr } => match engine.evaluate(expr) {
                Ok(value) => {
                    debug!(name, value, "assign");
                    match engine.set_variable(name, value) {
                        Ok(()) => println!("{name} = {value}"),
                        Err(err) => println!("{err}"),
                    }
                }
                Err(err) => println!("error {}: {}", err.code(), error_message(err.code())),
            },
            Command::Eval(expr) => match engine.evaluate(expr) {
                Ok(value) => println!("{value}"),
                Err(err) => println!("error {}: {}", err.code(), error_message(err.code())),
            },
        }
    }
}
