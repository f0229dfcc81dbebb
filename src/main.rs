use clap::{Parser, Subcommand};
use sloop::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "sloop")]
#[command(about = "Sloop - a tiny rule language for validating text input")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a rule and evaluate it against an input
    Check {
        /// The rule expression, e.g. '>=100/2 & <100'
        rule: String,

        /// Input text (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,

        /// Only validate rule syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream a rule compiles to
    Tokens {
        /// The rule expression
        rule: String,

        /// Print the tokens as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            rule,
            input,
            json,
            syntax_only,
        } => run_check(rule, input, json, syntax_only),
        Commands::Tokens { rule, json } => match cli::token_listing(&rule, json) {
            Ok(listing) => {
                print!("{}", listing);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    rule: String,
    input: Option<String>,
    json: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            // the pipe's trailing newline is not part of the input
            if buffer.ends_with('\n') {
                buffer.pop();
                if buffer.ends_with('\r') {
                    buffer.pop();
                }
            }
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        rule,
        input,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Verdict(matched) => {
            if json {
                println!("{}", serde_json::json!({ "matched": matched }));
            } else if matched {
                println!("input matches rule");
            } else {
                println!("input does not match rule");
            }
            if !matched {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
