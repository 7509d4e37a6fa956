mod dump;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser as ClapParser;
use log::info;
use owo_colors::OwoColorize;
use serde::Serialize;

use mint_interpreter::Interpreter;
use mint_lexer::Lexer;
use mint_parser::Parser;
use mint_syntax::ast::SymbolTable;
use mint_syntax::error::Error;

use crate::dump::DumpDir;

#[derive(ClapParser, Debug)]
#[command(name = "mint", version, about = "Run a Mint program")]
struct Cli {
    /// Path to the Mint source file
    path: PathBuf,
}

fn dump<T: Serialize>(dumps: Option<&DumpDir>, name: &str, value: &T) -> Result<()> {
    match dumps {
        Some(dir) => dir.write(name, value),
        None => Ok(()),
    }
}

/// Lex, parse, check and run `src`, writing program output to stdout.
fn run_pipeline(file: &str, src: &str, dumps: Option<&DumpDir>) -> Result<()> {
    let tokens = Lexer::new(src, file).tokenize()?;
    dump(dumps, dump::TOKENS, &tokens)?;

    let program = Parser::new(tokens).parse_program()?;
    dump(dumps, dump::ASTS, &program.statements)?;

    let symbols = mint_semantic::check(&program.statements, &SymbolTable::new())?;
    dump(dumps, dump::SEMANTIC, &symbols)?;

    let stdout = io::stdout();
    let scope = Interpreter::new(stdout.lock()).run(&program.statements)?;
    dump(dumps, dump::INTERPRETER, &scope)?;

    info!("{}: finished with {} variables", file, scope.values.len());
    Ok(())
}

fn report(err: &anyhow::Error, file: &str, src: &str) {
    match err.downcast_ref::<Error>() {
        Some(e) => eprintln!("{}", e.render(file, src).red()),
        None => eprintln!("{}: {}", "error".red().bold(), format!("{:#}", err).red()),
    }
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            _ => {
                e.print().ok();
                process::exit(1);
            }
        },
    };

    let file = cli.path.display().to_string();
    let src = match fs::read_to_string(&cli.path).with_context(|| format!("Failed to read {}", file)) {
        Ok(s) => s,
        Err(e) => {
            report(&e, &file, "");
            process::exit(1);
        }
    };

    let outcome = DumpDir::from_env().and_then(|dumps| run_pipeline(&file, &src, dumps.as_ref()));
    if let Err(e) = outcome {
        report(&e, &file, &src);
        process::exit(1);
    }
}
