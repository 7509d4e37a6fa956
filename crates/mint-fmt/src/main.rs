use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::debug;
use owo_colors::OwoColorize;

use mint_fmt::format_source;

#[derive(ClapParser, Debug)]
#[command(name = "mint-fmt", version, about = "Print Mint source in canonical form")]
struct Args {
    /// Exit with status 1 if the file is not already formatted
    #[arg(long, conflicts_with = "write")]
    check: bool,

    /// Rewrite the file in place
    #[arg(long)]
    write: bool,

    /// Source file to format
    path: PathBuf,
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

fn run(args: &Args) -> Result<bool> {
    let name = args.path.display().to_string();
    let src = fs::read_to_string(&args.path).with_context(|| format!("Failed to read {}", name))?;
    let formatted = match format_source(&src, &name) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e.render(&name, &src).red());
            return Ok(false);
        }
    };

    if args.check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", name);
            return Ok(false);
        }
        println!("{}: ok", name);
    } else if args.write {
        debug!("rewriting {}", name);
        fs::write(&args.path, formatted).with_context(|| format!("Failed to write {}", name))?;
    } else {
        print!("{}", formatted);
    }
    Ok(true)
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), format!("{:#}", e).red());
            process::exit(1);
        }
    }
}
