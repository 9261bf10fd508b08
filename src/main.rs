// minicc: front end of a small compiler for a C subset.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as CliParser;

use minicc::diag;
use minicc::parser::{Lexer, Parser, TokenKind};

/// Parse a C source file and dump its syntax tree.
#[derive(CliParser, Debug)]
#[command(name = "minicc", version, about, long_about = None)]
struct Args {
    /// C source file to parse
    source: PathBuf,

    /// Dump the token stream instead of the syntax tree
    #[arg(long)]
    tokens: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filename = args.source.display().to_string();
    let file = File::open(&args.source)
        .with_context(|| format!("cannot open '{}'", filename))?;

    let mut lexer = Lexer::new(file, &filename);

    if args.tokens {
        loop {
            let token = lexer.peek();
            println!("{}", token);
            if token.kind == TokenKind::Eof {
                break;
            }
            lexer.advance();
        }
    } else {
        println!("{}", filename);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        print!("{}", program.tree_string());
    }

    if diag::count() > 0 {
        eprintln!("{} error(s)", diag::count());
    }

    // Diagnostics do not currently affect the exit status.
    Ok(())
}
