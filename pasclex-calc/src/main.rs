//! Command-line interface for pasclex-calc.
//!
//! Reads an expression from the command line, a file or standard input and
//! either lists its tokens, dumps its AST or evaluates it with variables
//! bound by `--var name=value`.

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser as ClapParser, Subcommand};
use pasclex::{Lexer, Source, Spanned};
use pasclex_calc::{Binding, Environment, dump, evaluate, free_variables, parse_source};
use std::io::Read;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug)]
struct Input {
    /// Expression text; read from standard input when neither it nor
    /// `--file` is given
    text: Option<String>,

    /// Read the expression from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl Input {
    fn read(&self) -> Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("can't read {}", path.display())),
            (None, None) => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("can't read standard input")?;
                Ok(text)
            }
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lists the tokens of the input
    Lex {
        #[command(flatten)]
        input: Input,

        /// Include whitespace tokens
        #[arg(short, long)]
        all: bool,
    },
    /// Prints the parsed expression tree
    Dump {
        #[command(flatten)]
        input: Input,
    },
    /// Evaluates the expression
    Eval {
        #[command(flatten)]
        input: Input,

        /// Variable binding, e.g. `--var x=3`; may be repeated
        #[arg(short, long = "var", value_name = "NAME=VALUE")]
        vars: Vec<Binding>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Lex { input, all } => {
            let src = Source::new(&input.read()?);
            let mut lexer = Lexer::new(&src);
            for token in lexer.by_ref() {
                if !all && token.is_whitespace() {
                    continue;
                }
                let span = token.span();
                println!(
                    "{}\t{}\t{:?}",
                    span.start,
                    token.kind_name(),
                    src.span_text(&span).as_str()
                );
            }
            log::info!("{:?}", lexer.stats());
            if !lexer.is_exhausted() {
                let at = lexer.position();
                match src.char_at(at.offset) {
                    Some(c) => bail!("lexing stopped at {} on {:?}", at, c),
                    None => bail!("lexing stopped at {}", at),
                }
            }
        }
        Commands::Dump { input } => {
            let src = Source::new(&input.read()?);
            let expr = parse_source(&src)?;
            println!("{}", dump(&expr));
        }
        Commands::Eval { input, vars } => {
            let src = Source::new(&input.read()?);
            let expr = parse_source(&src)?;
            let env: Environment = vars.into_iter().map(|b| (b.name, b.value)).collect();
            let unbound: Vec<_> = free_variables(&expr)
                .into_iter()
                .filter(|name| !env.contains(name))
                .collect();
            if !unbound.is_empty() {
                log::warn!("unbound variables: {:?}", unbound);
            }
            println!("{}", evaluate(&expr, &env)?);
        }
    }

    Ok(())
}
