//! Command-line interface for procfront.
//!
//! - `procfront lex --input FILE` lists the tokens of a source file and the
//!   number of lexical errors.
//! - `procfront parse --input FILE [--tables FILE]` runs the parser, with the
//!   built-in declaration grammar or with tables loaded from a text file.
//!
//! Logging is configured through `RUST_LOG` (e.g. `RUST_LOG=trace` shows every
//! shift, reduction and the state stack).

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use parsekit::{ParserData, SemanticHook};
use procfront::{
    grammar, tokenize, DeclarationCollector, KeywordTable, Pool, ProcError, ProcParser, ProcToken,
    RuleLog, TokenValue,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a source file
    Lex {
        /// Source file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Parses a source file
    Parse {
        /// Source file
        #[arg(short, long)]
        input: PathBuf,
        /// Parser tables in text form (defaults to the declaration grammar)
        #[arg(short, long)]
        tables: Option<PathBuf>,
    },
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("can't open {:?}", path))
}

fn describe(token: &ProcToken, pool: &Pool) -> Result<String> {
    let value = match token.value {
        TokenValue::None => String::new(),
        TokenValue::Ident(h) => pool.identifier(h)?.to_string(),
        TokenValue::Const(h) => pool.constant(h)?.to_string(),
    };
    let span = token.span.map(|s| s.display()).unwrap_or_default();
    Ok(format!("{:<18} {:<16} {}", token.kind.label(), value, span))
}

fn report_lexical(errors: usize) {
    if errors == 0 {
        println!("no lexical errors");
    } else {
        println!("there are {} lexical errors", errors);
    }
}

fn lex(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let mut pool = Pool::new();
    let stream = tokenize(source, &mut pool).with_context(|| format!("can't tokenize {:?}", path))?;
    for token in stream.iter() {
        println!("{}", describe(token, &pool)?);
    }
    report_lexical(stream.error_count());
    Ok(())
}

fn run<H>(source: Vec<u8>, data: &ParserData, hook: H, pool: &mut Pool) -> Result<H>
where
    H: SemanticHook<ProcToken, Pool>,
    H::Error: Into<ProcError>,
{
    let input = source.into_iter().fuse();
    let mut parser = ProcParser::new(input, KeywordTable::standard(), data, hook);
    let res = parser.parse(pool);
    report_lexical(parser.error_count());
    if let Err(err) = res {
        match err.span() {
            Some(span) => bail!("rejected at {}: {}", span.display(), err),
            None => bail!("rejected: {}", err),
        }
    }
    let stats = parser.parser_stats();
    log::info!(
        "accepted after {} shifts and {} reductions",
        stats.shifts,
        stats.reductions
    );
    Ok(parser.into_hook())
}

fn parse(path: &Path, tables: Option<&Path>) -> Result<()> {
    let source = read_source(path)?;
    let mut pool = Pool::new();
    match tables {
        None => {
            let data = grammar::declarations()?;
            let collector = run(source, &data, DeclarationCollector::new(), &mut pool)?;
            for decl in collector.declarations() {
                println!("{} : {}", pool.identifier(decl.name)?, decl.ty.name(&pool)?);
            }
        }
        Some(tables) => {
            let text = fs::read_to_string(tables)
                .with_context(|| format!("can't open {:?}", tables))?;
            let data = grammar::load_tables(&text)
                .with_context(|| format!("bad parser tables in {:?}", tables))?;
            let log = run(source, &data, RuleLog::new(), &mut pool)?;
            for (prod_id, token) in log.entries() {
                let name = data
                    .prod(*prod_id)
                    .and_then(|p| p.label.as_deref())
                    .unwrap_or("-");
                println!("reduce {} ({}) on {}", prod_id, name, token.kind.label());
            }
        }
    }
    println!("accepted");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Lex { input } => lex(&input),
        Commands::Parse { input, tables } => parse(&input, tables.as_deref()),
    }
}
