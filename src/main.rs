// tinyfront: TINY language scanner and parser

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use tinyfront::parser::lexer::Lexer;
use tinyfront::parser::reader::LineReader;
use tinyfront::parser::ast::Program;
use tinyfront::parser::{ParseError, Parser};
use tinyfront::tree::print_tree;
use tinyfront::ui::App;

#[derive(clap::Parser, Debug)]
#[clap(name = "tinyfront", about = "Parse a TINY program and print its syntax tree.")]
struct Cli {
    /// Path to the TINY source file
    input: PathBuf,

    /// Write the tree to this file instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print the token stream and exit
    #[clap(long)]
    tokens: bool,

    /// Browse the tree in an interactive terminal UI
    #[clap(long, conflicts_with_all = ["output", "tokens"])]
    tui: bool,
}

fn main() -> anyhow::Result<()> {
    initialize_logging();

    let cli = Cli::parse();

    if cli.tokens {
        return dump_tokens(&cli);
    }

    debug!(input = %cli.input.display(), "Parsing");
    let (result, source) = load_input(&cli.input, cli.tui)?;
    let program = match result {
        Ok(program) => program,
        Err(e) => {
            // Nothing is printed for a failed parse
            eprintln!("{}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };
    info!(statements = program.statements.len(), "Parsed successfully");

    if let Some(source) = source {
        return run_tui(&program, source);
    }

    let text = format!("Parse Tree :\n{}", print_tree(&program));
    match &cli.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("cannot write '{}'", path.display()))?;
            info!(output = %path.display(), "Tree written");
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// Parse the file at `path`. The file is streamed line by line unless
/// `keep_source` is set, in which case it is read once and the same text is
/// returned alongside the result.
fn load_input(
    path: &Path,
    keep_source: bool,
) -> anyhow::Result<(Result<Program, ParseError>, Option<String>)> {
    if keep_source {
        let source = fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        let result = Parser::new(&source).and_then(|mut p| p.parse_program());
        return Ok((result, Some(source)));
    }

    let file = fs::File::open(path).with_context(|| format!("cannot open '{}'", path.display()))?;
    let reader = LineReader::new(io::BufReader::new(file));
    Ok((Parser::from_reader(reader).and_then(|mut p| p.parse_program()), None))
}

fn dump_tokens(cli: &Cli) -> anyhow::Result<()> {
    let file = fs::File::open(&cli.input)
        .with_context(|| format!("cannot open '{}'", cli.input.display()))?;
    let mut lexer = Lexer::from_reader(LineReader::new(io::BufReader::new(file)));

    for token in lexer.tokenize()? {
        println!(
            "{:>4}:{:<4} {:<10} {}",
            token.location.line,
            token.location.column,
            token.kind.name(),
            token.lexeme
        );
    }
    Ok(())
}

fn run_tui(program: &Program, source: String) -> anyhow::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(program, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

fn initialize_logging() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_default();
    let filter = EnvFilter::from_str(&env_filter).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_demo(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tinyfront-{}-{}", std::process::id(), name));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_kept_source_is_the_parsed_text() {
        let path = write_demo("kept.tiny", "read x;\nwrite x * 2\n");
        let (result, source) = load_input(&path, true).unwrap();
        fs::remove_file(&path).unwrap();

        let source = source.unwrap();
        assert_eq!(source, "read x;\nwrite x * 2\n");
        assert_eq!(result.unwrap(), tinyfront::parser::parse(&source).unwrap());
    }

    #[test]
    fn test_streamed_input_keeps_no_source() {
        let path = write_demo("streamed.tiny", "write 1");
        let (result, source) = load_input(&path, false).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(source.is_none());
        assert_eq!(result.unwrap().statements.len(), 1);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let path = std::env::temp_dir().join("tinyfront-missing-input.tiny");
        let err = load_input(&path, true).unwrap_err();
        assert!(err.to_string().starts_with("cannot read"));
    }
}
