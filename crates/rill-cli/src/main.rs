//! The `rill` front-end: a REPL when invoked with no arguments, a file
//! runner when given one positional path. Grounded on
//! `original_source/src/shell/main.cpp`'s `argc == 1` dispatch, with
//! `clap` replacing raw `argv` inspection the way `faxt`'s `main.rs`
//! wires its own CLI surface.

mod driver;
mod error;
mod repl;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rill_interp::Interpreter;
use rill_lex::Lexer;
use rill_util::ErrorList;

use driver::run_statements;
use error::CliError;
use terminal::Terminal;

/// `sysexits.h`'s `EX_SOFTWARE`, stood in for the reference
/// implementation's uncaught-exception `-1` (not a portable value for
/// `std::process::exit`/`ExitCode` across platforms).
const EX_SOFTWARE: u8 = 70;
const EX_NOINPUT: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "rill")]
#[command(author, version, about = "A tree-walking interpreter for the rill scripting language")]
struct Cli {
    /// Script to run. Omit to start the interactive REPL.
    file: Option<PathBuf>,

    /// Enable debug-level tracing
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let term = Rc::new(Terminal::new());

    let outcome = match &cli.file {
        Some(path) => run_file(path, term),
        None => repl::run(term).map(|()| false),
    };

    match outcome {
        Ok(true) => ExitCode::from(EX_SOFTWARE),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<CliError>().is_some() => {
            eprintln!("{e}");
            ExitCode::from(EX_NOINPUT)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EX_SOFTWARE)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false))
        .try_init();
}

/// Runs a whole file as one program with `quit_on_error = true`.
/// Returns `Ok(true)` if a runtime error occurred (the caller's cue to
/// exit nonzero).
fn run_file(path: &PathBuf, term: Rc<Terminal>) -> anyhow::Result<bool> {
    let contents = std::fs::read_to_string(path).map_err(|_| CliError::FileNotOpenable(path.clone()))?;

    let mut errors = ErrorList::new();
    let tokens = Lexer::new(&contents).scan(&mut errors);
    if !errors.is_empty() {
        term.print_errors(errors.iter());
        return Ok(true);
    }

    let statements = rill_par::parse(&tokens, &mut errors);
    if !errors.is_empty() {
        term.print_errors(errors.iter());
        return Ok(true);
    }

    let mut interp = Interpreter::new();
    Ok(run_statements(&mut interp, term, statements, true))
}
