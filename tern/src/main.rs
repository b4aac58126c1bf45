use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tern::Session;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// tern evaluates a small JavaScript-like language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to evaluate. Starts the REPL when omitted.
    file: Option<PathBuf>,

    /// Print the parsed AST of each input to stderr before evaluating it.
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> Result<ExitCode> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(
            fmt::layer().with_writer(std::io::stderr).with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .with_env_var("TERN_LOG")
                    .from_env_lossy(),
            ),
        ),
    )?;

    let args = Args::parse();
    let mut session = Session::new();

    match &args.file {
        Some(path) => run_file(&mut session, path, args.dump_ast),
        None => run_prompt(&mut session, args.dump_ast),
    }
}

/// Parses and evaluates `input`, printing its value. Returns `false` on a parse error.
fn run(session: &mut Session, input: &str, dump_ast: bool) -> bool {
    let program = match session.parse(input) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{} {}", style("parser error:").red().for_stderr(), err);
            return false;
        }
    };
    if dump_ast {
        eprintln!("{}", program);
    }

    if let Some(value) = session.run(&program) {
        println!("{}", value);
    }
    true
}

fn run_file(session: &mut Session, path: &Path, dump_ast: bool) -> Result<ExitCode> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(if run(session, &input, dump_ast) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_prompt(session: &mut Session, dump_ast: bool) -> Result<ExitCode> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str())?;
                run(session, &line, dump_ast);
            }
            Err(ReadlineError::Interrupted) => continue, // clear the line
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(ExitCode::SUCCESS)
}
