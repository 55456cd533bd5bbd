mod command;
mod history;
mod marl_helper;
mod syntax;

use std::{fs, io, path};

use ansi_term::Colour;

use marl_eval::reporting::emit_error_to_stderr;
use marl_eval::{EvaledLine, ReplCtx};

use crate::DriverConfig;
use command::{parse_command, ParsedCommand};
use history::repl_history_path;
use marl_helper::MarlHelper;

const PROMPT: &str = "user> ";

/// Source name used when reporting errors in interactive input
const REPL_SOURCE_NAME: &str = "repl";

fn eval_include_file(repl_ctx: &mut ReplCtx, include_path: &path::Path) {
    let source = match fs::read_to_string(include_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read `{}`: {}", include_path.display(), err);
            return;
        }
    };

    let stdout = io::stdout();
    if let Err(err) = repl_ctx.eval_source(&mut stdout.lock(), &source) {
        emit_error_to_stderr(&include_path.to_string_lossy(), &source, &err);
    }
}

pub fn interactive_loop(cfg: &DriverConfig) {
    use rustyline::error::ReadlineError;

    // Setup our REPL backend
    let mut repl_ctx = ReplCtx::new();

    if let Some(ref include_path) = cfg.include_path {
        eval_include_file(&mut repl_ctx, include_path);
    }

    // Setup Rustyline
    let mut rl = rustyline::Editor::<MarlHelper>::new();
    rl.set_helper(Some(MarlHelper::new(&repl_ctx.bound_names())));

    let history_path = if cfg.persist_history {
        repl_history_path()
    } else {
        None
    };

    if let Some(ref history_path) = history_path {
        let _ = rl.load_history(history_path);
    }

    let expr_arrow_style = Colour::Green.bold();

    loop {
        let readline = rl.readline(PROMPT);

        match readline {
            Ok(line) => {
                if !line.chars().all(char::is_whitespace) && rl.add_history_entry(line.clone()) {
                    if let Some(ref history_path) = history_path {
                        let _ = rl.save_history(history_path);
                    }
                }

                let input = match parse_command(line) {
                    ParsedCommand::EvalValue(input) => input,
                    ParsedCommand::Quit => {
                        break;
                    }
                    ParsedCommand::Other => {
                        continue;
                    }
                };

                let stdout = io::stdout();
                let result = repl_ctx.eval_line(&mut stdout.lock(), &input);

                match result {
                    Ok(EvaledLine::EmptyInput) => {}
                    Ok(EvaledLine::Expr(value)) => {
                        // Refresh our completions in case this was a definition
                        rl.set_helper(Some(MarlHelper::new(&repl_ctx.bound_names())));

                        println!("{} {}", expr_arrow_style.paint("=>"), value);
                    }
                    Err(err) => {
                        emit_error_to_stderr(REPL_SOURCE_NAME, &input, &err);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(other) => {
                eprintln!("readline error: {}", other);
                break;
            }
        }
    }
}
