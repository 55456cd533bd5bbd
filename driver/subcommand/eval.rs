use std::io::Write;
use std::{fs, io, path};

use tracing::debug;

use marl_eval::reporting::emit_error_to_stderr;
use marl_eval::ReplCtx;

/// Evaluates every form in a source file
///
/// Returns false if the file couldn't be read or evaluation failed. Errors have already been
/// reported to stderr.
pub fn eval_input_file(input_path: &path::Path) -> bool {
    let source = match fs::read_to_string(input_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read `{}`: {}", input_path.display(), err);
            return false;
        }
    };

    debug!(path = %input_path.display(), "evaluating input file");

    let mut repl_ctx = ReplCtx::new();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let result = repl_ctx.eval_source(&mut stdout, &source);
    let _ = stdout.flush();

    match result {
        Ok(_) => true,
        Err(err) => {
            emit_error_to_stderr(&input_path.to_string_lossy(), &source, &err);
            false
        }
    }
}
