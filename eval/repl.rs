use std::io::Write;

use tracing::debug;

use marl_syntax::datum::Datum;
use marl_syntax::parser::{data_from_str, datum_from_str};

use marl_runtime::env::Env;
use marl_runtime::task::Task;
use marl_runtime::value::{Closure, NativeFun, Text, Value};

use marl_runtime_syntax::reader::value_from_datum;
use marl_runtime_syntax::writer::pr_str;
use marl_stack::ensure_sufficient_stack;

use gc::Gc;

use crate::error::Error;
use crate::eval::{apply, eval};

#[derive(Debug, PartialEq)]
pub enum EvaledLine {
    /// Line contained only whitespace and comments
    EmptyInput,

    /// Line was evaluated to a value with the given readable representation
    Expr(String),
}

/// Builds `(fn* (a) (if a false true))` closed over `env`
fn not_closure(env: &Env) -> Value {
    let body = Value::list(vec![
        Value::Sym("if".into()),
        Value::Sym("a".into()),
        Value::False,
        Value::True,
    ]);

    Value::Closure(Gc::new(Closure::new(vec!["a".into()], body, env.clone())))
}

/// Root environment shared by every line entered in to a session
pub struct ReplCtx {
    root_env: Env,
}

impl ReplCtx {
    pub fn new() -> ReplCtx {
        let root_env = Env::new(None);

        for (name, fun_ptr) in marl_stdlib::exports() {
            root_env.set(
                (*name).into(),
                Value::NativeFun(NativeFun::new(*name, *fun_ptr)),
            );
        }

        root_env.set("not".into(), not_closure(&root_env));

        debug!(
            builtin_count = marl_stdlib::exports().len(),
            "registered builtins"
        );

        ReplCtx { root_env }
    }

    pub fn root_env(&self) -> &Env {
        &self.root_env
    }

    /// Returns every name bound in the root environment
    ///
    /// This is useful for tab completion.
    pub fn bound_names(&self) -> Vec<Text> {
        let mut names = self.root_env.bound_names();
        names.sort();
        names
    }

    fn eval_datum(&mut self, out: &mut dyn Write, datum: &Datum) -> Result<Value, Error> {
        let mut task = Task::with_apply_fun(out, apply);

        eval(&mut task, &value_from_datum(datum), &self.root_env).map_err(|error| {
            Error::Runtime {
                error,
                span: datum.span(),
            }
        })
    }

    /// Reads and evaluates the first form in `input`
    ///
    /// Anything following the first form is ignored.
    pub fn eval_line(&mut self, out: &mut dyn Write, input: &str) -> Result<EvaledLine, Error> {
        debug!(input_len = input.len(), "evaluating line");

        // Parsing, evaluating, printing and dropping the datum all recurse with nesting depth
        ensure_sufficient_stack(|| -> Result<EvaledLine, Error> {
            let datum = match datum_from_str(input)? {
                Some(datum) => datum,
                None => {
                    return Ok(EvaledLine::EmptyInput);
                }
            };

            let value = self.eval_datum(out, &datum)?;
            Ok(EvaledLine::Expr(pr_str(&value, true)))
        })
    }

    /// Evaluates every form in `source` in order
    ///
    /// Returns the value of the last form or `None` if `source` contains no forms. Evaluation stops
    /// at the first error.
    pub fn eval_source(
        &mut self,
        out: &mut dyn Write,
        source: &str,
    ) -> Result<Option<Value>, Error> {
        ensure_sufficient_stack(|| -> Result<Option<Value>, Error> {
            let data = data_from_str(source)?;
            debug!(form_count = data.len(), "evaluating source");

            let mut last_value = None;
            for datum in data.iter() {
                last_value = Some(self.eval_datum(out, datum)?);
            }

            Ok(last_value)
        })
    }
}

impl Default for ReplCtx {
    fn default() -> ReplCtx {
        ReplCtx::new()
    }
}
