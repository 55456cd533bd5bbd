//! Context threaded through every native function call

use std::io::Write;

use crate::error::{ErrorKind, Result};
use crate::value::Value;

/// Applies a function value to arguments
pub type ApplyFun = fn(&mut Task<'_>, &Value, &[Value]) -> Result<Value>;

/// Applies native functions only
///
/// Calling closures requires an evaluator; see [`Task::with_apply_fun`].
pub fn apply_native_fun(task: &mut Task<'_>, fun: &Value, args: &[Value]) -> Result<Value> {
    match fun {
        Value::NativeFun(native_fun) => native_fun.call(task, args),
        other => Err(ErrorKind::NotCallable(other.description()).into()),
    }
}

/// Single threaded task of execution
///
/// A task owns the output sink used by printing functions and the strategy for applying
/// function values passed to higher order natives such as `swap!`.
pub struct Task<'out> {
    stdout: &'out mut dyn Write,
    apply_fun: ApplyFun,
}

impl<'out> Task<'out> {
    pub fn new(stdout: &'out mut dyn Write) -> Task<'out> {
        Self::with_apply_fun(stdout, apply_native_fun)
    }

    pub fn with_apply_fun(stdout: &'out mut dyn Write, apply_fun: ApplyFun) -> Task<'out> {
        Task { stdout, apply_fun }
    }

    /// Returns the sink for program output
    pub fn stdout(&mut self) -> &mut (dyn Write + 'out) {
        &mut *self.stdout
    }

    /// Applies `fun` to `args`
    pub fn apply(&mut self, fun: &Value, args: &[Value]) -> Result<Value> {
        (self.apply_fun)(self, fun, args)
    }
}
