use std::fs;

use marl_runtime::binding::*;
use marl_runtime::error::{Error, ErrorKind, Result, WantedArity};
use marl_runtime::task::Task;
use marl_runtime::value::Value;

use marl_runtime_syntax::reader::read_str;

/// Reads the first form of a string
///
/// A string with no forms reads as `nil`.
pub fn stdlib_read_string(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("read-string", WantedArity::Exact(1), args)?;

    let source = expect_str("read-string", &args[0])?;
    Ok(read_str(source)?.unwrap_or(Value::Nil))
}

pub fn stdlib_slurp(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("slurp", WantedArity::Exact(1), args)?;

    let path = expect_str("slurp", &args[0])?;
    fs::read_to_string(path.as_str())
        .map(|contents| Value::Str(contents.into()))
        .map_err(|err| {
            Error::new(ErrorKind::Io {
                path: path.to_string(),
                message: err.to_string(),
            })
        })
}
