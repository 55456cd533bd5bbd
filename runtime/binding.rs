//! Macros and helpers for defining native function modules

use gc::{Gc, GcCell};

use crate::error::{Error, ErrorKind, Result, WantedArity};
use crate::value::{NativeFunPtr, Text, Value};

pub type NativeExports = &'static [(&'static str, NativeFunPtr)];

/// Defines a table of native functions
///
/// The first argument is the name of the static to define. The second argument is a mapping of
/// export names to functions taking a `&mut Task` and an argument slice.
#[macro_export]
macro_rules! define_native_module {
    ($exports_sym:ident, { $( $export_name:expr => $fun:path ),* }) => {
        pub static $exports_sym: $crate::binding::NativeExports = &[
            $(
                ($export_name, $fun)
            ),*
        ];
    };
}

/// Fails with `WrongArgumentCount` unless `args` has an acceptable length
pub fn check_arity(callee: &str, wanted: WantedArity, args: &[Value]) -> Result<()> {
    if wanted.accepts(args.len()) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::WrongArgumentCount {
            callee: callee.into(),
            wanted,
            got: args.len(),
        }))
    }
}

pub fn wrong_type(callee: &str, expected: &'static str, found: &Value) -> Error {
    Error::new(ErrorKind::WrongArgumentType {
        callee: callee.into(),
        expected,
        found: found.description(),
    })
}

pub fn expect_int(callee: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Err(wrong_type(callee, "integer", other)),
    }
}

pub fn expect_str<'v>(callee: &str, value: &'v Value) -> Result<&'v Text> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(wrong_type(callee, "string", other)),
    }
}

pub fn expect_sym<'v>(callee: &str, value: &'v Value) -> Result<&'v Text> {
    value
        .as_sym()
        .ok_or_else(|| wrong_type(callee, "symbol", value))
}

pub fn expect_seq<'v>(callee: &str, value: &'v Value) -> Result<&'v [Value]> {
    value
        .as_seq()
        .ok_or_else(|| wrong_type(callee, "list or vector", value))
}

pub fn expect_atom<'v>(callee: &str, value: &'v Value) -> Result<&'v Gc<GcCell<Value>>> {
    match value {
        Value::Atom(cell) => Ok(cell),
        other => Err(wrong_type(callee, "atom", other)),
    }
}
