use marl_runtime::binding::*;
use marl_runtime::error::{Error, ErrorKind, Result, WantedArity};
use marl_runtime::task::Task;
use marl_runtime::value::Value;

fn int_operands(callee: &str, args: &[Value]) -> Result<(i64, i64)> {
    check_arity(callee, WantedArity::Exact(2), args)?;
    Ok((expect_int(callee, &args[0])?, expect_int(callee, &args[1])?))
}

fn checked_int_op(
    callee: &str,
    args: &[Value],
    op: impl FnOnce(i64, i64) -> Option<i64>,
) -> Result<Value> {
    let (lhs, rhs) = int_operands(callee, args)?;

    op(lhs, rhs)
        .map(Value::Int)
        .ok_or_else(|| Error::new(ErrorKind::IntegerOverflow))
}

fn int_comparison(
    callee: &str,
    args: &[Value],
    op: impl FnOnce(&i64, &i64) -> bool,
) -> Result<Value> {
    let (lhs, rhs) = int_operands(callee, args)?;
    Ok(Value::from_bool(op(&lhs, &rhs)))
}

pub fn stdlib_add(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    checked_int_op("+", args, i64::checked_add)
}

pub fn stdlib_sub(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    checked_int_op("-", args, i64::checked_sub)
}

pub fn stdlib_mul(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    checked_int_op("*", args, i64::checked_mul)
}

pub fn stdlib_div(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    let (numerator, denominator) = int_operands("/", args)?;

    if denominator == 0 {
        return Err(Error::new(ErrorKind::DivideByZero));
    }

    numerator
        .checked_div(denominator)
        .map(Value::Int)
        .ok_or_else(|| Error::new(ErrorKind::IntegerOverflow))
}

pub fn stdlib_lt(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    int_comparison("<", args, i64::lt)
}

pub fn stdlib_le(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    int_comparison("<=", args, i64::le)
}

pub fn stdlib_gt(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    int_comparison(">", args, i64::gt)
}

pub fn stdlib_ge(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    int_comparison(">=", args, i64::ge)
}
