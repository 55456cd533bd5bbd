use marl_runtime::binding::*;
use marl_runtime::error::{Result, WantedArity};
use marl_runtime::task::Task;
use marl_runtime::value::Value;

pub fn stdlib_atom(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("atom", WantedArity::Exact(1), args)?;
    Ok(Value::atom(args[0].clone()))
}

pub fn stdlib_is_atom(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("atom?", WantedArity::Exact(1), args)?;
    Ok(Value::from_bool(matches!(args[0], Value::Atom(_))))
}

pub fn stdlib_deref(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("deref", WantedArity::Exact(1), args)?;

    let cell = expect_atom("deref", &args[0])?;
    let value = cell.borrow().clone();
    Ok(value)
}

pub fn stdlib_reset(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("reset!", WantedArity::Exact(2), args)?;

    let cell = expect_atom("reset!", &args[0])?;
    *cell.borrow_mut() = args[1].clone();
    Ok(args[1].clone())
}

/// Replaces an atom's value with the result of applying a function to it
///
/// The function receives the current value followed by any extra arguments. The atom isn't
/// borrowed while the function runs so the function can read it.
pub fn stdlib_swap(task: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("swap!", WantedArity::AtLeast(2), args)?;

    let cell = expect_atom("swap!", &args[0])?;
    let fun = &args[1];

    let mut fun_args = Vec::with_capacity(args.len() - 1);
    fun_args.push(cell.borrow().clone());
    fun_args.extend_from_slice(&args[2..]);

    let new_value = task.apply(fun, &fun_args)?;
    *cell.borrow_mut() = new_value.clone();

    Ok(new_value)
}
