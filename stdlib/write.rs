use marl_runtime::error::{Error, ErrorKind, Result};
use marl_runtime::task::Task;
use marl_runtime::value::Value;

use marl_runtime_syntax::writer::pr_str;

fn join_printed(args: &[Value], readable: bool, separator: &str) -> String {
    args.iter()
        .map(|arg| pr_str(arg, readable))
        .collect::<Vec<String>>()
        .join(separator)
}

fn write_line(task: &mut Task<'_>, line: &str) -> Result<Value> {
    writeln!(task.stdout(), "{}", line).map_err(|err| {
        Error::new(ErrorKind::Io {
            path: "<stdout>".to_owned(),
            message: err.to_string(),
        })
    })?;

    Ok(Value::Nil)
}

pub fn stdlib_pr_str(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    Ok(Value::Str(join_printed(args, true, " ").into()))
}

pub fn stdlib_str(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    Ok(Value::Str(join_printed(args, false, "").into()))
}

pub fn stdlib_prn(task: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    write_line(task, &join_printed(args, true, " "))
}

pub fn stdlib_println(task: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    write_line(task, &join_printed(args, false, " "))
}
