use marl_runtime::binding::*;
use marl_runtime::error::{Result, WantedArity};
use marl_runtime::task::Task;
use marl_runtime::value::Value;

pub fn stdlib_equals(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("=", WantedArity::Exact(2), args)?;
    Ok(Value::from_bool(args[0] == args[1]))
}

#[cfg(test)]
mod test {
    use super::*;

    fn equals(lhs: Value, rhs: Value) -> Value {
        let mut output = Vec::new();
        let mut task = Task::new(&mut output);
        stdlib_equals(&mut task, &[lhs, rhs]).unwrap()
    }

    #[test]
    fn structural() {
        assert_eq!(Value::True, equals(Value::Int(1), Value::Int(1)));
        assert_eq!(Value::False, equals(Value::Int(1), Value::Str("1".into())));

        let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let vector = Value::vector(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(Value::True, equals(list, vector));

        let map = || Value::map(vec![(Value::Keyword("a".into()), Value::Int(1))]);
        assert_eq!(Value::True, equals(map(), map()));
    }
}
