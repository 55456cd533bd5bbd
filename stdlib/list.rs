use marl_runtime::binding::*;
use marl_runtime::error::{Result, WantedArity};
use marl_runtime::task::Task;
use marl_runtime::value::Value;

pub fn stdlib_list(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    Ok(Value::list(args.to_vec()))
}

pub fn stdlib_vector(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    Ok(Value::vector(args.to_vec()))
}

pub fn stdlib_is_list(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("list?", WantedArity::Exact(1), args)?;
    Ok(Value::from_bool(matches!(args[0], Value::List(_))))
}

pub fn stdlib_is_empty(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("empty?", WantedArity::Exact(1), args)?;

    let elems = expect_seq("empty?", &args[0])?;
    Ok(Value::from_bool(elems.is_empty()))
}

pub fn stdlib_count(_: &mut Task<'_>, args: &[Value]) -> Result<Value> {
    check_arity("count", WantedArity::Exact(1), args)?;

    let count = match &args[0] {
        Value::Nil => 0,
        other => expect_seq("count", other)?.len(),
    };

    Ok(Value::Int(count as i64))
}

#[cfg(test)]
mod test {
    use super::*;
    use marl_runtime::error::ErrorKind;

    fn call(fun: fn(&mut Task<'_>, &[Value]) -> Result<Value>, args: &[Value]) -> Result<Value> {
        let mut output = Vec::new();
        let mut task = Task::new(&mut output);
        fun(&mut task, args)
    }

    #[test]
    fn construction() {
        let args = [Value::Int(1), Value::Int(2)];

        match &call(stdlib_list, &args).unwrap() {
            Value::List(elems) => assert_eq!(&args[..], elems.as_slice()),
            other => panic!("expected list, got {:?}", other),
        }

        match &call(stdlib_vector, &args).unwrap() {
            Value::Vector(elems) => assert_eq!(&args[..], elems.as_slice()),
            other => panic!("expected vector, got {:?}", other),
        }

        assert_eq!(Value::list(vec![]), call(stdlib_list, &[]).unwrap());
    }

    #[test]
    fn list_predicate() {
        assert_eq!(
            Value::True,
            call(stdlib_is_list, &[Value::list(vec![])]).unwrap()
        );
        assert_eq!(
            Value::False,
            call(stdlib_is_list, &[Value::vector(vec![])]).unwrap()
        );
        assert_eq!(Value::False, call(stdlib_is_list, &[Value::Nil]).unwrap());
        assert!(call(stdlib_is_list, &[]).is_err());
    }

    #[test]
    fn emptiness() {
        assert_eq!(
            Value::True,
            call(stdlib_is_empty, &[Value::vector(vec![])]).unwrap()
        );
        assert_eq!(
            Value::False,
            call(stdlib_is_empty, &[Value::list(vec![Value::Nil])]).unwrap()
        );

        let err = call(stdlib_is_empty, &[Value::Nil]).unwrap_err();
        assert_eq!(
            &ErrorKind::WrongArgumentType {
                callee: "empty?".into(),
                expected: "list or vector",
                found: "nil"
            },
            err.kind()
        );
    }

    #[test]
    fn counting() {
        assert_eq!(Value::Int(0), call(stdlib_count, &[Value::Nil]).unwrap());
        assert_eq!(
            Value::Int(2),
            call(stdlib_count, &[Value::vector(vec![Value::Nil, Value::Nil])]).unwrap()
        );
        assert!(call(stdlib_count, &[Value::Int(1)]).is_err());
    }
}
