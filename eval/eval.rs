//! Tree-walking evaluator with tail call elimination

use gc::Gc;
use tracing::trace;

use marl_runtime::binding::{check_arity, expect_seq, expect_sym};
use marl_runtime::env::Env;
use marl_runtime::error::{ErrorKind, Result};
use marl_runtime::task::Task;
use marl_runtime::value::{Closure, Map, Text, Value};
use marl_stack::ensure_sufficient_stack;

use crate::special_form::SpecialForm;

/// Evaluates a form that isn't in tail position
fn eval_nested(task: &mut Task<'_>, value: &Value, env: &Env) -> Result<Value> {
    ensure_sufficient_stack(|| eval(task, value, env))
}

fn eval_elems(task: &mut Task<'_>, elems: &[Value], env: &Env) -> Result<Vec<Value>> {
    elems
        .iter()
        .map(|elem| eval_nested(task, elem, env))
        .collect()
}

/// Evaluates a form without treating lists as applications
///
/// Symbols are looked up in `env`. Lists and vectors have each element evaluated and maps have each
/// value evaluated. Everything else evaluates to itself.
pub fn eval_ast(task: &mut Task<'_>, value: &Value, env: &Env) -> Result<Value> {
    match value {
        Value::Sym(name) => env.get(name),
        Value::List(elems) => Ok(Value::list(eval_elems(task, elems, env)?)),
        Value::Vector(elems) => Ok(Value::vector(eval_elems(task, elems, env)?)),
        Value::Map(map) => {
            let mut evaled_map = Map::new();
            for (key, value) in map.iter() {
                evaled_map.insert(key.clone(), eval_nested(task, value, env)?);
            }

            Ok(Value::Map(Gc::new(evaled_map)))
        }
        other => Ok(other.clone()),
    }
}

fn closure_params(params: &Value) -> Result<Vec<Text>> {
    expect_seq(SpecialForm::Fn.name(), params)?
        .iter()
        .map(|param| expect_sym(SpecialForm::Fn.name(), param).map(Text::clone))
        .collect()
}

/// Evaluates `value` in `env`
///
/// Forms in tail position are evaluated by looping instead of recursing. A chain of tail calls of
/// any length runs in constant native stack.
pub fn eval(task: &mut Task<'_>, value: &Value, env: &Env) -> Result<Value> {
    let mut value = value.clone();
    let mut env = env.clone();

    loop {
        let elems = match &value {
            Value::List(elems) => elems.clone(),
            other => return eval_ast(task, other, &env),
        };

        let (head, args) = match elems.split_first() {
            Some(split) => split,
            None => return Ok(value),
        };

        if let Some(special_form) = head.as_sym().and_then(|name| SpecialForm::from_name(name)) {
            check_arity(special_form.name(), special_form.wanted_arity(), args)?;

            match special_form {
                SpecialForm::Def => {
                    let name = expect_sym(special_form.name(), &args[0])?;
                    let def_value = eval_nested(task, &args[1], &env)?;

                    env.set(name.clone(), def_value.clone());
                    return Ok(def_value);
                }
                SpecialForm::Let => {
                    let bindings = expect_seq(special_form.name(), &args[0])?;
                    let let_env = Env::new(Some(&env));

                    for binding in bindings.chunks(2) {
                        let name = expect_sym(special_form.name(), &binding[0])?;
                        let init = binding
                            .get(1)
                            .ok_or_else(|| ErrorKind::MissingBindingValue(name.clone()))?;

                        let init_value = eval_nested(task, init, &let_env)?;
                        let_env.set(name.clone(), init_value);
                    }

                    env = let_env;
                    value = args[1].clone();
                }
                SpecialForm::Do => {
                    let last_index = args.len() - 1;
                    for arg in &args[..last_index] {
                        eval_nested(task, arg, &env)?;
                    }

                    value = args[last_index].clone();
                }
                SpecialForm::If => {
                    let test_value = eval_nested(task, &args[0], &env)?;

                    value = if test_value.is_truthy() {
                        args[1].clone()
                    } else {
                        match args.get(2) {
                            Some(false_expr) => false_expr.clone(),
                            None => return Ok(Value::Nil),
                        }
                    };
                }
                SpecialForm::Fn => {
                    let params = closure_params(&args[0])?;
                    let closure = Closure::new(params, args[1].clone(), env.clone());

                    return Ok(Value::Closure(Gc::new(closure)));
                }
            }

            continue;
        }

        let fun_value = eval_nested(task, head, &env)?;
        let arg_values = eval_elems(task, args, &env)?;

        match &fun_value {
            Value::Closure(closure) => {
                trace!(param_count = closure.params().len(), "tail calling closure");

                env = Env::bind(closure.env(), closure.params(), &arg_values)?;
                value = closure.body().clone();
            }
            Value::NativeFun(native_fun) => {
                return native_fun.call(task, &arg_values);
            }
            other => {
                return Err(ErrorKind::NotCallable(other.description()).into());
            }
        }
    }
}

/// Applies a function value to already evaluated arguments
///
/// Closures are run to completion. This is the [`Task`] apply strategy which lets natives such as
/// `swap!` call closures.
pub fn apply(task: &mut Task<'_>, fun: &Value, args: &[Value]) -> Result<Value> {
    match fun {
        Value::Closure(closure) => {
            let closure_env = Env::bind(closure.env(), closure.params(), args)?;
            ensure_sufficient_stack(|| eval(task, closure.body(), &closure_env))
        }
        Value::NativeFun(native_fun) => native_fun.call(task, args),
        other => Err(ErrorKind::NotCallable(other.description()).into()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use marl_runtime::error::{Error, WantedArity};
    use marl_runtime::value::NativeFun;
    use marl_runtime_syntax::reader::read_str;
    use marl_runtime_syntax::writer::pr_str;

    fn root_env() -> Env {
        let env = Env::new(None);
        for (name, fun_ptr) in marl_stdlib::exports() {
            env.set((*name).into(), Value::NativeFun(NativeFun::new(*name, *fun_ptr)));
        }
        env
    }

    fn eval_in(env: &Env, input: &str) -> Result<Value> {
        let mut output = Vec::new();
        let mut task = Task::with_apply_fun(&mut output, apply);

        let value = read_str(input).unwrap().unwrap();
        eval(&mut task, &value, env)
    }

    fn assert_evals(expected: &str, input: &str) {
        let env = root_env();
        let value = eval_in(&env, input).unwrap();
        assert_eq!(expected, pr_str(&value, true));
    }

    fn eval_err(input: &str) -> Error {
        eval_in(&root_env(), input).unwrap_err()
    }

    #[test]
    fn self_evaluating() {
        assert_evals("1", "1");
        assert_evals("\"abc\"", "\"abc\"");
        assert_evals(":kw", ":kw");
        assert_evals("nil", "nil");
        assert_evals("()", "()");
    }

    #[test]
    fn collections() {
        assert_evals("[3 7]", "[(+ 1 2) (+ 3 4)]");
        assert_evals("{:a 3}", "{:a (+ 1 2)}");
    }

    #[test]
    fn application() {
        assert_evals("3", "(+ 1 2)");
        assert_evals("11", "(+ (* 2 3) (- 7 2))");
    }

    #[test]
    fn def() {
        let env = root_env();

        assert_eq!(Value::Int(3), eval_in(&env, "(def! x 3)").unwrap());
        assert_eq!(Value::Int(3), eval_in(&env, "x").unwrap());

        let err = eval_in(&env, "(def! \"x\" 3)").unwrap_err();
        assert_eq!(
            &ErrorKind::WrongArgumentType {
                callee: "def!".into(),
                expected: "symbol",
                found: "string",
            },
            err.kind()
        );
    }

    #[test]
    fn let_star() {
        assert_evals("6", "(let* (c 2 d (+ c 1)) (* c d))");
        assert_evals("3", "(let* [a 1 b (+ a 1)] (+ a b))");

        let env = root_env();
        eval_in(&env, "(def! a 10)").unwrap();
        eval_in(&env, "(let* (a 1) a)").unwrap();
        assert_eq!(Value::Int(10), eval_in(&env, "a").unwrap());

        assert_eq!(
            &ErrorKind::MissingBindingValue("b".into()),
            eval_err("(let* (a 1 b) a)").kind()
        );
    }

    #[test]
    fn do_form() {
        assert_evals("3", "(do 1 2 3)");

        assert_eq!(
            &ErrorKind::WrongArgumentCount {
                callee: "do".into(),
                wanted: WantedArity::AtLeast(1),
                got: 0,
            },
            eval_err("(do)").kind()
        );
    }

    #[test]
    fn if_form() {
        assert_evals("1", "(if true 1 2)");
        assert_evals("2", "(if false 1 2)");
        assert_evals("2", "(if nil 1 2)");
        assert_evals("1", "(if 0 1 2)");
        assert_evals("1", "(if () 1 2)");
        assert_evals("nil", "(if false 1)");

        assert!(eval_err("(if)").to_string().contains("`if`"));
    }

    #[test]
    fn closures() {
        assert_evals("5", "((fn* (a b) (+ a b)) 2 3)");
        assert_evals("(2 3)", "((fn* [a & rest] rest) 1 2 3)");
        assert_evals("#<function>", "(fn* () 1)");

        let env = root_env();
        eval_in(&env, "(def! adder (fn* (n) (fn* (x) (+ x n))))").unwrap();
        eval_in(&env, "(def! add5 (adder 5))").unwrap();
        assert_eq!(Value::Int(12), eval_in(&env, "(add5 7)").unwrap());

        assert_eq!(
            &ErrorKind::WrongArgumentType {
                callee: "fn*".into(),
                expected: "symbol",
                found: "integer",
            },
            eval_err("(fn* (1) 1)").kind()
        );
    }

    #[test]
    fn special_forms_not_shadowed() {
        let env = root_env();
        eval_in(&env, "(def! if 1)").unwrap();
        assert_eq!(Value::Int(2), eval_in(&env, "(if false 1 2)").unwrap());
    }

    #[test]
    fn not_callable() {
        assert_eq!(&ErrorKind::NotCallable("integer"), eval_err("(1 2)").kind());
        assert_eq!(
            &ErrorKind::SymbolNotFound("nope".into()),
            eval_err("(nope 2)").kind()
        );
    }

    #[test]
    fn tail_calls() {
        let env = root_env();
        eval_in(
            &env,
            "(def! sum-to (fn* (n acc) (if (= n 0) acc (sum-to (- n 1) (+ n acc)))))",
        )
        .unwrap();

        assert_eq!(
            Value::Int(50_005_000),
            eval_in(&env, "(sum-to 10000 0)").unwrap()
        );
    }

    #[test]
    fn deep_non_tail_recursion() {
        let env = root_env();
        eval_in(
            &env,
            "(def! count-down (fn* (n) (if (= n 0) 0 (+ 1 (count-down (- n 1))))))",
        )
        .unwrap();

        assert_eq!(
            Value::Int(20_000),
            eval_in(&env, "(count-down 20000)").unwrap()
        );
    }

    #[test]
    fn apply_closure() {
        let mut output = Vec::new();
        let mut task = Task::with_apply_fun(&mut output, apply);

        let env = root_env();
        let fun = eval(&mut task, &read_str("(fn* (x) (* x x))").unwrap().unwrap(), &env).unwrap();

        assert_eq!(Value::Int(16), apply(&mut task, &fun, &[Value::Int(4)]).unwrap());
        assert!(apply(&mut task, &Value::Nil, &[]).is_err());
    }
}
