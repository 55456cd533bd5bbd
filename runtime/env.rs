//! Lexical environments

use std::collections::HashMap;
use std::fmt;

use gc::{Finalize, Gc, GcCell, Trace};

use crate::error::{Error, ErrorKind, Result, WantedArity};
use crate::value::{Text, Value};

/// Parameter name collecting any remaining arguments as a list
pub const VARIADIC_MARKER: &str = "&";

#[derive(Trace)]
struct Scope {
    data: GcCell<HashMap<Text, Value>>,
    outer: Option<Env>,
}

#[cfg(not(test))]
impl Finalize for Scope {}

#[cfg(test)]
impl Finalize for Scope {
    fn finalize(&self) {
        test::FINALIZED_SCOPES.with(|count| count.set(count.get() + 1));
    }
}

/// Handle to a single lexical scope and its chain of outer scopes
///
/// Cloning an `Env` returns another handle to the same scope.
#[derive(Clone, Trace, Finalize)]
pub struct Env(Gc<Scope>);

impl Env {
    pub fn new(outer: Option<&Env>) -> Env {
        Env(Gc::new(Scope {
            data: GcCell::new(HashMap::new()),
            outer: outer.cloned(),
        }))
    }

    /// Creates a child scope of `outer` binding `params` to `args`
    ///
    /// A parameter named `&` binds all remaining arguments as a list to the parameter following
    /// it.
    pub fn bind(outer: &Env, params: &[Text], args: &[Value]) -> Result<Env> {
        let env = Env::new(Some(outer));

        let variadic_index = params.iter().position(|p| p.as_str() == VARIADIC_MARKER);
        let fixed_params = &params[..variadic_index.unwrap_or_else(|| params.len())];

        let rest_param = match variadic_index {
            Some(index) => Some(
                params
                    .get(index + 1)
                    .ok_or_else(|| Error::new(ErrorKind::MissingVariadicName))?,
            ),
            None => None,
        };

        let arity_ok = if rest_param.is_some() {
            args.len() >= fixed_params.len()
        } else {
            args.len() == fixed_params.len()
        };

        if !arity_ok {
            let wanted = if rest_param.is_some() {
                WantedArity::AtLeast(fixed_params.len())
            } else {
                WantedArity::Exact(fixed_params.len())
            };

            return Err(Error::new(ErrorKind::WrongArgumentCount {
                callee: "function".into(),
                wanted,
                got: args.len(),
            }));
        }

        for (param, arg) in fixed_params.iter().zip(args.iter()) {
            env.set(param.clone(), arg.clone());
        }

        if let Some(rest_param) = rest_param {
            let rest_args = args[fixed_params.len()..].to_vec();
            env.set(rest_param.clone(), Value::list(rest_args));
        }

        Ok(env)
    }

    /// Binds `name` in this scope, replacing any existing binding in this scope
    pub fn set(&self, name: Text, value: Value) {
        self.0.data.borrow_mut().insert(name, value);
    }

    /// Returns the innermost scope binding `name`
    pub fn find(&self, name: &str) -> Option<Env> {
        let mut current = self;

        loop {
            if current.0.data.borrow().contains_key(name) {
                return Some(current.clone());
            }

            current = current.0.outer.as_ref()?;
        }
    }

    /// Looks up the value bound to `name` in this scope or any outer scope
    pub fn get(&self, name: &str) -> Result<Value> {
        self.find(name)
            .and_then(|env| {
                let data = env.0.data.borrow();
                data.get(name).cloned()
            })
            .ok_or_else(|| Error::new(ErrorKind::SymbolNotFound(name.into())))
    }

    /// Returns the names bound directly in this scope
    pub fn bound_names(&self) -> Vec<Text> {
        self.0.data.borrow().keys().cloned().collect()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Env({:p})", &*self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::cell::Cell;

    use crate::value::Closure;

    thread_local! {
        pub static FINALIZED_SCOPES: Cell<usize> = Cell::new(0);
    }

    fn finalized_scopes() -> usize {
        FINALIZED_SCOPES.with(Cell::get)
    }

    fn params(names: &[&str]) -> Vec<Text> {
        names.iter().map(|name| Text::from(*name)).collect()
    }

    #[test]
    fn set_and_get() {
        let env = Env::new(None);
        env.set("x".into(), Value::Int(1));

        assert_eq!(Value::Int(1), env.get("x").unwrap());

        env.set("x".into(), Value::Int(2));
        assert_eq!(Value::Int(2), env.get("x").unwrap());
    }

    #[test]
    fn missing_symbol() {
        let env = Env::new(None);
        let err = env.get("missing").unwrap_err();

        assert_eq!(&ErrorKind::SymbolNotFound("missing".into()), err.kind());
        assert!(env.find("missing").is_none());
    }

    #[test]
    fn shadowing() {
        let outer = Env::new(None);
        outer.set("x".into(), Value::Int(1));
        outer.set("y".into(), Value::Int(10));

        let inner = Env::new(Some(&outer));
        inner.set("x".into(), Value::Int(2));

        assert_eq!(Value::Int(2), inner.get("x").unwrap());
        assert_eq!(Value::Int(10), inner.get("y").unwrap());
        assert_eq!(Value::Int(1), outer.get("x").unwrap());

        assert!(inner.find("y").unwrap().bound_names().contains(&"y".into()));
        assert!(!inner.bound_names().contains(&"y".into()));
    }

    #[test]
    fn fixed_binding() {
        let root = Env::new(None);
        let env = Env::bind(&root, &params(&["a", "b"]), &[Value::Int(1), Value::Int(2)]).unwrap();

        assert_eq!(Value::Int(1), env.get("a").unwrap());
        assert_eq!(Value::Int(2), env.get("b").unwrap());

        let err = Env::bind(&root, &params(&["a", "b"]), &[Value::Int(1)]).unwrap_err();
        assert_eq!(
            &ErrorKind::WrongArgumentCount {
                callee: "function".into(),
                wanted: WantedArity::Exact(2),
                got: 1
            },
            err.kind()
        );

        assert!(Env::bind(&root, &params(&["a"]), &[Value::Int(1), Value::Int(2)]).is_err());
    }

    #[test]
    fn variadic_binding() {
        let root = Env::new(None);
        let variadic = params(&["a", "&", "b"]);

        let env = Env::bind(
            &root,
            &variadic,
            &[Value::Int(1), Value::Int(2), Value::Int(3)],
        )
        .unwrap();
        assert_eq!(Value::Int(1), env.get("a").unwrap());
        assert_eq!(
            Value::list(vec![Value::Int(2), Value::Int(3)]),
            env.get("b").unwrap()
        );

        let env = Env::bind(&root, &variadic, &[Value::Int(1)]).unwrap();
        assert_eq!(Value::Int(1), env.get("a").unwrap());
        assert_eq!(Value::list(vec![]), env.get("b").unwrap());

        let err = Env::bind(&root, &variadic, &[]).unwrap_err();
        assert_eq!(
            &ErrorKind::WrongArgumentCount {
                callee: "function".into(),
                wanted: WantedArity::AtLeast(1),
                got: 0
            },
            err.kind()
        );
    }

    #[test]
    fn missing_variadic_name() {
        let root = Env::new(None);
        let err = Env::bind(&root, &params(&["a", "&"]), &[Value::Int(1)]).unwrap_err();

        assert_eq!(&ErrorKind::MissingVariadicName, err.kind());
    }

    #[test]
    fn closure_cycles_collected() {
        gc::force_collect();
        let finalized_before = finalized_scopes();

        {
            let root = Env::new(None);
            let env = Env::new(Some(&root));

            // The closure captures the scope it's bound in
            let closure = Closure::new(params(&["x"]), Value::Sym("x".into()), env.clone());
            env.set("self".into(), Value::Closure(Gc::new(closure)));

            gc::force_collect();
            assert_eq!(finalized_before, finalized_scopes());
        }

        gc::force_collect();
        assert_eq!(finalized_before + 2, finalized_scopes());
    }
}
