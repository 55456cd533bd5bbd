//! Runtime values
//!
//! Every value the evaluator can produce is a [`Value`]. Values other than [`Value::Atom`] are
//! immutable once constructed; collections share their contents when cloned.

use std::borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use gc::{unsafe_empty_trace, Finalize, Gc, GcCell, Trace};

use marl_stack::ensure_sufficient_stack;

use crate::env::Env;
use crate::error::Result;
use crate::task::Task;

/// Immutable shared text used for strings, keywords and symbols
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text(Rc<str>);

impl Finalize for Text {}
unsafe impl Trace for Text {
    unsafe_empty_trace!();
}

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl borrow::Borrow<str> for Text {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Text {
        Text(s.into())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Text {
        Text(s.into())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prefix character distinguishing keyword map keys from string map keys
///
/// This is never shown to users.
const KEYWORD_KEY_PREFIX: char = '\u{29e}';

/// Encoded map key
///
/// Only strings and keywords can be map keys. Keywords are stored behind a private prefix so
/// `:a` and `"a"` are distinct keys.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Trace, Finalize)]
pub struct MapKey(Text);

impl MapKey {
    /// Encodes a value as a map key
    ///
    /// Returns `None` if the value isn't a string or keyword.
    pub fn from_value(value: &Value) -> Option<MapKey> {
        match value {
            Value::Str(text) => Some(MapKey(text.clone())),
            Value::Keyword(name) => Some(MapKey(format!("{}{}", KEYWORD_KEY_PREFIX, name).into())),
            _ => None,
        }
    }

    /// Decodes this key back in to a string or keyword value
    pub fn to_value(&self) -> Value {
        match self.0.strip_prefix(KEYWORD_KEY_PREFIX) {
            Some(name) => Value::Keyword(name.into()),
            None => Value::Str(self.0.clone()),
        }
    }
}

pub type NativeFunPtr = fn(&mut Task<'_>, &[Value]) -> Result<Value>;

/// Function implemented by the host
#[derive(Clone, Copy)]
pub struct NativeFun {
    name: &'static str,
    fun_ptr: NativeFunPtr,
}

impl Finalize for NativeFun {}
unsafe impl Trace for NativeFun {
    unsafe_empty_trace!();
}

impl NativeFun {
    pub fn new(name: &'static str, fun_ptr: NativeFunPtr) -> NativeFun {
        NativeFun { name, fun_ptr }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, task: &mut Task<'_>, args: &[Value]) -> Result<Value> {
        (self.fun_ptr)(task, args)
    }
}

impl fmt::Debug for NativeFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFun({})", self.name)
    }
}

/// User defined function capturing its defining environment
#[derive(Trace, Finalize)]
pub struct Closure {
    params: Vec<Text>,
    body: Value,
    env: Env,
}

impl Closure {
    pub fn new(params: Vec<Text>, body: Value, env: Env) -> Closure {
        Closure { params, body, env }
    }

    pub fn params(&self) -> &[Text] {
        &self.params
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({:?})", self.params)
    }
}

pub type Map = BTreeMap<MapKey, Value>;

#[derive(Clone, Trace, Finalize)]
pub enum Value {
    Nil,
    True,
    False,
    Int(i64),
    Str(Text),
    /// Keyword with its visible name; the leading `:` isn't stored
    Keyword(Text),
    Sym(Text),
    List(Gc<Vec<Value>>),
    Vector(Gc<Vec<Value>>),
    Map(Gc<Map>),
    NativeFun(NativeFun),
    Closure(Gc<Closure>),
    Atom(Gc<GcCell<Value>>),
}

impl Value {
    pub fn from_bool(b: bool) -> Value {
        if b {
            Value::True
        } else {
            Value::False
        }
    }

    pub fn list(elems: Vec<Value>) -> Value {
        Value::List(Gc::new(elems))
    }

    pub fn vector(elems: Vec<Value>) -> Value {
        Value::Vector(Gc::new(elems))
    }

    /// Builds a map from key/value pairs
    ///
    /// Pairs with a key that isn't a string or keyword are silently dropped. Later duplicate keys
    /// replace earlier ones.
    pub fn map<I>(pairs: I) -> Value
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let map = pairs
            .into_iter()
            .filter_map(|(key, value)| MapKey::from_value(&key).map(|key| (key, value)))
            .collect::<Map>();

        Value::Map(Gc::new(map))
    }

    pub fn atom(value: Value) -> Value {
        Value::Atom(Gc::new(GcCell::new(value)))
    }

    /// Returns false for `nil` and `false`; everything else is truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::False)
    }

    /// Returns the elements of a list or vector
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::List(elems) | Value::Vector(elems) => Some(elems.as_slice()),
            _ => None,
        }
    }

    /// Returns the name of a symbol
    pub fn as_sym(&self) -> Option<&Text> {
        match self {
            Value::Sym(name) => Some(name),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::True | Value::False => "boolean",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Keyword(_) => "keyword",
            Value::Sym(_) => "symbol",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::Map(_) => "map",
            Value::NativeFun(_) | Value::Closure(_) => "function",
            Value::Atom(_) => "atom",
        }
    }
}

fn map_eq(left: &Map, right: &Map) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, left_value)| right.get(key) == Some(left_value))
}

/// Structural equality
///
/// Lists and vectors with equal elements are equal regardless of their kind. Functions and atoms
/// are only equal to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil)
            | (Value::True, Value::True)
            | (Value::False, Value::False) => true,
            (Value::Int(left), Value::Int(right)) => left == right,
            (Value::Str(left), Value::Str(right))
            | (Value::Keyword(left), Value::Keyword(right))
            | (Value::Sym(left), Value::Sym(right)) => left == right,
            (Value::List(left), Value::List(right))
            | (Value::List(left), Value::Vector(right))
            | (Value::Vector(left), Value::List(right))
            | (Value::Vector(left), Value::Vector(right)) => {
                ensure_sufficient_stack(|| left.as_slice() == right.as_slice())
            }
            (Value::Map(left), Value::Map(right)) => {
                ensure_sufficient_stack(|| map_eq(left, right))
            }
            (Value::NativeFun(left), Value::NativeFun(right)) => left.name() == right.name(),
            (Value::Closure(left), Value::Closure(right)) => Gc::ptr_eq(left, right),
            (Value::Atom(left), Value::Atom(right)) => Gc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::True => write!(f, "True"),
            Value::False => write!(f, "False"),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Str(text) => write!(f, "Str({:?})", text),
            Value::Keyword(name) => write!(f, "Keyword({:?})", name),
            Value::Sym(name) => write!(f, "Sym({:?})", name),
            Value::List(elems) => f.debug_tuple("List").field(&elems.as_slice()).finish(),
            Value::Vector(elems) => f.debug_tuple("Vector").field(&elems.as_slice()).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(&**map).finish(),
            Value::NativeFun(native_fun) => native_fun.fmt(f),
            Value::Closure(closure) => closure.fmt(f),
            // Atoms can contain themselves so their contents aren't shown
            Value::Atom(cell) => write!(f, "Atom({:p})", &**cell),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|i| Value::Int(*i)).collect()
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::False.is_truthy());

        assert!(Value::True.is_truthy());
        assert!(Value::Int(0).is_truthy());
        assert!(Value::Str("".into()).is_truthy());
        assert!(Value::list(vec![]).is_truthy());
    }

    #[test]
    fn singleton_equality() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_eq!(Value::True, Value::from_bool(true));
        assert_ne!(Value::Nil, Value::False);
        assert_ne!(Value::False, Value::Int(0));
    }

    #[test]
    fn text_equality() {
        assert_eq!(Value::Str("a".into()), Value::Str("a".into()));
        assert_ne!(Value::Str("a".into()), Value::Keyword("a".into()));
        assert_ne!(Value::Sym("a".into()), Value::Str("a".into()));
    }

    #[test]
    fn seq_equality_ignores_kind() {
        let list = Value::list(ints(&[1, 2]));
        let vector = Value::vector(ints(&[1, 2]));

        assert_eq!(list, vector);
        assert_eq!(vector, list);
        assert_ne!(list, Value::list(ints(&[1, 2, 3])));
        assert_ne!(Value::list(vec![]), Value::Nil);

        let nested_list = Value::list(vec![Value::list(ints(&[1])), Value::Int(2)]);
        let nested_vector = Value::vector(vec![Value::vector(ints(&[1])), Value::Int(2)]);
        assert_eq!(nested_list, nested_vector);
    }

    #[test]
    fn map_equality() {
        let left = Value::map(vec![(Value::Keyword("a".into()), Value::Int(1))]);
        let right = Value::map(vec![(Value::Keyword("a".into()), Value::Int(1))]);
        assert_eq!(left, right);

        let string_key = Value::map(vec![(Value::Str("a".into()), Value::Int(1))]);
        assert_ne!(left, string_key);

        let other_value = Value::map(vec![(Value::Keyword("a".into()), Value::Int(2))]);
        assert_ne!(left, other_value);
    }

    #[test]
    fn map_drops_invalid_keys() {
        let map = Value::map(vec![
            (Value::Int(1), Value::Int(2)),
            (Value::Keyword("b".into()), Value::Int(3)),
        ]);

        match &map {
            Value::Map(map) => {
                assert_eq!(1, map.len());
                let (key, value) = map.iter().next().unwrap();

                assert_eq!(Value::Keyword("b".into()), key.to_value());
                assert_eq!(Value::Int(3), *value);
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn map_key_round_trip() {
        for value in &[Value::Str("a".into()), Value::Keyword("a".into())] {
            let key = MapKey::from_value(value).unwrap();
            assert_eq!(*value, key.to_value());
        }

        assert_eq!(None, MapKey::from_value(&Value::Sym("a".into())));
    }

    #[test]
    fn atom_identity() {
        let atom = Value::atom(Value::Int(1));
        let other_atom = Value::atom(Value::Int(1));

        assert_eq!(atom, atom.clone());
        assert_ne!(atom, other_atom);
    }

    #[test]
    fn self_containing_atom_debug() {
        let atom = Value::atom(Value::Nil);
        if let Value::Atom(cell) = &atom {
            *cell.borrow_mut() = Value::list(vec![atom.clone()]);
        }

        let debug_output = format!("{:?}", atom);
        assert!(debug_output.starts_with("Atom(0x"));
        assert_eq!(atom, atom.clone());
    }
}
