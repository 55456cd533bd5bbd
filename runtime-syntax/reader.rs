use marl_syntax::datum::Datum;
use marl_syntax::error::Result;
use marl_syntax::parser::{data_from_str, datum_from_str};

use marl_runtime::value::Value;
use marl_stack::ensure_sufficient_stack;

fn values_from_data(data: &[Datum]) -> Vec<Value> {
    data.iter().map(value_from_datum).collect()
}

/// Converts a syntax datum to a runtime value
///
/// Map entries keyed by anything other than a string or keyword are dropped.
pub fn value_from_datum(datum: &Datum) -> Value {
    ensure_sufficient_stack(|| match datum {
        Datum::Nil(_) => Value::Nil,
        Datum::Bool(_, value) => Value::from_bool(*value),
        Datum::Int(_, val) => Value::Int(*val),
        Datum::Str(_, val) => Value::Str(val.as_ref().into()),
        Datum::Keyword(_, val) => Value::Keyword(val.as_ref().into()),
        Datum::Sym(_, val) => Value::Sym(val.as_ref().into()),
        Datum::List(_, vs) => Value::list(values_from_data(vs)),
        Datum::Vector(_, vs) => Value::vector(values_from_data(vs)),
        Datum::Map(_, vs) => Value::map(
            vs.iter()
                .map(|(key, value)| (value_from_datum(key), value_from_datum(value))),
        ),
    })
}

/// Reads the first form in `s`
///
/// Returns `Ok(None)` if `s` contains only whitespace and comments.
pub fn read_str(s: &str) -> Result<Option<Value>> {
    ensure_sufficient_stack(|| -> Result<Option<Value>> {
        Ok(datum_from_str(s)?.as_ref().map(value_from_datum))
    })
}

/// Reads every form in `s`
pub fn read_all_str(s: &str) -> Result<Vec<Value>> {
    ensure_sufficient_stack(|| -> Result<Vec<Value>> { Ok(values_from_data(&data_from_str(s)?)) })
}
