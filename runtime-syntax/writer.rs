use std::io::{Result, Write};

use gc::{Gc, GcCell};

use marl_runtime::value::Value;
use marl_stack::ensure_sufficient_stack;

macro_rules! process_escaped_chars {
    ($w:ident, $source:ident, $( $pattern:pat => $escape:expr ),*) => {
        // Try to write sequential unescaped characters in chunks
        // This is especially important if $w isn't buffered
        let mut last_escape_end = 0;
        for (index, c) in $source.char_indices() {
            match c {
                $(
                    $pattern => {
                        $w.write_all(&$source.as_bytes()[last_escape_end..index])?;
                        last_escape_end = index + c.len_utf8();
                        ($escape)?;
                    }
                ),* ,
                _ => {}
            };
        }

        $w.write_all(&$source.as_bytes()[last_escape_end..])?;
    }
}

fn write_escaped_str(w: &mut dyn Write, source: &str) -> Result<()> {
    process_escaped_chars!(w, source,
        '\n' => write!(w, "\\n"),
        '\\' => write!(w, "\\\\"),
        '"' => write!(w, "\\\"")
    );

    Ok(())
}

/// Atoms currently being written by an enclosing call
///
/// An atom can hold a value containing itself. Writing it again would never terminate.
type OpenAtoms = Vec<Gc<GcCell<Value>>>;

fn write_seq<'a>(
    w: &mut dyn Write,
    elems: impl Iterator<Item = &'a Value>,
    readable: bool,
    open_atoms: &mut OpenAtoms,
) -> Result<()> {
    let mut has_prev = false;
    for elem in elems {
        if has_prev {
            write!(w, " ")?;
        } else {
            has_prev = true;
        }

        write_nested_value(w, elem, readable, open_atoms)?;
    }

    Ok(())
}

fn write_atom(
    w: &mut dyn Write,
    cell: &Gc<GcCell<Value>>,
    readable: bool,
    open_atoms: &mut OpenAtoms,
) -> Result<()> {
    if open_atoms.iter().any(|open_atom| Gc::ptr_eq(open_atom, cell)) {
        return write!(w, "(atom ...)");
    }

    write!(w, "(atom ")?;

    open_atoms.push(cell.clone());
    let result = write_nested_value(w, &cell.borrow(), readable, open_atoms);
    open_atoms.pop();

    result?;
    write!(w, ")")
}

fn write_nested_value(
    w: &mut dyn Write,
    value: &Value,
    readable: bool,
    open_atoms: &mut OpenAtoms,
) -> Result<()> {
    ensure_sufficient_stack(|| -> Result<()> {
        match value {
            Value::Nil => write!(w, "nil"),
            Value::True => write!(w, "true"),
            Value::False => write!(w, "false"),
            Value::Int(i) => write!(w, "{}", i),
            Value::Str(s) if readable => {
                write!(w, "\"")?;
                write_escaped_str(w, s)?;
                write!(w, "\"")
            }
            Value::Str(s) => w.write_all(s.as_bytes()),
            Value::Keyword(name) => write!(w, ":{}", name),
            Value::Sym(name) => write!(w, "{}", name),
            Value::List(elems) => {
                write!(w, "(")?;
                write_seq(w, elems.iter(), readable, open_atoms)?;
                write!(w, ")")
            }
            Value::Vector(elems) => {
                write!(w, "[")?;
                write_seq(w, elems.iter(), readable, open_atoms)?;
                write!(w, "]")
            }
            Value::Map(map) => {
                write!(w, "{{")?;

                let mut has_prev = false;
                for (key, value) in map.iter() {
                    if has_prev {
                        write!(w, " ")?;
                    } else {
                        has_prev = true;
                    }

                    write_nested_value(w, &key.to_value(), readable, open_atoms)?;
                    write!(w, " ")?;
                    write_nested_value(w, value, readable, open_atoms)?;
                }

                write!(w, "}}")
            }
            Value::NativeFun(_) | Value::Closure(_) => write!(w, "#<function>"),
            Value::Atom(cell) => write_atom(w, cell, readable, open_atoms),
        }
    })
}

/// Writes a representation of the passed value to the writer
///
/// In readable mode strings are quoted and escaped so the output can be read back. Otherwise
/// strings are written raw. An atom reached again from inside its own contents is written as
/// `(atom ...)`.
pub fn write_value(w: &mut dyn Write, value: &Value, readable: bool) -> Result<()> {
    write_nested_value(w, value, readable, &mut vec![])
}

/// Returns a string representation of the passed value
pub fn pr_str(value: &Value, readable: bool) -> String {
    let mut output_buf: Vec<u8> = vec![];
    write_value(&mut output_buf, value, readable).unwrap();
    String::from_utf8(output_buf).unwrap()
}
