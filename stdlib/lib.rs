#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

#[macro_use]
extern crate marl_runtime;

pub mod atom;
use crate::atom::*;
pub mod equality;
use crate::equality::*;
pub mod list;
use crate::list::*;
pub mod math;
use crate::math::*;
pub mod read;
use crate::read::*;
pub mod write;
use crate::write::*;

use marl_runtime::binding::NativeExports;

define_native_module!(MARL_STDLIB_EXPORTS, {
    "+" => stdlib_add,
    "-" => stdlib_sub,
    "*" => stdlib_mul,
    "/" => stdlib_div,
    "<" => stdlib_lt,
    "<=" => stdlib_le,
    ">" => stdlib_gt,
    ">=" => stdlib_ge,
    "=" => stdlib_equals,
    "list" => stdlib_list,
    "vector" => stdlib_vector,
    "list?" => stdlib_is_list,
    "empty?" => stdlib_is_empty,
    "count" => stdlib_count,
    "pr-str" => stdlib_pr_str,
    "str" => stdlib_str,
    "prn" => stdlib_prn,
    "println" => stdlib_println,
    "read-string" => stdlib_read_string,
    "slurp" => stdlib_slurp,
    "atom" => stdlib_atom,
    "atom?" => stdlib_is_atom,
    "deref" => stdlib_deref,
    "reset!" => stdlib_reset,
    "swap!" => stdlib_swap
});

/// Returns every native function exported by the standard library
pub fn exports() -> NativeExports {
    MARL_STDLIB_EXPORTS
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn export_names_unique() {
        let names = exports()
            .iter()
            .map(|(name, _)| *name)
            .collect::<HashSet<&str>>();

        assert_eq!(exports().len(), names.len());
        assert!(names.contains("swap!"));
    }
}
