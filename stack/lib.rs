//! Native stack growth for recursion over arbitrarily nested data
//!
//! The parser, the reader, the printer and the evaluator all recurse once per level of nesting.
//! Each of them wraps its recursive step in [`ensure_sufficient_stack`].

#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

/// Minimum stack space to keep available before recursing
///
/// This must also cover code we don't control that recurses over the same data. The garbage
/// collector's mark phase walks nested values depth first from inside whatever allocation
/// triggered it.
const RED_ZONE: usize = 4 * 1024 * 1024;

/// Stack space to allocate each time the stack is grown
const STACK_PER_RECURSION: usize = 16 * 1024 * 1024;

/// Runs `f` after growing the native stack if less than the red zone remains
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
