//! Evaluator and REPL engine

#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod eval;
pub mod reporting;
pub mod repl;
pub mod special_form;

pub use crate::error::Error;
pub use crate::repl::{EvaledLine, ReplCtx};
