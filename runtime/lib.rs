#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

pub mod binding;
pub mod env;
pub mod error;
pub mod task;
pub mod value;
