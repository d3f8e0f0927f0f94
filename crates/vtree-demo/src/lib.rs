#![forbid(unsafe_code)]

//! `vtree-demo`: build or load a tree, drive a widget against an in-memory
//! host, and print the committed HTML or a JSON summary.

pub mod cli;
pub mod summary;
pub mod synth;

pub use cli::{Cli, run, run_from_env};
