//! Output module
//!
//! Turns command results into the text printed on stdout.

mod writer;

pub use writer::{render, render_table, CommandOutput, OutputFormat, DONE};
