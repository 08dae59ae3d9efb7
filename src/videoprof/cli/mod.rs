//! # CLI Behavior
//!
//! This is **one possible UI client** for videoprof. It is the only place that
//! knows about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution
//!
//! With no report flag, `videoprof <SOURCES>` prints the summary. Reports
//! without rows print nothing, not even their trailing blank line.
//!
//! ## Reports
//!
//! - `-s/--summary`: one line per attribute with a count per preference
//! - `-f/--files`: badges of every file
//! - `-d/--directories`: flagged/total counts and badges per directory group
//! - `--flags`: one line per flagged quality
//!
//! Several can be combined; they are printed in the order above.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap, version string
//! - `commands`: logging, config and cache wiring, dispatch
//! - `render`: report formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
