//! A small line-oriented command interpreter.
//!
//! Each input line is either a variable assignment (`NAME=value`) or a command. Commands
//! are split on spaces, may redirect their standard streams with `<`, `>` and `2>`, and
//! have the first `$name` of every argument replaced by the variable's value. A command
//! then runs as a built-in (`exit`, `pwd`, `cd`, `export`, `echo`) or as an external
//! program found on `PATH`.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`], [`env`] and
//! [`vars`] expose the traits and types needed to add commands or inspect the session.

mod assignment;
mod builtin;
pub mod command;
mod config;
pub mod env;
mod expand;
mod external;
mod interpreter;
#[cfg(test)]
mod io_adapters;
mod lexer;
mod parser;
mod redirect;
pub mod vars;

pub use config::{DEFAULT_PROMPT, ShellConfig};
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
