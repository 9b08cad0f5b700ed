//! Detection of `NAME=value` lines.
//!
//! An assignment line is handled before any tokenizing. The value is stored literally:
//! a `$` inside it is not expanded.

use crate::vars::{VariableError, VariableTable, is_valid_name};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignmentError {
    /// `NAME=value command...`: an assignment prefix followed by more words.
    #[error("unexpected text after assignment: '{0}'")]
    TrailingCommand(String),
    #[error("invalid variable name: '{0}'")]
    InvalidName(String),
    #[error(transparent)]
    Storage(#[from] VariableError),
}

/// Outcome of [`detect_assignment`].
#[derive(Debug)]
pub enum Assignment {
    /// The line was an assignment and the variable has been set.
    Assigned { name: String },
    /// The line looked like an assignment but cannot be applied.
    Invalid(AssignmentError),
    /// The line is a command and should go through normal parsing.
    NotAssignment,
}

/// Recognize a pure `NAME=value` line and apply it to `vars`.
///
/// A line whose text before the first `=` contains whitespace is a command (for example
/// `echo a=b`). Whitespace after the `=` means a command follows the assignment, which
/// is rejected as a whole.
pub fn detect_assignment(line: &str, vars: &mut VariableTable) -> Assignment {
    let Some((name, value)) = line.split_once('=') else {
        return Assignment::NotAssignment;
    };
    if name.chars().any(char::is_whitespace) {
        return Assignment::NotAssignment;
    }
    if let Some(pos) = value.find(char::is_whitespace) {
        let rest = value[pos..].trim_start();
        return Assignment::Invalid(AssignmentError::TrailingCommand(rest.to_owned()));
    }
    if !is_valid_name(name) {
        return Assignment::Invalid(AssignmentError::InvalidName(name.to_owned()));
    }

    match vars.set(name, value) {
        Ok(()) => Assignment::Assigned {
            name: name.to_owned(),
        },
        Err(e) => Assignment::Invalid(e.into()),
    }
}
