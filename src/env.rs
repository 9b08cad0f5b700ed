use crate::vars::{VariableError, VariableTable};

/// Mutable, session-level state shared by every command the interpreter runs.
///
/// The environment contains:
/// - `vars`: the shell's own variables, assigned with `NAME=value`.
/// - `should_exit`: a flag that the REPL loop checks after every line.
///
/// Variable lookups see only `vars`. The process environment inherited by the shell is
/// consulted directly where a command needs it (`HOME` for `cd`, `PATH` for lookup).
#[derive(Debug, Clone)]
pub struct Environment {
    /// Shell-local variables. Only `export` copies them into the process environment.
    pub vars: VariableTable,
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Create the state for a new session with an empty variable table.
    pub fn new() -> Result<Self, VariableError> {
        Ok(Self {
            vars: VariableTable::new()?,
            should_exit: false,
        })
    }

    /// Get the value of a shell variable.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).map(str::to_owned)
    }

    /// Set or override a shell variable.
    pub fn set_var(&mut self, key: &str, val: &str) -> Result<(), VariableError> {
        self.vars.set(key, val)
    }
}
