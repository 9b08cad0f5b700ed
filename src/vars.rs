//! Shell-local variables.
//!
//! A [`VariableTable`] lives for the whole session. Entries are looked up by name with a
//! linear scan; the number of variables an interactive session defines is small.

use regex::Regex;
use std::collections::TryReserveError;
use std::sync::LazyLock;
use thiserror::Error;

/// Number of entries the table can hold before its first growth.
pub const INITIAL_CAPACITY: usize = 10;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name pattern"));

/// Errors produced by [`VariableTable`] operations.
#[derive(Debug, Error)]
pub enum VariableError {
    /// Backing storage could not be grown.
    #[error("cannot allocate variable storage: {0}")]
    Alloc(#[from] TryReserveError),
    /// The variable has never been assigned.
    #[error("variable '{0}' not found")]
    NotFound(String),
    /// The name or value cannot be placed into the process environment.
    #[error("variable '{0}' cannot be exported")]
    Unexportable(String),
}

/// A single `name=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    name: String,
    value: String,
}

impl VariableEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered store of shell variables. Holds at most one entry per name.
#[derive(Debug, Clone)]
pub struct VariableTable {
    entries: Vec<VariableEntry>,
}

impl VariableTable {
    /// Create an empty table with room for [`INITIAL_CAPACITY`] entries.
    ///
    /// Fails only when the initial storage cannot be allocated, in which case the
    /// session cannot start.
    pub fn new() -> Result<Self, VariableError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(INITIAL_CAPACITY)?;
        Ok(Self { entries })
    }

    /// Assign `value` to `name`.
    ///
    /// An existing entry is updated in place. A new entry is appended, doubling the
    /// backing storage first when it is full. On allocation failure the table is left
    /// untouched and the error is returned.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), VariableError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.value = value.to_owned();
            return Ok(());
        }

        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity().max(INITIAL_CAPACITY);
            self.entries.try_reserve_exact(additional)?;
        }
        self.entries.push(VariableEntry {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    /// Copy `name=value` into the process environment.
    ///
    /// The entry stays in the table. Later assignments are not re-exported.
    pub fn export(&self, name: &str) -> Result<(), VariableError> {
        let value = self
            .get(name)
            .ok_or_else(|| VariableError::NotFound(name.to_owned()))?;
        if !is_valid_name(name) || value.contains('\0') {
            return Err(VariableError::Unexportable(name.to_owned()));
        }
        // SAFETY: the interpreter runs on a single thread and never reads the
        // environment concurrently with this call.
        unsafe { std::env::set_var(name, value) };
        log::debug!("exported {}={}", name, value);
        Ok(())
    }

    /// Release every entry and the backing storage.
    pub fn teardown(&mut self) {
        log::debug!("releasing {} variables", self.entries.len());
        self.entries.clear();
        self.entries.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableEntry> {
        self.entries.iter()
    }
}

/// True iff `name` starts with a letter or underscore and continues with letters,
/// digits or underscores. The empty string is not a valid name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}
