//! Redirect targets of a single command and the files they open.

use crate::command::Streams;
use anyhow::{Context, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Permissions of files created by `>` and `2>`: `rw-r--r--`.
pub const CREATE_MODE: u32 = 0o644;

/// Which standard stream a redirect rebinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `<`
    Input,
    /// `>`
    Output,
    /// `2>`
    Error,
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RedirectKind::Input => "input",
            RedirectKind::Output => "output",
            RedirectKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// Optional file targets for standard input, output and error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirects {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub error: Option<PathBuf>,
}

impl Redirects {
    /// Record a target, replacing any earlier target of the same kind.
    pub fn set(&mut self, kind: RedirectKind, target: impl Into<PathBuf>) {
        let slot = match kind {
            RedirectKind::Input => &mut self.input,
            RedirectKind::Output => &mut self.output,
            RedirectKind::Error => &mut self.error,
        };
        *slot = Some(target.into());
    }

    /// Open every target and substitute it for the matching stream of `streams`.
    ///
    /// The input file must already exist. Output and error files are created when
    /// absent and truncated when present. Nothing is replaced unless every file opens.
    pub fn apply(&self, streams: Streams) -> Result<Streams> {
        let input = self.input.as_deref().map(open_input).transpose()?;
        let output = self.output.as_deref().map(open_output).transpose()?;
        let error = self.error.as_deref().map(open_output).transpose()?;

        let mut streams = streams;
        if let Some(file) = input {
            streams.stdin = Box::new(file);
        }
        if let Some(file) = output {
            streams.stdout = Box::new(file);
        }
        if let Some(file) = error {
            streams.stderr = Box::new(file);
        }
        Ok(streams)
    }
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("cannot open input file {}", path.display()))
}

fn open_output(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(CREATE_MODE)
        .open(path)
        .with_context(|| format!("cannot open output file {}", path.display()))
}
