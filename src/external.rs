use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Streams};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::ExitStatus;

/// Command that is not a builtin.
pub struct ExternalCommand {
    /// Resolved location of the program.
    program: OsString,
    /// Name as typed by the user; becomes `argv[0]` of the child.
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, name: OsString, args: Vec<OsString>) -> Self {
        Self {
            program,
            name,
            args,
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = std::env::var_os("PATH").unwrap_or_default();
        let executable = find_command_path(&search_paths, Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            executable.as_os_str().to_owned(),
            name.into(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawn the program with the given streams and wait for it to finish.
    fn execute(self: Box<Self>, streams: Streams, _env: &mut Environment) -> Result<ExitCode> {
        log::debug!("spawning {:?} with args {:?}", self.program, self.args);
        let mut child = std::process::Command::new(&self.program)
            .arg0(&self.name)
            .args(&self.args)
            .stdin(streams.stdin.stdio())
            .stdout(streams.stdout.stdio())
            .stderr(streams.stderr.stdio())
            .spawn()
            .with_context(|| format!("{}", self.name.to_string_lossy()))?;
        let exit_status = child.wait()?;
        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        };
        log::debug!("{:?} exited with {}", self.name, code);
        Ok(code)
    }
}

fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

/// Locate the program to run for `name`.
///
/// A name containing `/` is taken as a path and only has to exist. A bare name is looked
/// up in the directories of `search_paths`, in order, and must be an executable file.
pub fn find_command_path<'a>(search_paths: &OsStr, name: &'a Path) -> Option<Cow<'a, Path>> {
    if name.as_os_str().is_empty() {
        return None;
    }
    if name.as_os_str().as_encoded_bytes().contains(&b'/') {
        return name.exists().then_some(Cow::Borrowed(name));
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .map(Cow::Owned)
}

fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
