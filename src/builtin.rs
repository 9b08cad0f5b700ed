use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Streams};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Farewell printed when the session ends.
pub const FAREWELL: &str = "Good Bye";

/// Built-in commands known to the shell at compile time.
///
/// Builtins build themselves from their arguments through [`argh::FromArgs`] and run
/// in-process without spawning a child process. The shell's built-ins implement
/// `FromArgs` by hand: words such as `--help` or `-1` are plain arguments to them.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Executes the command using provided IO streams and environment.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    /// An `Err` is printed on the command's standard error and turns into exit code 1.
    fn execute(
        self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, mut streams: Streams, env: &mut Environment) -> Result<ExitCode> {
        let result =
            <T as BuiltinCommand>::execute(*self, &mut streams.stdin, &mut streams.stdout, env);
        streams.stdout.flush()?;
        match result {
            Ok(x) => Ok(x),
            Err(e) => {
                log::debug!("builtin {} failed: {:#}", T::name(), e);
                writeln!(streams.stderr, "{:#}", e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, mut streams: Streams, _env: &mut Environment) -> Result<ExitCode> {
        if self.is_error {
            writeln!(streams.stderr, "{}", self.output)?;
            Ok(1)
        } else {
            writeln!(streams.stdout, "{}", self.output)?;
            Ok(0)
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

/// Print a farewell message and end the shell session.
///
/// Any arguments are ignored: the session always ends.
pub struct Exit;

impl FromArgs for Exit {
    fn from_args(_command_name: &[&str], _args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Exit)
    }
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", FAREWELL)?;
        env.should_exit = true;
        Ok(0)
    }
}

/// Print the current working directory to standard output.
pub struct Pwd;

impl FromArgs for Pwd {
    fn from_args(_command_name: &[&str], _args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Pwd)
    }
}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let cwd = env::current_dir().context("pwd")?;
        writeln!(stdout, "{}", cwd.to_string_lossy())?;
        Ok(0)
    }
}

/// Change the current working directory.
///
/// Without a target, or with `~`, changes to the directory named by the process `HOME`.
/// Shell variables that were never exported do not count. An empty target is passed to
/// the OS as-is and fails there.
pub struct Cd {
    pub target: Option<String>,
}

impl FromArgs for Cd {
    fn from_args(_command_name: &[&str], args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Cd {
            target: first_argument(args),
        })
    }
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        _stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let target = match self.target.as_deref() {
            None | Some("~") => env::var_os("HOME")
                .map(PathBuf::from)
                .ok_or_else(|| anyhow::anyhow!("cd: HOME not set"))?,
            Some(dir) => PathBuf::from(dir),
        };

        env::set_current_dir(&target).with_context(|| format!("cd: {}", target.display()))?;
        log::debug!("changed directory to {}", target.display());
        Ok(0)
    }
}

/// Copy a shell variable into the environment of commands started afterwards.
pub struct Export {
    pub name: Option<String>,
}

impl FromArgs for Export {
    fn from_args(_command_name: &[&str], args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Export {
            name: first_argument(args),
        })
    }
}

impl BuiltinCommand for Export {
    fn name() -> &'static str {
        "export"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let name = self
            .name
            .ok_or_else(|| anyhow::anyhow!("export: missing variable name"))?;
        if let Err(e) = env.vars.export(&name) {
            log::warn!("export of {} failed: {}", name, e);
            return Err(e).context("export");
        }
        Ok(0)
    }
}

/// Built-ins look only at their first argument; the rest are ignored.
fn first_argument(args: &[&str]) -> Option<String> {
    args.first().map(|s| s.to_string())
}

/// Write the arguments to standard output, separated by single spaces and followed by a
/// newline.
///
/// Every argument is printed as-is, including ones that look like options.
pub struct Echo {
    pub args: Vec<String>,
}

impl FromArgs for Echo {
    fn from_args(_command_name: &[&str], args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Echo {
            args: args.iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", self.args.join(" "))?;
        Ok(0)
    }
}
