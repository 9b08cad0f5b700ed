use crate::assignment::{Assignment, detect_assignment};
use crate::builtin::FAREWELL;
use crate::command::{CommandFactory, ExitCode, Streams};
use crate::config::ShellConfig;
use crate::env::Environment;
use crate::expand::substitute_variables;
use crate::lexer::split_into_tokens;
use crate::parser::construct_command;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A line-oriented interpreter that runs built-in and external commands.
///
/// The interpreter owns the session [`Environment`] (shell variables and the exit flag)
/// and a list of [`CommandFactory`] objects that are queried, in order, to create a
/// command by name.
///
/// Example
/// ```
/// use micro_shell::{Interpreter, ShellConfig};
/// let mut sh = Interpreter::with_config(ShellConfig::default()).unwrap();
/// assert_eq!(sh.execute_line("GREETING=hello").unwrap(), 0);
/// assert_eq!(sh.execute_line("true").unwrap(), 0);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
    config: ShellConfig,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    ///
    /// Fails when the session's variable table cannot be allocated.
    pub fn new(
        config: ShellConfig,
        commands: Vec<Box<dyn CommandFactory>>,
    ) -> anyhow::Result<Self> {
        let env = Environment::new().context("cannot initialize variable table")?;
        Ok(Self {
            env,
            commands,
            config,
        })
    }

    /// Create an interpreter with the default set of commands:
    /// - built-ins: `exit`, `pwd`, `cd`, `export` and, unless disabled, `echo`
    /// - external command launcher
    pub fn with_config(config: ShellConfig) -> anyhow::Result<Self> {
        use crate::builtin::*;
        use crate::external::ExternalCommand;

        let mut commands: Vec<Box<dyn CommandFactory>> = vec![
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Export>::default()),
        ];
        if config.builtin_echo {
            commands.push(Box::new(Factory::<Echo>::default()));
        }
        commands.push(Box::new(Factory::<ExternalCommand>::default()));
        Self::new(config, commands)
    }

    /// True once the `exit` built-in has run.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code or an error if the command cannot be created
    /// or fails to execute.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        streams: Streams,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(streams, &mut self.env);
            }
        }
        Err(anyhow::anyhow!("{}: command not found", name))
    }

    /// Process one input line using the interpreter's own standard streams.
    pub fn execute_line(&mut self, line: &str) -> anyhow::Result<ExitCode> {
        self.execute_line_with(line, Streams::inherited())
    }

    /// Process one input line: assignment, or parse, substitute and run.
    ///
    /// `streams` are the defaults for the command; redirects on the line replace them.
    /// Empty lines do nothing and succeed. Parse errors, unopenable redirect targets and
    /// unknown commands are returned as errors; the session can carry on with the next
    /// line.
    pub fn execute_line_with(
        &mut self,
        line: &str,
        streams: Streams,
    ) -> anyhow::Result<ExitCode> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(0);
        }

        match detect_assignment(line, &mut self.env.vars) {
            Assignment::Assigned { name } => {
                log::debug!("assigned {}", name);
                return Ok(0);
            }
            Assignment::Invalid(e) => {
                return Err(anyhow::Error::new(e).context("invalid command"));
            }
            Assignment::NotAssignment => {}
        }

        let command = construct_command(split_into_tokens(line)).context("syntax error")?;
        if command.is_empty() {
            return Ok(0);
        }
        log::debug!("parsed {:?}", command);

        let arguments = substitute_variables(command.arguments, &self.env);
        let streams = command.redirects.apply(streams)?;

        let (name, rest) = match arguments.split_first() {
            Some(split) => split,
            None => return Ok(0),
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.run(name, &args, streams)
    }

    /// Read-Eval-Print Loop over the terminal.
    ///
    /// Ends on end of input or after `exit`. The variable table is torn down before
    /// returning in both cases.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let result = self.read_eval_loop();
        self.env.vars.teardown();
        result
    }

    fn read_eval_loop(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.env.should_exit {
            match rl.readline(&self.config.prompt) {
                Ok(line) => {
                    if self.config.history && !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if let Err(err) = self.execute_line(&line) {
                        log::debug!("line {:?} failed: {:?}", line, err);
                        eprintln!("{:#}", err);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    println!("{}", FAREWELL);
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}
