use argh::FromArgs;
use micro_shell::{DEFAULT_PROMPT, Interpreter, ShellConfig};

#[derive(FromArgs)]
/// Interactive command interpreter with shell variables and I/O redirection.
struct Args {
    #[argh(option, short = 'p', default = "DEFAULT_PROMPT.to_string()")]
    /// prompt printed before each input line
    prompt: String,

    #[argh(switch)]
    /// run `echo` from PATH instead of the built-in
    external_echo: bool,

    #[argh(switch)]
    /// do not keep a history of entered lines
    no_history: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = ShellConfig {
        prompt: args.prompt,
        builtin_echo: !args.external_echo,
        history: !args.no_history,
    };
    log::debug!("starting with {:?}", config);

    let mut shell = Interpreter::with_config(config)?;
    shell.repl()
}
