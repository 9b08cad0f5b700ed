/// Prompt printed before each line when none is configured.
pub const DEFAULT_PROMPT: &str = "Micro Shell Prompt > ";

/// Session settings, normally built from the command line in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Text printed before reading each line.
    pub prompt: String,
    /// Run `echo` in-process. When false, `echo` is looked up on PATH like any program.
    pub builtin_echo: bool,
    /// Record entered lines in the line editor's history.
    pub history: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            builtin_echo: true,
            history: true,
        }
    }
}
