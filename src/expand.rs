//! `$name` substitution in parsed arguments.

use crate::env::Environment;
use regex::Regex;
use std::sync::LazyLock;

/// A `$` followed by the longest run of letters, digits and underscores. The run may be
/// empty.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z0-9_]*)").expect("valid reference pattern"));

/// Replace the first `$name` of every argument with the value of `name`.
///
/// Only shell variables are seen; unknown names expand to the empty string. A second
/// `$` in the same argument is kept literally. When no argument contains `$` the vector
/// is returned as-is.
pub fn substitute_variables(args: Vec<String>, env: &Environment) -> Vec<String> {
    if !args.iter().any(|arg| arg.contains('$')) {
        return args;
    }

    args.into_iter()
        .map(|arg| substitute_first(&arg, env).unwrap_or(arg))
        .collect()
}

fn substitute_first(arg: &str, env: &Environment) -> Option<String> {
    let caps = REFERENCE_RE.captures(arg)?;
    let whole = caps.get(0)?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    let value = env.get_var(name).unwrap_or_default();

    let prefix = &arg[..whole.start()];
    let suffix = &arg[whole.end()..];
    Some(format!("{}{}{}", prefix, value, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let mut env = Environment::new().unwrap();
        for (k, v) in vars {
            env.set_var(k, v).unwrap();
        }
        env
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_dollar_returns_same_vector() {
        let env = env_with(&[]);
        let args = strings(&["ls", "-l", "/tmp"]);
        let ptr = args.as_ptr();

        let out = substitute_variables(args, &env);

        assert_eq!(out, strings(&["ls", "-l", "/tmp"]));
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn test_whole_argument_reference() {
        let env = env_with(&[("X", "hello")]);
        let out = substitute_variables(strings(&["echo", "$X"]), &env);
        assert_eq!(out, strings(&["echo", "hello"]));
    }

    #[test]
    fn test_prefix_and_suffix_are_kept() {
        let env = env_with(&[("NAME", "world")]);
        let out = substitute_variables(strings(&["pre$NAME-post", "a.$NAME"]), &env);
        assert_eq!(out, strings(&["preworld-post", "a.world"]));
    }

    #[test]
    fn test_name_is_longest_identifier_run() {
        let env = env_with(&[("A", "short"), ("AB", "long")]);
        let out = substitute_variables(strings(&["$AB", "$A.B"]), &env);
        assert_eq!(out, strings(&["long", "short.B"]));
    }

    #[test]
    fn test_undefined_variable_is_empty() {
        let env = env_with(&[]);
        let name = format!("$MICRO_SHELL_UNDEFINED_{}", std::process::id());
        let out = substitute_variables(strings(&["echo", name.as_str()]), &env);
        assert_eq!(out, strings(&["echo", ""]));
    }

    #[test]
    fn test_empty_name_is_empty() {
        let env = env_with(&[]);
        let out = substitute_variables(strings(&["cost$", "$-x", "$"]), &env);
        assert_eq!(out, strings(&["cost", "-x", ""]));
    }

    #[test]
    fn test_only_first_reference_is_expanded() {
        let env = env_with(&[("A", "1"), ("B", "2")]);
        let out = substitute_variables(strings(&["$A$B", "x$A-$B"]), &env);
        assert_eq!(out, strings(&["1$B", "x1-$B"]));
    }

    #[test]
    fn test_value_is_not_expanded_again() {
        let env = env_with(&[("A", "$B"), ("B", "nested")]);
        let out = substitute_variables(strings(&["$A"]), &env);
        assert_eq!(out, strings(&["$B"]));
    }

    #[test]
    fn test_arguments_without_dollar_are_untouched() {
        let env = env_with(&[("X", "v")]);
        let out = substitute_variables(strings(&["cp", "$X", "dest"]), &env);
        assert_eq!(out, strings(&["cp", "v", "dest"]));
    }

    #[test]
    fn test_process_environment_is_not_consulted() {
        let env = env_with(&[]);
        assert!(std::env::var("PATH").is_ok());
        let out = substitute_variables(strings(&["echo", "$PATH"]), &env);
        assert_eq!(out, strings(&["echo", ""]));
    }
}
