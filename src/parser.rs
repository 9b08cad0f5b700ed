use crate::lexer::Token;
use crate::redirect::{RedirectKind, Redirects};
use thiserror::Error;

/// A command line after tokenizing: the argument vector plus its redirect targets.
///
/// `arguments[0]` is the command name. The vector may be empty when the line held only
/// whitespace; such commands are skipped by the interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub arguments: Vec<String>,
    pub redirects: Redirects,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsingError {
    #[error("no {0} file specified")]
    MissingTarget(RedirectKind),
}

struct CommandBuilder {
    tokens: Vec<Token>,
    pos: usize,
}

impl CommandBuilder {
    fn from(tokens: Vec<Token>) -> Self {
        CommandBuilder { tokens, pos: 0 }
    }

    /// Parse a command: (word | redirect)*
    fn build_command(mut self) -> Result<ParsedCommand, ParsingError> {
        let mut command = ParsedCommand::default();

        while let Some(token) = self.consume() {
            match token {
                Token::Word(word) => command.arguments.push(word),
                Token::RedirectLeft => {
                    let target = self.parse_target(RedirectKind::Input)?;
                    command.redirects.set(RedirectKind::Input, target);
                }
                Token::RedirectRight => {
                    let target = self.parse_target(RedirectKind::Output)?;
                    command.redirects.set(RedirectKind::Output, target);
                }
                Token::RedirectError => {
                    let target = self.parse_target(RedirectKind::Error)?;
                    command.redirects.set(RedirectKind::Error, target);
                }
            }
        }

        Ok(command)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// The token after a redirect operator is always its target, even when it looks
    /// like another operator.
    fn parse_target(&mut self, kind: RedirectKind) -> Result<String, ParsingError> {
        match self.consume() {
            Some(Token::Word(word)) => Ok(word),
            Some(Token::RedirectLeft) => Ok("<".to_string()),
            Some(Token::RedirectRight) => Ok(">".to_string()),
            Some(Token::RedirectError) => Ok("2>".to_string()),
            None => Err(ParsingError::MissingTarget(kind)),
        }
    }
}

pub fn construct_command(tokens: Vec<Token>) -> Result<ParsedCommand, ParsingError> {
    let builder = CommandBuilder::from(tokens);
    builder.build_command()
}
