//! A module implementing lexical analysis (tokenization) for command lines.
//!
//! Words are separated by the space character only. There is no quoting or escaping,
//! and runs of spaces never produce empty words. Redirection operators are recognized
//! only when they stand alone, so `ls>out` is a single word.

/// Represents a token resulting from lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A plain word: command name, argument or redirect target.
    Word(String),
    /// Input redirection symbol, `<`.
    RedirectLeft,
    /// Output redirection symbol, `>`.
    RedirectRight,
    /// Error redirection symbol, `2>`.
    RedirectError,
}

impl Token {
    fn from_word(word: &str) -> Self {
        match word {
            "<" => Token::RedirectLeft,
            ">" => Token::RedirectRight,
            "2>" => Token::RedirectError,
            w => Token::Word(w.to_owned()),
        }
    }
}

/// The main entry point function to perform lexical analysis.
pub fn split_into_tokens(line: &str) -> Vec<Token> {
    line.split(' ')
        .filter(|w| !w.is_empty())
        .map(Token::from_word)
        .collect()
}
