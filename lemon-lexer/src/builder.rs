use crate::{error::InvalidPattern, lexer::Lexer, rule::Rule};

/// Builder-style constructor for a [`Lexer`]'s rule list: callers assemble
/// rules declaratively, in match-priority order, instead of hand-building a
/// `Vec<Rule<T>>` themselves.
///
/// Each `.regex(...)` call compiles its pattern immediately, so a malformed
/// pattern is a construction-time [`InvalidPattern`] error, never a lex-time
/// one.
pub struct LexerRules<T> {
    rules: Vec<Rule<T>>,
}

impl<T: Clone> Default for LexerRules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LexerRules<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a literal rule. `data` of `None` means the match is consumed
    /// but no token is emitted (fixed punctuation the grammar ignores,
    /// single-character whitespace).
    pub fn literal(mut self, text: impl Into<String>, data: Option<T>) -> Self {
        self.rules.push(match data {
            Some(data) => Rule::literal(text, data),
            None => Rule::skip_literal(text),
        });
        self
    }

    /// Appends a regex rule, compiling `pattern` once, here, rather than on
    /// every match attempt.
    pub fn regex(mut self, pattern: &str, handler: impl Fn(&str) -> Option<T> + 'static) -> Result<Self, InvalidPattern> {
        self.rules.push(Rule::regex(pattern, handler)?);
        Ok(self)
    }

    pub fn build(self) -> Lexer<T> {
        Lexer::new(self.rules)
    }
}
