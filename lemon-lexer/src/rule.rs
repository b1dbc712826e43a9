use regex::Regex;

use crate::error::InvalidPattern;

/// One entry of the lexer's ordered rule list (§3.6). Rule order is the match
/// priority: [`crate::lexer::Lexer::tokenize`] asks each rule in turn and takes
/// the first that matches at the cursor, with no longest-match comparison across
/// rules.
///
/// `Some` token data means "emit a token"; `None` means "consume the matched text
/// but emit nothing" (whitespace, comments).
pub enum Rule<T> {
    Literal {
        text: String,
        data: Option<T>,
    },
    Regex {
        pattern: Regex,
        handler: Box<dyn Fn(&str) -> Option<T>>,
    },
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Literal { text, .. } => f.debug_struct("Literal").field("text", text).finish(),
            Rule::Regex { pattern, .. } => f.debug_struct("Regex").field("pattern", &pattern.as_str()).finish(),
        }
    }
}

impl<T: Clone> Rule<T> {
    pub fn literal(text: impl Into<String>, data: T) -> Self {
        Rule::Literal {
            text: text.into(),
            data: Some(data),
        }
    }

    /// A literal that is consumed but never emitted, e.g. a fixed punctuation
    /// token the grammar doesn't care about, or a single whitespace character.
    pub fn skip_literal(text: impl Into<String>) -> Self {
        Rule::Literal {
            text: text.into(),
            data: None,
        }
    }

    /// `pattern` is matched anchored at the cursor (§4.1 point 3): a match that
    /// starts anywhere but position zero of the remaining input does not count,
    /// regardless of what `pattern` itself matches further right.
    pub fn regex(pattern: &str, handler: impl Fn(&str) -> Option<T> + 'static) -> Result<Self, InvalidPattern> {
        Ok(Rule::Regex {
            pattern: Regex::new(pattern)?,
            handler: Box::new(handler),
        })
    }

    /// A regex rule that always skips (whitespace, comments).
    pub fn skip_regex(pattern: &str) -> Result<Self, InvalidPattern> {
        Self::regex(pattern, |_| None)
    }

    /// Tries this rule against `input` (the remaining, not-yet-scanned suffix).
    /// Returns the matched byte length and the token data on success. A
    /// zero-length match is treated as no match at all: it would never advance
    /// the cursor, and an infinite loop is worse than a missed rule.
    pub(crate) fn try_match(&self, input: &str) -> Option<(usize, Option<T>)> {
        match self {
            Rule::Literal { text, data } => {
                if !text.is_empty() && input.starts_with(text.as_str()) {
                    Some((text.len(), data.clone()))
                } else {
                    None
                }
            }
            Rule::Regex { pattern, handler } => {
                let found = pattern.find(input)?;
                if found.start() != 0 || found.end() == 0 {
                    return None;
                }
                Some((found.end(), handler(found.as_str())))
            }
        }
    }
}
