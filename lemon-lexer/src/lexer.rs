use crate::{error::NoMatchingRule, position::Position, rule::Rule, Span};

/// Converts input text into a stream of typed tokens by matching an ordered rule
/// list against the current cursor (§4.1).
///
/// `rules` is immutable for the lifetime of the `Lexer`; the only mutable state
/// is the cursor threaded through [`Lexer::tokenize`]. Like [`lemon_core::Driver`],
/// a `Lexer` is single-threaded and not reentrant: don't call `tokenize` again
/// from inside a callback passed to an in-progress call (§5).
pub struct Lexer<T> {
    rules: Vec<Rule<T>>,
}

impl<T: Clone> Lexer<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    /// Scans `input` start to end, calling `on_token` once per emitted token.
    ///
    /// Without `on_error`, the first unmatched position fails the whole call
    /// immediately. With `on_error`, the lexer instead enters error-skip mode
    /// (§4.1 point 5): it remembers where the unmatched run began, advances one
    /// code point at a time, and keeps trying rules. The run is reported as a
    /// single [`NoMatchingRule`] the moment a rule matches again (or at
    /// end-of-input), then scanning continues normally — so this call only
    /// returns `Err` when no error sink was supplied.
    pub fn tokenize<F, E>(&self, input: &str, mut on_token: F, mut on_error: Option<E>) -> Result<(), NoMatchingRule>
    where
        F: FnMut(T, Span),
        E: FnMut(NoMatchingRule),
    {
        let mut pos = Position::new();
        let mut cursor = 0usize;
        let mut error_run_start: Option<usize> = None;

        while cursor < input.len() {
            let remaining = &input[cursor..];

            match self.match_rule(remaining) {
                Some((byte_len, data)) => {
                    if let Some(start) = error_run_start.take() {
                        let error = NoMatchingRule::new(start, remaining);
                        if let Some(sink) = on_error.as_mut() {
                            sink(error);
                        }
                    }

                    let span = pos.span();
                    let matched = &remaining[..byte_len];
                    pos.advance(matched);
                    cursor += byte_len;

                    if let Some(token) = data {
                        on_token(token, span);
                    }
                }
                None if on_error.is_some() => {
                    if error_run_start.is_none() {
                        error_run_start = Some(pos.span().offset);
                    }
                    let next_char_len = remaining.chars().next().map(char::len_utf8).unwrap_or(1);
                    pos.advance(&remaining[..next_char_len]);
                    cursor += next_char_len;
                }
                None => {
                    return Err(NoMatchingRule::new(pos.span().offset, remaining));
                }
            }
        }

        if let Some(start) = error_run_start {
            if let Some(sink) = on_error.as_mut() {
                sink(NoMatchingRule::new(start, ""));
            }
        }

        Ok(())
    }

    fn match_rule(&self, remaining: &str) -> Option<(usize, Option<T>)> {
        self.rules.iter().find_map(|rule| rule.try_match(remaining))
    }
}
