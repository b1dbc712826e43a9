/// The lexer's sole failure mode (§4.1, §7): no rule in the ordered rule list
/// matched the input at `at`.
///
/// `at` is a code-point index into the input that was being scanned, not a byte
/// offset (§9 Design Notes on Unicode string indexing).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no lexer rule matches the input at position {at} (near {near:?})")]
pub struct NoMatchingRule {
    pub at: usize,
    near: String,
}

impl NoMatchingRule {
    pub(crate) fn new(at: usize, remaining: &str) -> Self {
        const PREVIEW_CHARS: usize = 16;
        let near: String = remaining.chars().take(PREVIEW_CHARS).collect();
        Self { at, near }
    }
}

/// A malformed regex pattern, caught at rule-construction time rather than
/// at lex time: [`crate::LexerRules::regex`] compiles the pattern eagerly and
/// returns this instead of matching against a broken rule later.
#[derive(Debug, thiserror::Error)]
#[error("invalid lexer rule pattern: {0}")]
pub struct InvalidPattern(#[from] pub(crate) regex::Error);
