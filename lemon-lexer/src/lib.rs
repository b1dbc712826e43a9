//! The table-driven lexer companion to `lemon-core` (§4.1): an ordered rule list
//! matched against the cursor, rule order acting as the match priority, with
//! optional error-skip aggregation when the caller wants to keep going past a
//! bad run instead of failing on the first one.

mod builder;
mod error;
mod lexer;
mod position;
mod rule;

pub use builder::LexerRules;
pub use error::{InvalidPattern, NoMatchingRule};
pub use lexer::Lexer;
pub use position::Span;
pub use rule::Rule;

#[cfg(test)]
mod tests;
