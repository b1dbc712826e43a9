//! Runtime core of an LALR(1) parser framework in the style of the Lemon parser
//! generator: a compact action-table interpreter ([`lemon_core`]) plus the
//! rule-ordered lexer ([`lemon_lexer`]) that typically feeds it.
//!
//! Grammar parsing and table generation are out of scope for this crate: the
//! tables and reduction callbacks a [`Driver`] drives are supplied by an
//! external generator (or, as in this crate's own tests, a hand-written
//! [`ParserTables`]/[`ReductionHost`] implementation).

pub use lemon_core::{
    Action, Driver, DriverConfig, ParserError, ParserTables, ReductionHost, RuleInfo, RuleNumber, StackEntry,
    StackOverflow, StateNumber, StateOrRule, SymbolCode, END_OF_INPUT, NO_FALLBACK,
};
pub use lemon_lexer::{InvalidPattern, Lexer, LexerRules, NoMatchingRule, Rule, Span};

/// The handful of names most callers pull in together: the driver and its
/// config, the two traits a generator implements, and the lexer.
pub mod prelude {
    pub use crate::{
        Action, Driver, DriverConfig, Lexer, LexerRules, NoMatchingRule, ParserError, ParserTables, ReductionHost,
        Rule, Span,
    };
}
