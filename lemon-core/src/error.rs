use crate::{stack::StackOverflow, SymbolCode};

/// Everything that can be raised out of [`crate::driver::Driver::consume`] or
/// [`crate::driver::Driver::end_parsing`] (§6, §7).
///
/// `User` carries whatever error type the generator-supplied reduction callback
/// fails with; it is propagated unchanged, with no attempt at cleanup beyond the
/// driver releasing its own resources on exit.
#[derive(Debug, thiserror::Error)]
pub enum ParserError<Token, UserError> {
    #[error("syntax error on token {code} ({token:?})")]
    SyntaxError { token: Token, code: SymbolCode },

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error(transparent)]
    StackOverflow(#[from] StackOverflow),

    #[error(transparent)]
    User(UserError),
}

impl<Token, UserError> ParserError<Token, UserError> {
    pub fn user(error: UserError) -> Self {
        Self::User(error)
    }
}
