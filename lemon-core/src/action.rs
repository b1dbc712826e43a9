use crate::{RuleNumber, StateNumber};

/// One entry of the compressed action table (§3.2 of the driver's table contract).
///
/// `Error` and `Accept` carry no payload: an `Error` action means the lookahead has
/// no legal transition in the current state, and `Accept` is only ever returned by
/// [`crate::table::ParserTables::default_action`]/the action row after a reduction
/// on the start symbol, never dispatched on a live lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateNumber),
    Reduce(RuleNumber),
    /// A shift whose target state would unconditionally reduce; fused by the
    /// generator to save one table lookup on the next step.
    ShiftReduce(RuleNumber),
    Error,
    Accept,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(to) => write!(f, "s{}", to),
            Action::Reduce(rule) => write!(f, "r{}", rule),
            Action::ShiftReduce(rule) => write!(f, "sr{}", rule),
            Action::Error => write!(f, "err"),
            Action::Accept => write!(f, "acc"),
        }
    }
}
