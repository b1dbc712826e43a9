use crate::{RuleNumber, StateNumber, SymbolCode};

/// A stack entry's control payload (§3.3).
///
/// A freshly shifted entry always carries a [`StateOrRule::State`]. A `ShiftReduce`
/// action pushes a [`StateOrRule::Rule`] instead: the rule is deferred one step, and
/// [`crate::driver::Driver::find_shift_action`] discovers it on the very next call
/// because the stack top is no longer a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrRule {
    State(StateNumber),
    Rule(RuleNumber),
}

impl StateOrRule {
    pub fn state(self) -> Option<StateNumber> {
        match self {
            StateOrRule::State(s) => Some(s),
            StateOrRule::Rule(_) => None,
        }
    }
}

/// One triple on the parse stack: control state (or deferred rule), the symbol's
/// code, and its semantic value (§3.5).
#[derive(Debug)]
pub struct StackEntry<Symbol> {
    pub state_or_rule: StateOrRule,
    pub symbol_code: SymbolCode,
    pub symbol: Symbol,
}

impl<Symbol> StackEntry<Symbol> {
    pub fn new(state_or_rule: StateOrRule, symbol_code: SymbolCode, symbol: Symbol) -> Self {
        Self {
            state_or_rule,
            symbol_code,
            symbol,
        }
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("parse stack overflow: attempted to grow past the configured limit of {limit} entries")]
pub struct StackOverflow {
    pub limit: usize,
}

/// The explicit parse stack (§3.5). Owns every [`StackEntry`] pushed onto it and
/// enforces [`maxAttainedStackSize`](Self::max_attained_len) bookkeeping plus the
/// optional bound from §4.2.7.
#[derive(Debug)]
pub struct ParseStack<Symbol> {
    entries: Vec<StackEntry<Symbol>>,
    max_attained_len: usize,
}

impl<Symbol> ParseStack<Symbol> {
    /// Creates a stack with the bottom sentinel entry already in place, as required
    /// between construction and `end_parsing` (§3.5's non-empty invariant).
    pub fn new(bottom_state: StateNumber, bottom_symbol_code: SymbolCode, bottom_symbol: Symbol) -> Self {
        let bottom = StackEntry::new(StateOrRule::State(bottom_state), bottom_symbol_code, bottom_symbol);
        Self {
            entries: vec![bottom],
            max_attained_len: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_attained_len(&self) -> usize {
        self.max_attained_len
    }

    /// The control state or deferred rule at the top of the stack.
    ///
    /// Panics if the stack is empty: callers must never observe an empty stack
    /// mid-parse (§3.5), so an empty stack here is an internal invariant violation.
    pub fn top(&self) -> &StackEntry<Symbol> {
        self.entries
            .last()
            .expect("parse stack must never be empty while a parse is in progress")
    }

    /// Pushes a new entry, enforcing `max_stack_size` (§4.2.7).
    pub fn push(&mut self, entry: StackEntry<Symbol>, max_stack_size: Option<usize>) -> Result<(), StackOverflow> {
        if let Some(limit) = max_stack_size {
            if self.entries.len() >= limit {
                return Err(StackOverflow { limit });
            }
        }
        self.entries.push(entry);
        self.max_attained_len = self.max_attained_len.max(self.entries.len());
        Ok(())
    }

    /// Pops exactly `count` entries from the top, in bottom-to-top order (the order
    /// a reducer expects its right-hand-side symbols in). Panics if `count` would
    /// empty the sentinel out from under the stack (§4.2.5's invariant:
    /// `stack.length > rhsCount` immediately before the pop).
    pub fn pop_n(&mut self, count: usize) -> Vec<StackEntry<Symbol>> {
        assert!(
            self.entries.len() > count,
            "popping {count} entries would consume the bottom sentinel"
        );
        self.entries.split_off(self.entries.len() - count)
    }

    /// Pops entries until exactly the bottom sentinel remains (§4.2.3).
    pub fn reset(&mut self) {
        self.entries.truncate(1);
    }
}
