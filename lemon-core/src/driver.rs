use crate::{
    config::DriverConfig,
    stack::{ParseStack, StackEntry, StateOrRule},
    table::{ReductionHost, RuleNumber, StateNumber, SymbolCode, END_OF_INPUT, NO_FALLBACK},
    Action, ParserError,
};

/// The LALR(1) table interpreter (§4.2).
///
/// Generic over `H`, the generator-emitted parser class: `H` supplies the packed
/// action tables ([`crate::table::ParserTables`]) and the reduction callbacks
/// ([`ReductionHost`]). The driver owns `H`, the parse stack, and the trace flag
/// exclusively (§5) — nothing about a parse in progress is visible or mutable from
/// outside except through the methods below.
pub struct Driver<H: ReductionHost> {
    host: H,
    stack: ParseStack<H::Symbol>,
    max_stack_size: Option<usize>,
    trace: bool,
}

impl<H: ReductionHost> Driver<H> {
    /// Builds a fresh driver with the bottom sentinel already on the stack, state 0
    /// (the generator's conventional start state).
    pub fn new(host: H, config: DriverConfig) -> Self {
        let bottom_symbol = host.initial_symbol();
        let stack = ParseStack::new(0, END_OF_INPUT, bottom_symbol);
        Self {
            host,
            stack,
            max_stack_size: config.max_stack_size,
            trace: config.trace,
        }
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn is_tracing(&self) -> bool {
        self.trace
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// High-water mark of the parse stack's length, for diagnostics (§3.5, §3.8).
    pub fn max_attained_stack_size(&self) -> usize {
        self.stack.max_attained_len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Pops everything but the bottom sentinel, making the driver reusable for a
    /// fresh input (§4.2.3).
    pub fn reset(&mut self) {
        self.stack.reset();
    }

    /// Feeds one terminal into the parser (§4.2.1). Loops, performing any reductions
    /// the current lookahead triggers, until the token is shifted (possibly fused
    /// with an immediate reduction) or a syntax error is raised.
    pub fn consume(&mut self, token: H::Token, token_code: SymbolCode) -> Result<(), ParserError<H::Token, H::Error>> {
        loop {
            assert!(!self.stack.is_empty(), "parse stack emptied mid-input; corrupt tables");

            match self.find_shift_action(token_code) {
                Action::Shift(next_state) => {
                    let symbol = self.host.token_to_symbol(token);
                    if self.trace {
                        tracing::debug!(state = next_state, symbol = self.host.symbol_name(token_code), "shift");
                    }
                    self.push(StateOrRule::State(next_state), token_code, symbol)?;
                    return Ok(());
                }
                Action::ShiftReduce(rule) => {
                    let symbol = self.host.token_to_symbol(token);
                    if self.trace {
                        tracing::debug!(
                            rule = self.host.rule_text(rule),
                            symbol = self.host.symbol_name(token_code),
                            "shift-reduce"
                        );
                    }
                    self.push(StateOrRule::Rule(rule), token_code, symbol)?;
                    return Ok(());
                }
                Action::Reduce(rule) => {
                    let accepted = self.reduce(rule)?;
                    debug_assert!(
                        accepted.is_none(),
                        "a grammar's Accept action must only fire on the end-of-input lookahead, \
                         never mid-input (§9 Open Questions)"
                    );
                    // Reductions don't consume the lookahead; retry with the same token.
                }
                Action::Error => return Err(ParserError::SyntaxError { token, code: token_code }),
                Action::Accept => unreachable!("Accept is never dispatched on a live lookahead"),
            }
        }
    }

    /// Feeds the synthetic end-of-input lookahead and drives reductions until
    /// Accept (§4.2.2).
    pub fn end_parsing(&mut self) -> Result<H::Output, ParserError<H::Token, H::Error>> {
        loop {
            assert!(!self.stack.is_empty(), "parse stack emptied without Accept; corrupt tables");

            match self.find_shift_action(END_OF_INPUT) {
                Action::Reduce(rule) => {
                    if let Some(result) = self.reduce(rule)? {
                        return Ok(self.host.unwrap_result_from_symbol(result));
                    }
                }
                Action::Error => return Err(ParserError::UnexpectedEndOfInput),
                other => unreachable!("end_parsing only ever sees Reduce or Error, got {other}"),
            }
        }
    }

    /// The table dispatch core (§4.2.4): resolves the action for `lookahead` in the
    /// current state, trying a direct table hit, then fallback, then wildcard,
    /// before falling back to the state's default action.
    fn find_shift_action(&mut self, lookahead: SymbolCode) -> Action {
        if let StateOrRule::Rule(rule) = self.stack.top().state_or_rule {
            return Action::Reduce(rule);
        }

        let state = self
            .stack
            .top()
            .state_or_rule
            .state()
            .expect("just checked for Rule above");

        let mut lookahead = lookahead;
        loop {
            let base = self.host.shift_offset(state) as i64;
            let index = base + lookahead as i64;

            if index >= 0 && (index as usize) < self.host.lookahead_action_len() {
                if let Some((expected, action)) = self.host.lookahead_action(index as usize) {
                    if expected == lookahead {
                        return action;
                    }
                }
            }

            let fallback = self.host.fallback(lookahead);
            if fallback != NO_FALLBACK {
                debug_assert_eq!(
                    self.host.fallback(fallback),
                    NO_FALLBACK,
                    "fallback chains must be single-level (symbol {fallback} falls back again)"
                );
                if self.trace {
                    tracing::debug!(
                        from = self.host.symbol_name(lookahead),
                        to = self.host.symbol_name(fallback),
                        "fallback"
                    );
                }
                lookahead = fallback;
                continue;
            }

            if let Some(wildcard) = self.host.wildcard() {
                if lookahead > 0 {
                    let wildcard_index = index - lookahead as i64 + wildcard as i64;
                    let lower = self.host.shift_offset_min() as i64 + wildcard as i64;
                    let upper = self.host.shift_offset_max() as i64 + wildcard as i64;

                    // Lemon's canonical bounds check requires both ends to hold; the
                    // reference this spec is modeled on combined them with `||`,
                    // which we treat as a bug and do not reproduce (§9).
                    if wildcard_index >= lower
                        && wildcard_index <= upper
                        && wildcard_index >= 0
                        && (wildcard_index as usize) < self.host.lookahead_action_len()
                    {
                        if let Some((expected, action)) = self.host.lookahead_action(wildcard_index as usize) {
                            if expected == wildcard {
                                if self.trace {
                                    tracing::debug!(symbol = self.host.symbol_name(wildcard), "wildcard");
                                }
                                return action;
                            }
                        }
                    }
                }
            }

            return self.host.default_action(state);
        }
    }

    /// Applies rule `rule` (§4.2.5): runs the reduction callback, pops the
    /// consumed right-hand side, and follows the resulting goto. Returns
    /// `Some(symbol)` only when the reduction reached `Accept` — that symbol is
    /// the parse's final result, still wrapped as `H::Symbol`.
    fn reduce(&mut self, rule: RuleNumber) -> Result<Option<H::Symbol>, ParserError<H::Token, H::Error>> {
        let info = self.host.rule_info(rule);
        assert!(
            self.stack.len() > info.rhs_len,
            "reducing rule {rule} ({} symbols) would consume the bottom sentinel",
            info.rhs_len
        );

        if self.trace {
            tracing::debug!(rule = rule, text = self.host.rule_text(rule), "reduce");
        }

        let rhs_symbols: Vec<H::Symbol> = self.stack.pop_n(info.rhs_len).into_iter().map(|entry| entry.symbol).collect();
        let result_symbol = self
            .host
            .invoke_code_block_for_rule(rule, rhs_symbols)
            .map_err(ParserError::User)?;

        self.perform_reduce_action(result_symbol, info.lhs)
    }

    /// Looks up the goto for `lhs` in the state exposed after popping a reduction's
    /// right-hand side, and carries out whatever it says (§4.2.6).
    fn perform_reduce_action(
        &mut self,
        result_symbol: H::Symbol,
        lhs: SymbolCode,
    ) -> Result<Option<H::Symbol>, ParserError<H::Token, H::Error>> {
        let state = self
            .stack
            .top()
            .state_or_rule
            .state()
            .expect("goto after a reduction must land on a state, never a deferred rule");

        match self.find_reduce_action(state, lhs) {
            Action::Shift(next_state) => {
                self.push(StateOrRule::State(next_state), lhs, result_symbol)?;
                Ok(None)
            }
            Action::Reduce(rule) => {
                self.push(StateOrRule::Rule(rule), lhs, result_symbol)?;
                Ok(None)
            }
            Action::Accept => Ok(Some(result_symbol)),
            other @ (Action::ShiftReduce(_) | Action::Error) => {
                unreachable!("impossible action after a reduction: {other}")
            }
        }
    }

    fn find_reduce_action(&self, state: StateNumber, lhs: SymbolCode) -> Action {
        let base = self.host.reduce_offset(state);
        assert_ne!(
            base,
            self.host.reduce_use_default(),
            "state {state} has no goto row for non-terminal {lhs}"
        );

        let index = base as i64 + lhs as i64;
        let (expected, action) = self
            .host
            .lookahead_action(index as usize)
            .unwrap_or_else(|| panic!("goto row for state {state} has no entry at the computed offset"));
        assert_eq!(expected, lhs, "goto row mismatch for state {state}, non-terminal {lhs}");
        action
    }

    fn push(&mut self, state_or_rule: StateOrRule, symbol_code: SymbolCode, symbol: H::Symbol) -> Result<(), crate::stack::StackOverflow> {
        self.stack.push(StackEntry::new(state_or_rule, symbol_code, symbol), self.max_stack_size)
    }
}
