//! Hand-built tables for a handful of trivial grammars, standing in for a real
//! offline table generator so the driver's behavior can be exercised directly
//! (§8's scenario tests). Not part of the public API.

use std::collections::HashMap;

use crate::{
    Action, ParserTables, ReductionHost, RuleInfo, RuleNumber, StateNumber, SymbolCode,
};

/// A sentinel expected-symbol code that never matches a real lookahead, used to
/// fill unused table slots so a miss behaves like "no entry here".
const UNUSED: SymbolCode = SymbolCode::MAX;

/// A simple, un-packed stand-in for the compressed `lookaheadAction` array: every
/// state gets a full-width row in the shift half and in the goto half of `actions`,
/// so `offset + symbol` always lands on that symbol's own slot. Real generators
/// pack this far tighter by overlapping rows; this layout only needs to satisfy
/// the driver's indexing contract (§3.4), not be space-efficient.
pub(crate) struct PackedTables {
    num_symbols: u32,
    num_states: u32,
    actions: Vec<(SymbolCode, Action)>,
    default_actions: Vec<Action>,
    fallback: HashMap<SymbolCode, SymbolCode>,
    wildcard: Option<SymbolCode>,
    rule_infos: Vec<RuleInfo>,
    symbol_names: HashMap<SymbolCode, &'static str>,
    rule_texts: Vec<&'static str>,
}

impl PackedTables {
    fn shift_base(&self, state: StateNumber) -> i32 {
        (state * self.num_symbols) as i32
    }

    fn reduce_base(&self, state: StateNumber) -> i32 {
        (self.num_states * self.num_symbols + state * self.num_symbols) as i32
    }
}

pub(crate) struct PackedTablesBuilder {
    num_symbols: u32,
    num_states: u32,
    actions: Vec<(SymbolCode, Action)>,
    default_actions: Vec<Action>,
    fallback: HashMap<SymbolCode, SymbolCode>,
    wildcard: Option<SymbolCode>,
    rule_infos: Vec<RuleInfo>,
    symbol_names: HashMap<SymbolCode, &'static str>,
    rule_texts: Vec<&'static str>,
}

impl PackedTablesBuilder {
    pub(crate) fn new(num_symbols: u32, num_states: u32) -> Self {
        let width = (num_symbols * num_states * 2) as usize;
        Self {
            num_symbols,
            num_states,
            actions: vec![(UNUSED, Action::Error); width],
            default_actions: vec![Action::Error; num_states as usize],
            fallback: HashMap::new(),
            wildcard: None,
            rule_infos: Vec::new(),
            symbol_names: HashMap::new(),
            rule_texts: Vec::new(),
        }
    }

    pub(crate) fn shift(mut self, state: StateNumber, symbol: SymbolCode, action: Action) -> Self {
        let index = (state * self.num_symbols + symbol) as usize;
        self.actions[index] = (symbol, action);
        self
    }

    pub(crate) fn goto(mut self, state: StateNumber, symbol: SymbolCode, action: Action) -> Self {
        let index = (self.num_states * self.num_symbols + state * self.num_symbols + symbol) as usize;
        self.actions[index] = (symbol, action);
        self
    }

    pub(crate) fn default(mut self, state: StateNumber, action: Action) -> Self {
        self.default_actions[state as usize] = action;
        self
    }

    pub(crate) fn fallback(mut self, from: SymbolCode, to: SymbolCode) -> Self {
        self.fallback.insert(from, to);
        self
    }

    pub(crate) fn wildcard(mut self, symbol: SymbolCode) -> Self {
        self.wildcard = Some(symbol);
        self
    }

    pub(crate) fn rule(mut self, lhs: SymbolCode, rhs_len: usize, text: &'static str) -> Self {
        self.rule_infos.push(RuleInfo { lhs, rhs_len });
        self.rule_texts.push(text);
        self
    }

    pub(crate) fn symbol_name(mut self, symbol: SymbolCode, name: &'static str) -> Self {
        self.symbol_names.insert(symbol, name);
        self
    }

    pub(crate) fn build(self) -> PackedTables {
        PackedTables {
            num_symbols: self.num_symbols,
            num_states: self.num_states,
            actions: self.actions,
            default_actions: self.default_actions,
            fallback: self.fallback,
            wildcard: self.wildcard,
            rule_infos: self.rule_infos,
            symbol_names: self.symbol_names,
            rule_texts: self.rule_texts,
        }
    }
}

/// A test host: owns a [`PackedTables`] and synthesizes symbol values by joining
/// the text of a rule's right-hand side, so accepted parses are easy to assert on
/// (the `Output` of parsing "a" "b" is literally the string `"ab"`).
pub(crate) struct StringHost {
    pub(crate) tables: PackedTables,
}

impl ParserTables for StringHost {
    fn number_of_symbols(&self) -> SymbolCode {
        self.tables.num_symbols
    }

    fn number_of_states(&self) -> StateNumber {
        self.tables.num_states
    }

    fn lookahead_action(&self, index: usize) -> Option<(SymbolCode, Action)> {
        self.tables.actions.get(index).copied()
    }

    fn lookahead_action_len(&self) -> usize {
        self.tables.actions.len()
    }

    fn shift_offset(&self, state: StateNumber) -> i32 {
        self.tables.shift_base(state)
    }

    fn shift_offset_min(&self) -> i32 {
        self.tables.shift_base(0)
    }

    fn shift_offset_max(&self) -> i32 {
        self.tables.shift_base(self.tables.num_states.saturating_sub(1))
    }

    fn shift_use_default(&self) -> i32 {
        -1
    }

    fn reduce_offset(&self, state: StateNumber) -> i32 {
        self.tables.reduce_base(state)
    }

    fn reduce_offset_min(&self) -> i32 {
        self.tables.reduce_base(0)
    }

    fn reduce_offset_max(&self) -> i32 {
        self.tables.reduce_base(self.tables.num_states.saturating_sub(1))
    }

    fn reduce_use_default(&self) -> i32 {
        -1
    }

    fn default_action(&self, state: StateNumber) -> Action {
        self.tables.default_actions[state as usize]
    }

    fn fallback(&self, code: SymbolCode) -> SymbolCode {
        self.tables.fallback.get(&code).copied().unwrap_or(crate::NO_FALLBACK)
    }

    fn wildcard(&self) -> Option<SymbolCode> {
        self.tables.wildcard
    }

    fn rule_info(&self, rule: RuleNumber) -> RuleInfo {
        self.tables.rule_infos[rule as usize]
    }

    fn symbol_name(&self, code: SymbolCode) -> &str {
        self.tables.symbol_names.get(&code).copied().unwrap_or("?")
    }

    fn rule_text(&self, rule: RuleNumber) -> &str {
        self.tables.rule_texts[rule as usize]
    }
}

impl ReductionHost for StringHost {
    type Token = String;
    type Symbol = String;
    type Output = String;
    type Error = std::convert::Infallible;

    fn initial_symbol(&self) -> Self::Symbol {
        String::new()
    }

    fn token_to_symbol(&self, token: Self::Token) -> Self::Symbol {
        token
    }

    fn invoke_code_block_for_rule(&mut self, _rule: RuleNumber, rhs: Vec<Self::Symbol>) -> Result<Self::Symbol, Self::Error> {
        Ok(rhs.concat())
    }

    fn unwrap_result_from_symbol(&self, symbol: Self::Symbol) -> Self::Output {
        symbol
    }
}

/// §8 scenario 1: `S -> ε`. A single state that reduces the empty production
/// straight to `Accept` the moment `end_parsing` asks for the end-of-input action.
pub(crate) fn empty_input_host() -> StringHost {
    const S: SymbolCode = 1;
    let tables = PackedTablesBuilder::new(2, 1)
        .default(0, Action::Reduce(0))
        .goto(0, S, Action::Accept)
        .rule(S, 0, "S -> ")
        .symbol_name(S, "S")
        .build();
    StringHost { tables }
}

/// §8 scenario 2: `S -> a`. One shift, then a default reduce once end-of-input (or
/// anything else state 1 has no explicit entry for) is seen.
pub(crate) fn single_shift_host() -> StringHost {
    const A: SymbolCode = 1;
    const S: SymbolCode = 2;
    let tables = PackedTablesBuilder::new(3, 2)
        .shift(0, A, Action::Shift(1))
        .default(1, Action::Reduce(0))
        .goto(0, S, Action::Accept)
        .rule(S, 1, "S -> a")
        .symbol_name(A, "a")
        .symbol_name(S, "S")
        .build();
    StringHost { tables }
}

/// §8 scenario 3: `S -> a b`, with the state reached after `a` performing a fused
/// ShiftReduce on `b` instead of a plain shift.
pub(crate) fn shift_reduce_fusion_host() -> StringHost {
    const A: SymbolCode = 1;
    const B: SymbolCode = 2;
    const S: SymbolCode = 3;
    let tables = PackedTablesBuilder::new(4, 2)
        .shift(0, A, Action::Shift(1))
        .shift(1, B, Action::ShiftReduce(0))
        .goto(0, S, Action::Accept)
        .rule(S, 2, "S -> a b")
        .symbol_name(A, "a")
        .symbol_name(B, "b")
        .symbol_name(S, "S")
        .build();
    StringHost { tables }
}

/// §8 scenario 4: terminal `ID` and contextual keyword `IF` with
/// `fallback[IF] = ID`; state 0's shift row only has an entry for `ID`.
pub(crate) fn fallback_host() -> StringHost {
    const ID: SymbolCode = 1;
    const IF: SymbolCode = 2;
    const S: SymbolCode = 3;
    let tables = PackedTablesBuilder::new(4, 2)
        .shift(0, ID, Action::Shift(1))
        .default(1, Action::Reduce(0))
        .fallback(IF, ID)
        .goto(0, S, Action::Accept)
        .rule(S, 1, "S -> id")
        .symbol_name(ID, "ID")
        .symbol_name(IF, "IF")
        .symbol_name(S, "S")
        .build();
    StringHost { tables }
}

/// §8 scenario 5: `S -> a b`. State 1 (after `a`) only accepts `b`; anything else,
/// including the `c` this scenario feeds, falls through to `Error`.
pub(crate) fn syntax_error_host() -> StringHost {
    const A: SymbolCode = 1;
    const B: SymbolCode = 2;
    let tables = PackedTablesBuilder::new(4, 2)
        .shift(0, A, Action::Shift(1))
        .shift(1, B, Action::Shift(2))
        .default(1, Action::Error)
        .symbol_name(A, "a")
        .symbol_name(B, "b")
        .build();
    StringHost { tables }
}

/// §8 scenario 6: a pure shift chain, standing in for a left-recursive grammar's
/// growth, deep enough to trip a `max_stack_size` of 4 on the fourth `a`.
pub(crate) fn stack_overflow_host() -> StringHost {
    const A: SymbolCode = 1;
    let mut builder = PackedTablesBuilder::new(2, 5);
    for state in 0..4 {
        builder = builder.shift(state, A, Action::Shift(state + 1));
    }
    let tables = builder.default(4, Action::Error).symbol_name(A, "a").build();
    StringHost { tables }
}

/// A wildcard terminal `ANY` matches any nonzero lookahead that has no direct
/// entry of its own in state 0's shift row — a catch-all production alongside
/// the explicitly-named `ID` terminal.
pub(crate) fn wildcard_host() -> StringHost {
    const ID: SymbolCode = 1;
    const ANY: SymbolCode = 2;
    const S: SymbolCode = 3;
    let tables = PackedTablesBuilder::new(4, 2)
        .shift(0, ANY, Action::Shift(1))
        .default(1, Action::Reduce(0))
        .wildcard(ANY)
        .goto(0, S, Action::Accept)
        .rule(S, 1, "S -> any")
        .symbol_name(ID, "ID")
        .symbol_name(ANY, "ANY")
        .symbol_name(S, "S")
        .build();
    StringHost { tables }
}

/// Wraps another host's tables but reports a caller-chosen `shift_offset_min`,
/// so a test can move the lower wildcard bound without touching anything else.
pub(crate) struct NarrowBoundsHost {
    inner: StringHost,
    shift_offset_min: i32,
}

impl ParserTables for NarrowBoundsHost {
    fn number_of_symbols(&self) -> SymbolCode {
        self.inner.number_of_symbols()
    }

    fn number_of_states(&self) -> StateNumber {
        self.inner.number_of_states()
    }

    fn lookahead_action(&self, index: usize) -> Option<(SymbolCode, Action)> {
        self.inner.lookahead_action(index)
    }

    fn lookahead_action_len(&self) -> usize {
        self.inner.lookahead_action_len()
    }

    fn shift_offset(&self, state: StateNumber) -> i32 {
        self.inner.shift_offset(state)
    }

    fn shift_offset_min(&self) -> i32 {
        self.shift_offset_min
    }

    fn shift_offset_max(&self) -> i32 {
        self.inner.shift_offset_max()
    }

    fn shift_use_default(&self) -> i32 {
        self.inner.shift_use_default()
    }

    fn reduce_offset(&self, state: StateNumber) -> i32 {
        self.inner.reduce_offset(state)
    }

    fn reduce_offset_min(&self) -> i32 {
        self.inner.reduce_offset_min()
    }

    fn reduce_offset_max(&self) -> i32 {
        self.inner.reduce_offset_max()
    }

    fn reduce_use_default(&self) -> i32 {
        self.inner.reduce_use_default()
    }

    fn default_action(&self, state: StateNumber) -> Action {
        self.inner.default_action(state)
    }

    fn fallback(&self, code: SymbolCode) -> SymbolCode {
        self.inner.fallback(code)
    }

    fn wildcard(&self) -> Option<SymbolCode> {
        self.inner.wildcard()
    }

    fn rule_info(&self, rule: RuleNumber) -> RuleInfo {
        self.inner.rule_info(rule)
    }

    fn symbol_name(&self, code: SymbolCode) -> &str {
        self.inner.symbol_name(code)
    }

    fn rule_text(&self, rule: RuleNumber) -> &str {
        self.inner.rule_text(rule)
    }
}

impl ReductionHost for NarrowBoundsHost {
    type Token = String;
    type Symbol = String;
    type Output = String;
    type Error = std::convert::Infallible;

    fn initial_symbol(&self) -> Self::Symbol {
        self.inner.initial_symbol()
    }

    fn token_to_symbol(&self, token: Self::Token) -> Self::Symbol {
        self.inner.token_to_symbol(token)
    }

    fn invoke_code_block_for_rule(&mut self, rule: RuleNumber, rhs: Vec<Self::Symbol>) -> Result<Self::Symbol, Self::Error> {
        self.inner.invoke_code_block_for_rule(rule, rhs)
    }

    fn unwrap_result_from_symbol(&self, symbol: Self::Symbol) -> Self::Output {
        self.inner.unwrap_result_from_symbol(symbol)
    }
}

/// Same grammar as [`wildcard_host`], but with `shift_offset_min` pushed past
/// state 0's own base. A wildcard hit for state 0 now falls below the lower
/// bound: the `&&` check this driver uses (§9 Open Questions) must reject it
/// and fall through to the default action, where a reference implementation's
/// suspected `||` bug would have accepted it anyway since the upper bound
/// alone still held.
pub(crate) fn wildcard_out_of_range_host() -> NarrowBoundsHost {
    let inner = wildcard_host();
    let shift_offset_min = inner.tables.shift_base(1);
    NarrowBoundsHost { inner, shift_offset_min }
}
