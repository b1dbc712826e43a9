use crate::Action;

/// Identifies a terminal or non-terminal (§3.1). The generator picks the narrowest
/// integer that fits the grammar's symbol count; the driver widens to `u32`
/// uniformly rather than being generic over integer width, trading a few
/// unused bits for a table-provider trait that stays simple to implement by hand
/// (as the test-only stubs in this crate and in `lemon-tests` do).
pub type SymbolCode = u32;

/// Identifies a parser state (§3.1).
pub type StateNumber = u32;

/// Identifies a grammar production (§3.1).
pub type RuleNumber = u32;

/// `SymbolCode` 0 is reserved for the synthetic end-of-input lookahead fed by
/// [`crate::driver::Driver::end_parsing`] (§4.2.2).
pub const END_OF_INPUT: SymbolCode = 0;

/// `fallback[code] == NO_FALLBACK` means "this terminal has no fallback" (§3.4).
pub const NO_FALLBACK: SymbolCode = 0;

/// One entry of `ruleInfo[rule]` (§3.4): the rule's left-hand symbol and how many
/// right-hand-side symbols it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub lhs: SymbolCode,
    pub rhs_len: usize,
}

/// The read-only contract a generator-emitted parser class fulfills (§3.4, §6).
///
/// This is the seam between the driver (this crate) and whatever produced the
/// tables — normally an offline table generator, out of scope here, but a
/// hand-written `impl` works just as well, which is how this crate's own tests
/// and `lemon-tests`'s worked grammar exercise the driver without a generator.
///
/// All table arrays are conceptually 0-indexed and immutable for the lifetime of
/// the implementing value; nothing in [`crate::driver::Driver`] ever calls a
/// mutating method on the table half of this trait.
pub trait ParserTables {
    fn number_of_symbols(&self) -> SymbolCode;
    fn number_of_states(&self) -> StateNumber;

    /// Looks up one entry of the packed `lookaheadAction` array (§3.4). Returns
    /// `None` for an out-of-range index — callers must treat that the same as a
    /// present-but-non-matching entry.
    fn lookahead_action(&self, index: usize) -> Option<(SymbolCode, Action)>;
    fn lookahead_action_len(&self) -> usize;

    /// Base offset of `state`'s shift row inside `lookaheadAction`. Signed because
    /// the packed representation a real generator emits routinely offsets rows
    /// below index 0 to share storage between states (classic Lemon packing).
    fn shift_offset(&self, state: StateNumber) -> i32;
    fn shift_offset_min(&self) -> i32;
    fn shift_offset_max(&self) -> i32;
    /// Sentinel value of `shift_offset` meaning "no shift row for this state; use
    /// `default_action`".
    fn shift_use_default(&self) -> i32;

    /// Base offset of `state`'s goto row inside `lookaheadAction` (§3.4).
    fn reduce_offset(&self, state: StateNumber) -> i32;
    fn reduce_offset_min(&self) -> i32;
    fn reduce_offset_max(&self) -> i32;
    fn reduce_use_default(&self) -> i32;

    fn default_action(&self, state: StateNumber) -> Action;

    /// `NO_FALLBACK` (0) means `code` has no fallback. The fallback graph must be
    /// acyclic and of depth <= 1: `fallback(fallback(code))` must be `NO_FALLBACK`
    /// whenever `fallback(code)` is not.
    fn fallback(&self, code: SymbolCode) -> SymbolCode;

    /// The wildcard terminal, if the grammar declared one (§3.4). Must be > 0.
    fn wildcard(&self) -> Option<SymbolCode>;

    fn rule_info(&self, rule: RuleNumber) -> RuleInfo;

    fn symbol_name(&self, code: SymbolCode) -> &str;
    fn rule_text(&self, rule: RuleNumber) -> &str;
}

/// The generator-supplied bindings the driver calls during a reduction (§6).
///
/// Implemented by the same type as [`ParserTables`] — the "generator-emitted
/// parser class" in §5 is a single object that owns both the read-only tables
/// and these callbacks.
pub trait ReductionHost: ParserTables {
    type Token;
    type Symbol;
    type Output;
    type Error;

    /// The placeholder value carried by the parse stack's bottom sentinel entry
    /// (§3.5), created once when the driver is constructed and never inspected by
    /// the driver itself.
    fn initial_symbol(&self) -> Self::Symbol;

    /// Injects a terminal's semantic payload into the `Symbol` union.
    fn token_to_symbol(&self, token: Self::Token) -> Self::Symbol;

    /// Runs the user action code for `rule`, consuming its right-hand-side
    /// symbols (already removed from the stack, in bottom-to-top order so
    /// `rhs[0]` is the first symbol of the production) and producing the
    /// synthesized left-hand-side value. May fail with a user-defined error,
    /// which the driver propagates unchanged (§7).
    fn invoke_code_block_for_rule(
        &mut self,
        rule: RuleNumber,
        rhs: Vec<Self::Symbol>,
    ) -> Result<Self::Symbol, Self::Error>;

    /// Projects the start symbol's synthesized value into the `Result` type
    /// returned by `end_parsing`.
    fn unwrap_result_from_symbol(&self, symbol: Self::Symbol) -> Self::Output;
}
