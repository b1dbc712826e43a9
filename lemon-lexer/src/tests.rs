use crate::{Lexer, LexerRules, NoMatchingRule, Rule, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    A,
    B,
    Num(String),
}

fn ab_lexer() -> Lexer<Tok> {
    Lexer::new(vec![Rule::literal("a", Tok::A), Rule::literal("b", Tok::B)])
}

#[test]
fn error_skip_aggregation_emits_one_error_for_the_whole_run() {
    // §8 scenario 7.
    let lexer = ab_lexer();
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    lexer
        .tokenize("a??b", |tok, _span| tokens.push(tok), Some(|err: NoMatchingRule| errors.push(err)))
        .unwrap();

    assert_eq!(tokens, vec![Tok::A, Tok::B]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].at, 1);
}

#[test]
fn without_an_error_sink_the_first_unmatched_position_fails_immediately() {
    let lexer = ab_lexer();
    let mut tokens = Vec::new();

    let err = lexer
        .tokenize("a??b", |tok, _span| tokens.push(tok), None::<fn(NoMatchingRule)>)
        .unwrap_err();

    // Only "a" was consumed before the first '?' raised.
    assert_eq!(tokens, vec![Tok::A]);
    assert_eq!(err.at, 1);
}

#[test]
fn error_skip_flushes_a_final_error_at_end_of_input() {
    let lexer = ab_lexer();
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    lexer
        .tokenize("a??", |tok, _span| tokens.push(tok), Some(|err: NoMatchingRule| errors.push(err)))
        .unwrap();

    assert_eq!(tokens, vec![Tok::A]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].at, 1);
}

#[test]
fn rule_order_is_match_priority_not_longest_match() {
    // Both rules could match "ab": the literal "a" comes first and wins, even
    // though a regex for identifiers further down the list would match more.
    let lexer = Lexer::new(vec![
        Rule::literal("a", Tok::A),
        Rule::regex(r"[a-z]+", |text| Some(Tok::Num(text.to_owned()))).unwrap(),
    ]);

    let mut tokens = Vec::new();
    lexer.tokenize("ab", |tok, _| tokens.push(tok), None::<fn(NoMatchingRule)>).unwrap();

    assert_eq!(tokens, vec![Tok::A, Tok::Num("b".to_owned())]);
}

#[test]
fn regex_match_must_start_at_the_cursor() {
    // The pattern matches "12" further right in "a12", but since the match
    // doesn't start at position zero of the remaining input, it doesn't count;
    // lacking any other rule for 'a', this is a NoMatchingRule instead.
    let lexer = Lexer::new(vec![Rule::regex(r"[0-9]+", |text| Some(Tok::Num(text.to_owned()))).unwrap()]);

    let err = lexer
        .tokenize("a12", |_, _| panic!("no token should be emitted"), None::<fn(NoMatchingRule)>)
        .unwrap_err();
    assert_eq!(err.at, 0);
}

#[test]
fn whitespace_handler_returning_none_advances_without_emitting() {
    let lexer = Lexer::new(vec![
        Rule::skip_regex(r"[ \t]+").unwrap(),
        Rule::literal("a", Tok::A),
        Rule::literal("b", Tok::B),
    ]);

    let mut tokens = Vec::new();
    lexer
        .tokenize("a   b", |tok, _| tokens.push(tok), None::<fn(NoMatchingRule)>)
        .unwrap();

    assert_eq!(tokens, vec![Tok::A, Tok::B]);
}

#[test]
fn line_and_column_advance_across_newlines() {
    let lexer = Lexer::new(vec![
        Rule::skip_regex(r"\s+").unwrap(),
        Rule::literal("a", Tok::A),
        Rule::literal("b", Tok::B),
    ]);

    let mut spans: Vec<Span> = Vec::new();
    lexer
        .tokenize("a\nb", |tok, span| spans.push((tok, span).1), None::<fn(NoMatchingRule)>)
        .unwrap();

    assert_eq!(spans[0], Span { offset: 0, line: 1, column: 0 });
    assert_eq!(spans[1], Span { offset: 2, line: 2, column: 0 });
}

#[test]
fn lexer_rules_builder_matches_the_hand_built_rule_list() {
    let lexer = LexerRules::new()
        .literal("a", Some(Tok::A))
        .literal("b", Some(Tok::B))
        .build();

    let mut tokens = Vec::new();
    lexer.tokenize("ab", |tok, _| tokens.push(tok), None::<fn(NoMatchingRule)>).unwrap();
    assert_eq!(tokens, vec![Tok::A, Tok::B]);
}

#[test]
fn lexer_rules_builder_skips_a_literal_given_no_token_data() {
    let lexer = LexerRules::new().literal(" ", None).literal("a", Some(Tok::A)).build();

    let mut tokens = Vec::new();
    lexer.tokenize("a a", |tok, _| tokens.push(tok), None::<fn(NoMatchingRule)>).unwrap();
    assert_eq!(tokens, vec![Tok::A, Tok::A]);
}

#[test]
fn lexer_rules_builder_rejects_a_malformed_pattern_at_construction_time() {
    let err = LexerRules::<Tok>::new().regex("[unterminated", |_| None).unwrap_err();
    assert!(err.to_string().contains("invalid lexer rule pattern"));
}

#[test]
fn position_advances_strictly_monotonically() {
    let lexer = Lexer::new(vec![
        Rule::skip_regex(r"\s+").unwrap(),
        Rule::regex(r"[a-z]+", |text| Some(Tok::Num(text.to_owned()))).unwrap(),
    ]);

    let mut offsets = Vec::new();
    lexer
        .tokenize("foo bar baz", |_, span| offsets.push(span.offset), None::<fn(NoMatchingRule)>)
        .unwrap();

    assert_eq!(offsets, vec![0, 4, 8]);
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}
