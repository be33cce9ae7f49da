//! Span 性质测试 using proptest

use proptest::prelude::*;

use super::lex_str;
use crate::frontend::lexer::TokenKind;

/// Strategy for identifiers that are not import or inline C triggers
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_filter("reserved trigger", |s| s != "use" && s != "__c")
}

fn number_strategy() -> impl Strategy<Value = String> {
    "-?[0-9]{1,4}(\\.[0-9]{1,3})?([eE][+-]?[0-9]{1,2})?"
}

fn string_strategy() -> impl Strategy<Value = String> {
    "\"[a-z0-9 ]{0,8}\""
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier_strategy(),
        number_strategy(),
        string_strategy(),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(":".to_string()),
        Just("::".to_string()),
        Just(",".to_string()),
        Just("&".to_string()),
        Just("$".to_string()),
        Just("/* note */".to_string()),
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((token_strategy(), prop_oneof![Just(" "), Just("\n"), Just("\t")]), 1..40)
        .prop_map(|parts| {
            parts
                .into_iter()
                .map(|(token, sep)| format!("{}{}", token, sep))
                .collect::<String>()
        })
}

proptest! {
    #[test]
    fn prop_relexing_span_text_yields_same_token(source in source_strategy()) {
        let tokens = lex_str(&source).unwrap();
        for token in &tokens {
            if matches!(
                token.kind,
                TokenKind::NewLine
                    | TokenKind::Eof
                    | TokenKind::InlineC
                    | TokenKind::Module
                    | TokenKind::EndScopeComment
            ) {
                continue;
            }
            let text = &source[token.span.start.offset..token.span.end.offset];
            let relexed = lex_str(text).unwrap();
            prop_assert_eq!(relexed[0].kind, token.kind);
            prop_assert_eq!(&relexed[0].literal, &token.literal);
        }
    }
}
