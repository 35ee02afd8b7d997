/**
 * Lexer Tests
 *
 * Token boundaries, categories, numeric literal modes and lexer errors
 */

#[cfg(test)]
mod tests {
    use jsbind::config::NumericLiteralMode;
    use jsbind::expression_parser::lexer::{tokenize, tokenize_with, Lexer, Token, TokenCategory};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lex(text: &str) -> Vec<Token> {
        tokenize(text).unwrap()
    }

    fn expect_token(token: &Token, index: usize, end: usize) {
        assert_eq!(token.index, index, "Token index mismatch");
        assert_eq!(token.end, end, "Token end mismatch");
    }

    fn expect_punctuation_token(token: &Token, index: usize, end: usize, character: char) {
        expect_token(token, index, end);
        assert!(
            token.is_punctuation(character),
            "Expected punctuation token '{}'",
            character
        );
    }

    fn expect_operator_token(token: &Token, index: usize, end: usize, operator: &str) {
        expect_token(token, index, end);
        assert!(
            token.is_operator(operator),
            "Expected operator token '{}' but got {:?}",
            operator,
            token
        );
    }

    fn expect_number_token(token: &Token, index: usize, end: usize, n: f64) {
        expect_token(token, index, end);
        assert!(token.is_number(), "Expected number token");
        assert_eq!(token.num_value(), Some(n), "Expected number {}", n);
    }

    fn expect_string_token(token: &Token, index: usize, end: usize, text: &str) {
        expect_token(token, index, end);
        assert!(token.is_string(), "Expected string token");
        assert_eq!(token.str_value(), text, "Expected string value");
    }

    fn expect_identifier_token(token: &Token, index: usize, end: usize, identifier: &str) {
        expect_token(token, index, end);
        assert!(token.is_identifier(), "Expected identifier token");
        assert_eq!(token.str_value(), identifier, "Expected identifier value");
    }

    fn expect_keyword_token(token: &Token, index: usize, end: usize, keyword: &str) {
        expect_token(token, index, end);
        assert!(token.is_keyword(), "Expected keyword token");
        assert_eq!(token.str_value(), keyword, "Expected keyword value");
    }

    fn lex_number(text: &str, mode: NumericLiteralMode) -> f64 {
        let tokens = tokenize_with(text, mode).unwrap();
        assert_eq!(tokens.len(), 2, "Expected a single number token for {}", text);
        tokens[0].num_value().unwrap()
    }

    mod tokens {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_tokenize_a_simple_identifier() {
            let tokens = lex("j");
            assert_eq!(tokens.len(), 2);
            expect_identifier_token(&tokens[0], 0, 1, "j");
            assert!(tokens[1].is_eof());
        }

        #[test]
        fn should_tokenize_identifiers_with_dollar_and_underscore() {
            let tokens = lex("$item _private a1");
            expect_identifier_token(&tokens[0], 0, 5, "$item");
            expect_identifier_token(&tokens[1], 6, 14, "_private");
            expect_identifier_token(&tokens[2], 15, 17, "a1");
        }

        #[test]
        fn should_tokenize_a_dotted_identifier() {
            let tokens = lex("j.k");
            assert_eq!(tokens.len(), 4);
            expect_identifier_token(&tokens[0], 0, 1, "j");
            expect_punctuation_token(&tokens[1], 1, 2, '.');
            expect_identifier_token(&tokens[2], 2, 3, "k");
        }

        #[test]
        fn should_tokenize_keywords() {
            let tokens = lex("true false null undefined");
            expect_keyword_token(&tokens[0], 0, 4, "true");
            expect_keyword_token(&tokens[1], 5, 10, "false");
            expect_keyword_token(&tokens[2], 11, 15, "null");
            expect_keyword_token(&tokens[3], 16, 25, "undefined");
        }

        #[test]
        fn should_treat_operator_words_as_identifiers() {
            let tokens = lex("typeof a in b instanceof c");
            expect_identifier_token(&tokens[0], 0, 6, "typeof");
            expect_identifier_token(&tokens[2], 9, 11, "in");
            expect_identifier_token(&tokens[4], 14, 24, "instanceof");
        }

        #[test]
        fn should_tokenize_punctuation() {
            let tokens = lex("[](){},;:");
            for (i, ch) in "[](){},;:".chars().enumerate() {
                expect_punctuation_token(&tokens[i], i, i + 1, ch);
            }
        }

        #[test]
        fn should_skip_all_whitespace_kinds() {
            let tokens = lex(" \t\r\na\n");
            assert_eq!(tokens.len(), 2);
            expect_identifier_token(&tokens[0], 4, 5, "a");
            assert_eq!(tokens[1].index, 6);
        }

        #[test]
        fn should_keep_returning_eof() {
            let mut lexer = Lexer::new("");
            assert_eq!(lexer.next_token().unwrap().category, TokenCategory::Eof);
            assert_eq!(lexer.next_token().unwrap().category, TokenCategory::Eof);
        }

        #[test]
        fn should_stop_iteration_after_eof() {
            let tokens: Vec<_> = Lexer::new("a b").collect();
            assert_eq!(tokens.len(), 3);
        }
    }

    mod operators {
        use super::*;

        #[test]
        fn should_use_maximal_munch() {
            let tokens = lex("a>>>b");
            expect_operator_token(&tokens[1], 1, 4, ">>>");

            let tokens = lex("a!==b");
            expect_operator_token(&tokens[1], 1, 4, "!==");

            let tokens = lex("a<=b");
            expect_operator_token(&tokens[1], 1, 3, "<=");
        }

        #[test]
        fn should_split_unknown_combinations() {
            let tokens = lex("!-x");
            expect_operator_token(&tokens[0], 0, 1, "!");
            expect_operator_token(&tokens[1], 1, 2, "-");
            expect_identifier_token(&tokens[2], 2, 3, "x");
        }

        #[test]
        fn should_not_know_increment_and_decrement() {
            let tokens = lex("--x");
            expect_operator_token(&tokens[0], 0, 1, "-");
            expect_operator_token(&tokens[1], 1, 2, "-");

            let tokens = lex("++x");
            expect_operator_token(&tokens[0], 0, 1, "+");
            expect_operator_token(&tokens[1], 1, 2, "+");
        }

        #[test]
        fn should_tokenize_conditional_and_assignment() {
            let tokens = lex("a ? b : c");
            expect_operator_token(&tokens[1], 2, 3, "?");
            expect_punctuation_token(&tokens[3], 6, 7, ':');

            let tokens = lex("prop:x=1");
            expect_operator_token(&tokens[3], 6, 7, "=");
        }
    }

    mod numbers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_tokenize_integers_and_floats() {
            let tokens = lex("88 3.14 .5 0.25");
            expect_number_token(&tokens[0], 0, 2, 88.0);
            expect_number_token(&tokens[1], 3, 7, 3.14);
            expect_number_token(&tokens[2], 8, 10, 0.5);
            expect_number_token(&tokens[3], 11, 15, 0.25);
        }

        #[test]
        fn should_tokenize_scientific_notation() {
            let tokens = lex("2e3");
            expect_number_token(&tokens[0], 0, 3, 2000.0);

            let tokens = lex("1e+2");
            expect_number_token(&tokens[0], 0, 4, 100.0);

            let tokens = lex("5E-1");
            expect_number_token(&tokens[0], 0, 4, 0.5);

            let tokens = lex("1.5e1");
            expect_number_token(&tokens[0], 0, 5, 15.0);
        }

        #[test]
        fn should_convert_standard_bases() {
            assert_eq!(lex_number("0x10", NumericLiteralMode::Standard), 16.0);
            assert_eq!(lex_number("0XfF", NumericLiteralMode::Standard), 255.0);
            assert_eq!(lex_number("010", NumericLiteralMode::Standard), 8.0);
            assert_eq!(lex_number("017", NumericLiteralMode::Standard), 15.0);
        }

        #[test]
        fn should_convert_legacy_bases() {
            assert_eq!(lex_number("0x10", NumericLiteralMode::Legacy), 0.0);
            assert_eq!(lex_number("0xff", NumericLiteralMode::Legacy), 0.0);
            assert_eq!(lex_number("010", NumericLiteralMode::Legacy), 16.0);
            assert_eq!(lex_number("017", NumericLiteralMode::Legacy), 23.0);
        }

        #[test]
        fn should_end_octal_run_at_first_non_octal_digit() {
            let tokens = lex("0178");
            expect_number_token(&tokens[0], 0, 3, 15.0);
            expect_number_token(&tokens[1], 3, 4, 8.0);
        }

        #[test]
        fn should_treat_zero_prefixed_non_octal_as_decimal() {
            let tokens = lex("09 0 0.5");
            expect_number_token(&tokens[0], 0, 2, 9.0);
            expect_number_token(&tokens[1], 3, 4, 0.0);
            expect_number_token(&tokens[2], 5, 8, 0.5);
        }

        #[test]
        fn should_tokenize_period_without_digit_as_punctuation() {
            let tokens = lex("a.e");
            expect_punctuation_token(&tokens[1], 1, 2, '.');
            expect_identifier_token(&tokens[2], 2, 3, "e");
        }

        proptest! {
            #[test]
            fn decimal_integers_round_trip(n in 1u64..1_000_000_000_000u64) {
                let text = n.to_string();
                prop_assert_eq!(lex_number(&text, NumericLiteralMode::Standard), n as f64);
            }

            #[test]
            fn decimal_floats_round_trip(n in 0.0f64..1.0e12) {
                let text = n.to_string();
                prop_assert_eq!(lex_number(&text, NumericLiteralMode::Standard), n);
            }

            #[test]
            fn hex_literals_round_trip(n in 0u32..u32::MAX) {
                let text = format!("0x{:x}", n);
                prop_assert_eq!(lex_number(&text, NumericLiteralMode::Standard), n as f64);
            }
        }
    }

    mod strings {
        use super::*;

        #[test]
        fn should_tokenize_quoted_strings() {
            let tokens = lex(r#"'single' "double""#);
            expect_string_token(&tokens[0], 0, 8, "single");
            expect_string_token(&tokens[1], 9, 17, "double");
        }

        #[test]
        fn should_take_escaped_characters_literally() {
            let tokens = lex(r"'a\nb'");
            expect_string_token(&tokens[0], 0, 6, "anb");

            let tokens = lex(r"'it\'s'");
            expect_string_token(&tokens[0], 0, 7, "it's");

            let tokens = lex(r#""back\\slash""#);
            expect_string_token(&tokens[0], 0, 13, r"back\slash");
        }

        #[test]
        fn should_allow_other_quote_inside() {
            let tokens = lex(r#"'say "hi"'"#);
            expect_string_token(&tokens[0], 0, 10, r#"say "hi""#);
        }

        #[test]
        fn should_tokenize_empty_string() {
            let tokens = lex("''");
            expect_string_token(&tokens[0], 0, 2, "");
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        fn lex_error(text: &str) -> jsbind::SyntaxError {
            tokenize(text).unwrap_err()
        }

        #[test]
        fn should_report_invalid_character() {
            let err = lex_error("a # b");
            assert!(err.is_lex());
            assert_eq!(err.position, 2);
            assert_eq!(err.message, "Invalid character [#]");
            assert_eq!(
                err.to_string(),
                "Lexer Error: Invalid character [#] at column 2 in expression [a # b]"
            );
        }

        #[test]
        fn should_report_unterminated_quote() {
            let err = lex_error("x + 'abc");
            assert_eq!(err.message, "Unterminated quote");
            assert_eq!(err.position, 4);

            let err = lex_error(r"'abc\");
            assert_eq!(err.message, "Unterminated quote");
        }

        #[test]
        fn should_require_exponent_digits() {
            let err = lex_error("1e");
            assert!(err.message.starts_with("Invalid exponent"), "{}", err);
            assert_eq!(err.position, 2);

            let err = lex_error("1e+");
            assert!(err.message.starts_with("Invalid exponent"), "{}", err);
        }

        #[test]
        fn should_require_hex_digits_in_standard_mode() {
            let err = lex_error("0x");
            assert!(err.message.starts_with("Invalid hexadecimal literal"), "{}", err);

            assert_eq!(lex_number("0x", NumericLiteralMode::Legacy), 0.0);
        }

        #[test]
        fn should_report_position_in_characters() {
            let err = lex_error("'é' #");
            assert_eq!(err.position, 4);
        }
    }
}
