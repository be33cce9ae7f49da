//! 错误处理测试

use std::path::Path;

use super::lex_str;
use crate::frontend::lexer::lex;
use crate::frontend::module::Resolver;

#[cfg(test)]
mod lexer_error_tests {
    use super::*;

    #[test]
    fn test_unknown_char() {
        let err = lex_str("push @").unwrap_err();
        assert_eq!(err.message, "unexpected character '@'");
        assert_eq!((err.line, err.column), (1, 6));
        assert_eq!(err.to_string(), "test.qd:1:6: unexpected character '@'");
    }

    #[test]
    fn test_lone_minus_is_rejected() {
        let err = lex_str("x -").unwrap_err();
        assert_eq!(err.message, "unexpected character '-'");
    }

    #[test]
    fn test_inline_c_requires_brace() {
        let err = lex_str("__c int").unwrap_err();
        assert_eq!(err.message, "expected '{' after '__c'");
    }

    #[test]
    fn test_unterminated_inline_c() {
        let err = lex_str("__c { if (x) {").unwrap_err();
        assert_eq!(err.message, "unterminated inline C block");
    }

    #[test]
    fn test_invalid_utf8_position() {
        let mut resolver = Resolver::new(vec![]);
        let err = lex(Path::new("bad.qd"), b"push\nab\xff", &mut resolver).unwrap_err();
        assert_eq!(err.message, "invalid UTF-8 in source file");
        assert_eq!((err.line, err.column), (2, 3));
        assert_eq!(err.filepath, "bad.qd");
    }
}
