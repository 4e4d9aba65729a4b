use decaygraph::parser::byte_parser::ByteParser;
use decaygraph::parser::byte_parser::ConsumeMode::{Exclusive, Inclusive};
use decaygraph::parser::parsing_error::ParsingErrorType;

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_comment_styles() {
    let mut parser = ByteParser::for_str("/* block */ x // line\ny # hash\nz");
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b' '));
    assert_eq!(parser.next_byte(), Some(b'x'));
    assert!(!parser.skip_comment().unwrap());

    parser.skip_whitespace();
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b'y'));

    parser.skip_whitespace();
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b'z'));
}

#[test]
fn test_skip_comment_and_whitespace() {
    let mut parser = ByteParser::for_str("/* Go */ \n// Keep going\n   \t # '...'\n/* One more to go */  END!");
    parser
        .skip_comment_and_whitespace()
        .expect("Failed to skip comments.");
    assert_eq!(parser.next_byte(), Some(b'E'));
}

#[test]
fn test_unclosed_block_comment() {
    let mut parser = ByteParser::for_str("  /* never closed");
    let err = parser.skip_comment_and_whitespace().unwrap_err();
    assert_eq!(*err.kind(), ParsingErrorType::UnclosedComment);
}

#[test]
fn test_consume_until_inclusive() {
    let mut parser = ByteParser::for_str("consume a CAN of beans");
    assert!(parser.consume_until(b'C', Inclusive));
    assert_eq!(parser.peek(), Some(b'A'));
}

#[test]
fn test_consume_until_exclusive() {
    let mut parser = ByteParser::for_str("node [label=x]");
    assert!(parser.consume_until(b'[', Exclusive));
    assert_eq!(parser.peek(), Some(b'['));
}

#[test]
fn test_consume_until_word_is_case_insensitive() {
    let mut parser = ByteParser::for_str("<init>\n</init>\n<EVENT>\n");
    assert!(parser.consume_until_word("<event", Inclusive));
    assert_eq!(parser.peek(), Some(b'>'));
    assert!(!parser.consume_until_word("<event", Inclusive));
    assert!(parser.is_eof());
}

#[test]
fn test_consume_if_word() {
    let mut parser = ByteParser::for_str("DiGraph {");
    assert!(!parser.consume_if_word("graph"));
    assert!(parser.consume_if_word("digraph"));
    assert_eq!(parser.next_byte(), Some(b' '));
}

#[test]
fn test_read_line() {
    let mut parser = ByteParser::for_str("first\r\nsecond\n\nlast");
    assert_eq!(parser.read_line().as_deref(), Some("first"));
    assert_eq!(parser.read_line().as_deref(), Some("second"));
    assert_eq!(parser.read_line().as_deref(), Some(""));
    assert_eq!(parser.read_line().as_deref(), Some("last"));
    assert_eq!(parser.read_line(), None);
}

#[test]
fn test_parse_quoted_string() {
    let mut parser = ByteParser::for_str(r#""Event \"0\" \\ end" rest"#);
    assert_eq!(parser.parse_quoted_string().unwrap(), r#"Event "0" \ end"#);
    assert_eq!(parser.next_byte(), Some(b' '));
}

#[test]
fn test_parse_quoted_string_keeps_other_escapes() {
    let mut parser = ByteParser::for_str(r#""left\l""#);
    assert_eq!(parser.parse_quoted_string().unwrap(), r"left\l");
}

#[test]
fn test_parse_quoted_string_line_continuation() {
    let mut parser = ByteParser::for_str("\"mu\\\n-\"");
    assert_eq!(parser.parse_quoted_string().unwrap(), "mu-");
}

#[test]
fn test_parse_quoted_string_errors() {
    let mut parser = ByteParser::for_str("\"open");
    assert_eq!(
        *parser.parse_quoted_string().unwrap_err().kind(),
        ParsingErrorType::UnclosedString
    );

    let mut parser = ByteParser::for_str("unquoted");
    assert_eq!(
        *parser.parse_quoted_string().unwrap_err().kind(),
        ParsingErrorType::InvalidFormatting
    );
}

#[test]
fn test_parse_unquoted_word() {
    let mut parser = ByteParser::for_str("pi0_meson->");
    assert_eq!(parser.parse_unquoted_word(), "pi0_meson");
    assert_eq!(parser.peek(), Some(b'-'));
    assert_eq!(parser.parse_unquoted_word(), "");

    let mut parser = ByteParser::for_str("-1.5e]");
    assert_eq!(parser.parse_unquoted_word(), "-1.5e");
    assert_eq!(parser.peek(), Some(b']'));
}

#[test]
fn test_position_and_context() {
    let mut parser = ByteParser::for_str("0123456789");
    parser.set_position(4);
    assert_eq!(parser.position(), 4);
    assert_eq!(parser.get_context_as_string(3), "456");
    assert_eq!(parser.get_context_as_string(100), "456789");
}
