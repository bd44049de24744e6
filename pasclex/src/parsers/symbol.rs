use crate::combinator::{Alternative, TokenParser};
use crate::primitive::{CharParser, PredicateParser, SymbolParser, elementary};
use crate::token::{ElementaryKind, ElementaryToken};

/// Two-character symbols, tried before any single character.
pub const DOUBLE_SYMBOLS: [&str; 17] = [
    "<<", ">>", "**", "<>", "><", "<=", ">=", ":=", "+=", "-=", "*=", "/=", "(*", "*)", "(.", ".)",
    "//",
];

/// Single-character symbols.
pub const SINGLE_SYMBOLS: [char; 24] = [
    '\'', '+', '-', '*', '/', '=', '<', '>', '[', ']', '.', ',', '(', ')', ':', ';', '^', '@', '{',
    '}', '$', '#', '&', '%',
];

/// Pascal special symbols; the longest form wins where two share a prefix.
///
/// ```rust
/// # use pasclex::{Source, TokenParser, special_symbol, pos};
/// let src = Source::new("x += 2");
/// assert_eq!(special_symbol().parse(&src, pos!(0, 2, 2)).unwrap().value.as_str(), "+=");
/// ```
pub fn special_symbol() -> impl TokenParser<Output = ElementaryToken> + Send + Sync + 'static {
    DOUBLE_SYMBOLS
        .into_iter()
        .map(|s| SymbolParser::new(s).boxed())
        .chain(SINGLE_SYMBOLS.into_iter().map(|c| CharParser::new(c).boxed()))
        .collect::<Alternative<ElementaryToken>>()
}

/// A maximal run of whitespace.
pub fn whitespace() -> impl TokenParser<Output = ElementaryToken> + Send + Sync + 'static {
    PredicateParser::new(char::is_whitespace, elementary(ElementaryKind::WhiteSpace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{Position, Source};
    use crate::pos;

    fn symbol_at(text: &str, offset: usize) -> Option<String> {
        let src = Source::new(text);
        special_symbol()
            .parse(&src, src.position_of(offset))
            .map(|t| t.value.to_string())
    }

    #[test]
    fn prefers_two_character_symbols() {
        assert_eq!(symbol_at("<< x", 0).as_deref(), Some("<<"));
        assert_eq!(symbol_at("< x", 0).as_deref(), Some("<"));
        assert_eq!(symbol_at("x += 2", 2).as_deref(), Some("+="));
        assert_eq!(symbol_at("x + 2", 2).as_deref(), Some("+"));
        assert_eq!(symbol_at("a := b", 2).as_deref(), Some(":="));
        assert_eq!(symbol_at("a..b", 1).as_deref(), Some("."));
        assert_eq!(symbol_at("// x", 0).as_deref(), Some("//"));
    }

    #[test]
    fn every_listed_symbol_is_recognised() {
        for s in DOUBLE_SYMBOLS {
            assert_eq!(symbol_at(s, 0).as_deref(), Some(s));
        }
        for c in SINGLE_SYMBOLS {
            assert_eq!(symbol_at(&c.to_string(), 0), Some(c.to_string()));
        }
    }

    #[test]
    fn semicolon_is_a_symbol() {
        assert_eq!(symbol_at("a;", 1).as_deref(), Some(";"));
        assert_eq!(symbol_at(";;", 0).as_deref(), Some(";"));
    }

    #[test]
    fn rejects_non_symbols() {
        assert!(symbol_at("a", 0).is_none());
        assert!(symbol_at("!", 0).is_none());
        assert!(symbol_at("+", 1).is_none());
    }

    #[test]
    fn symbol_end_position() {
        let src = Source::new("a\n<>");
        let tok = special_symbol().parse(&src, src.position_of(2)).unwrap();
        assert_eq!(tok.start, pos!(1, 0, 2));
        assert_eq!(tok.end, pos!(1, 1, 3));
    }

    #[test]
    fn whitespace_runs() {
        let src = Source::new("a \t\n b");
        let tok = whitespace().parse(&src, src.position_of(1)).unwrap();
        assert_eq!(tok.kind, ElementaryKind::WhiteSpace);
        assert_eq!(tok.value.as_str(), " \t\n ");
        assert_eq!(tok.end, pos!(1, 0, 4));
        assert!(whitespace().parse(&src, Position::default()).is_none());
    }
}
