use crate::combinator::TokenParser;
use crate::primitive::{DfaParser, DfaState, DfaTable, elementary};
use crate::token::{ElementaryKind, ElementaryToken};

const LETTER: usize = 0;
const UNDERSCORE: usize = 1;
const DIGIT: usize = 2;
const OTHER: usize = 3;

// Rows: 0 = nothing read, 1 = first character read, 2 = further characters.
const TABLE: DfaTable = &[
    &[
        DfaState::Terminal(1),
        DfaState::Terminal(1),
        DfaState::Dead,
        DfaState::Dead,
    ],
    &[
        DfaState::Terminal(2),
        DfaState::Terminal(2),
        DfaState::Terminal(2),
        DfaState::Dead,
    ],
    &[
        DfaState::Terminal(2),
        DfaState::Terminal(2),
        DfaState::Terminal(2),
        DfaState::Dead,
    ],
];

fn classify(c: char) -> usize {
    if c.is_alphabetic() {
        LETTER
    } else if c == '_' {
        UNDERSCORE
    } else if c.is_ascii_digit() {
        DIGIT
    } else {
        OTHER
    }
}

/// A letter or underscore followed by any number of letters, underscores and
/// digits.
///
/// ```rust
/// # use pasclex::{Source, TokenParser, identifier, pos};
/// let tok = identifier().parse(&Source::new("snake_case2 * 3"), pos!(0, 0, 0)).unwrap();
/// assert_eq!(tok.value.as_str(), "snake_case2");
/// assert!(identifier().parse(&Source::new("2x"), pos!(0, 0, 0)).is_none());
/// ```
pub fn identifier() -> impl TokenParser<Output = ElementaryToken> + Send + Sync + 'static {
    DfaParser::new(
        DfaState::NonTerminal(0),
        TABLE,
        classify,
        elementary(ElementaryKind::Identifier),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{Position, Source};
    use crate::pos;

    fn name_at(text: &str, offset: usize) -> Option<(String, Position)> {
        let src = Source::new(text);
        identifier()
            .parse(&src, src.position_of(offset))
            .map(|t| (t.value.to_string(), t.end))
    }

    #[test]
    fn matches_common_naming_styles() {
        assert_eq!(name_at("abc + x", 0).unwrap().0, "abc");
        assert_eq!(name_at("abc + x", 6).unwrap(), ("x".to_string(), pos!(0, 6, 6)));
        assert_eq!(name_at("_property + 2", 0).unwrap().0, "_property");
        assert_eq!(name_at("snake_case * 3 - 4", 0).unwrap().0, "snake_case");
        assert_eq!(name_at("camelCase - 12", 0).unwrap().0, "camelCase");
        assert_eq!(name_at("CapitalCamelCase- 130", 0).unwrap().0, "CapitalCamelCase");
    }

    #[test]
    fn matches_at_end_of_text() {
        assert_eq!(
            name_at("2 * SCREAMING_SNAKE_CASE", 4).unwrap(),
            ("SCREAMING_SNAKE_CASE".to_string(), pos!(0, 23, 23))
        );
        assert_eq!(name_at("235 + _some_name", 6).unwrap().0, "_some_name");
    }

    #[test]
    fn accepts_non_ascii_letters() {
        assert_eq!(name_at("größe := 1", 0).unwrap().0, "größe");
    }

    #[test]
    fn rejects_invalid_first_character() {
        assert!(name_at("+Hello", 0).is_none());
        assert!(name_at("#varow", 0).is_none());
        assert!(name_at("9lives", 0).is_none());
        assert!(name_at("", 0).is_none());
    }

    #[test]
    fn single_character_identifier() {
        let (name, end) = name_at("x", 0).unwrap();
        assert_eq!(name, "x");
        assert_eq!(end, pos!(0, 0, 0));
    }
}
