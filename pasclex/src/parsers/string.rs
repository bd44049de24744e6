use super::number::unsigned_integer;
use crate::combinator::{Alternative, Many, OrEmpty, Optional, Sequence, TokenParser};
use crate::primitive::{CharParser, PredicateParser, elementary, elementary_char};
use crate::token::{
    CharacterStringToken, ControlString, ElementaryKind, ElementaryToken, QuotedString,
    StringElement, UnsignedInteger,
};

fn quoted_element(
    open: ElementaryToken,
    body: OrEmpty<ElementaryToken>,
    close: ElementaryToken,
) -> StringElement {
    StringElement::Quoted(QuotedString {
        open,
        body: body.into_option(),
        close,
    })
}

fn control_element(hash: ElementaryToken, code: UnsignedInteger) -> StringElement {
    StringElement::Control(ControlString { hash, code })
}

/// One or more quoted segments (`'...'`) and control characters (`#13`,
/// `#$0A`) written back to back.
///
/// A quoted body runs to the next `'` and may span lines; `''` is an empty
/// segment, so `'a''b'` is two segments rather than an escaped quote.
///
/// ```rust
/// # use pasclex::{Source, TokenParser, character_string, pos};
/// let tok = character_string().parse(&Source::new("'Hi'#33"), pos!(0, 0, 0)).unwrap();
/// assert_eq!(tok.elements().len(), 2);
/// assert_eq!(tok.value().as_deref(), Some("Hi!"));
/// ```
pub fn character_string()
-> impl TokenParser<Output = CharacterStringToken> + Send + Sync + 'static {
    let quote = || CharParser::with('\'', elementary_char(ElementaryKind::SingleQuote));
    let quoted = Sequence::new(
        (
            quote(),
            Optional::new(PredicateParser::new(
                |c: char| c != '\'',
                elementary(ElementaryKind::StringBody),
            )),
            quote(),
        ),
        quoted_element,
    );
    let control = Sequence::new(
        (
            CharParser::with('#', elementary_char(ElementaryKind::Hash)),
            unsigned_integer(),
        ),
        control_element,
    );
    Many::new(
        Alternative::new(vec![quoted.boxed(), control.boxed()]),
        CharacterStringToken::new,
    )
}
