//! Numeric literals.
//!
//! ```text
//! number           = sign? (unsigned_real | unsigned_integer)
//! unsigned_real    = digits ('.' digits)? (('e' | 'E') sign? digits)?
//! unsigned_integer = '%' [01]+ | '&' [0-7]+ | digits | '$' [0-9a-fA-F]+
//! ```
//!
//! An unsigned real with neither a fraction nor a scale factor is reported
//! as a decimal [`UnsignedInteger`], so `"123"` is an integer and `"1.5"`
//! and `"2e3"` are reals.

use crate::combinator::{Alternative, OrEmpty, Optional, Sequence, TokenParser};
use crate::primitive::{CharParser, PredicateParser, elementary, elementary_char};
use crate::token::{
    ElementaryKind, ElementaryToken, Fraction, NumberToken, Radix, ScaleFactor, UnsignedInteger,
    UnsignedNumber, UnsignedReal,
};

/// `+` or `-`.
pub fn sign() -> impl TokenParser<Output = ElementaryToken> + Send + Sync + 'static {
    Alternative::new(vec![
        CharParser::with('+', elementary_char(ElementaryKind::Sign)).boxed(),
        CharParser::with('-', elementary_char(ElementaryKind::Sign)).boxed(),
    ])
}

fn decimal_digits() -> impl TokenParser<Output = ElementaryToken> + Send + Sync + 'static {
    PredicateParser::new(
        |c: char| c.is_ascii_digit(),
        elementary(ElementaryKind::DecimalDigits),
    )
}

fn fraction(dot: ElementaryToken, digits: ElementaryToken) -> Fraction {
    Fraction { dot, digits }
}

fn scale_factor(
    marker: ElementaryToken,
    sign: OrEmpty<ElementaryToken>,
    digits: ElementaryToken,
) -> ScaleFactor {
    ScaleFactor {
        marker,
        sign: sign.into_option(),
        digits,
    }
}

fn real_or_integer(
    integer: ElementaryToken,
    fraction: OrEmpty<Fraction>,
    scale: OrEmpty<ScaleFactor>,
) -> UnsignedNumber {
    match (fraction.into_option(), scale.into_option()) {
        (None, None) => UnsignedNumber::Integer(UnsignedInteger::decimal(integer)),
        (fraction, scale) => UnsignedNumber::Real(UnsignedReal {
            integer,
            fraction,
            scale,
        }),
    }
}

/// Digits with an optional fraction and scale factor.
pub fn unsigned_real() -> impl TokenParser<Output = UnsignedNumber> + Send + Sync + 'static {
    let fraction = Sequence::new(
        (
            CharParser::with('.', elementary_char(ElementaryKind::Dot)),
            decimal_digits(),
        ),
        fraction,
    );
    let scale = Sequence::new(
        (
            Alternative::new(vec![
                CharParser::with('e', elementary_char(ElementaryKind::Scale)).boxed(),
                CharParser::with('E', elementary_char(ElementaryKind::Scale)).boxed(),
            ]),
            Optional::new(sign()),
            decimal_digits(),
        ),
        scale_factor,
    );
    Sequence::new(
        (decimal_digits(), Optional::new(fraction), Optional::new(scale)),
        real_or_integer,
    )
}

fn marked<P>(
    marker: char,
    kind: ElementaryKind,
    digits: P,
    radix: Radix,
) -> impl TokenParser<Output = UnsignedInteger> + Send + Sync + 'static
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    let digit_kind = match radix {
        Radix::Binary => ElementaryKind::BinaryDigits,
        Radix::Octal => ElementaryKind::OctalDigits,
        Radix::Decimal => ElementaryKind::DecimalDigits,
        Radix::Hexadecimal => ElementaryKind::HexDigits,
    };
    Sequence::new(
        (
            CharParser::with(marker, elementary_char(kind)),
            PredicateParser::new(digits, elementary(digit_kind)),
        ),
        move |marker: ElementaryToken, digits: ElementaryToken| {
            UnsignedInteger::with_marker(radix, marker, digits)
        },
    )
}

/// Binary (`%`), octal (`&`), decimal or hexadecimal (`$`) digits.
pub fn unsigned_integer() -> impl TokenParser<Output = UnsignedInteger> + Send + Sync + 'static {
    Alternative::new(vec![
        marked(
            '%',
            ElementaryKind::Percent,
            |c| matches!(c, '0' | '1'),
            Radix::Binary,
        )
        .boxed(),
        marked(
            '&',
            ElementaryKind::Ampersand,
            |c| matches!(c, '0'..='7'),
            Radix::Octal,
        )
        .boxed(),
        decimal_digits().map(UnsignedInteger::decimal).boxed(),
        marked(
            '$',
            ElementaryKind::Dollar,
            |c| c.is_ascii_hexdigit(),
            Radix::Hexadecimal,
        )
        .boxed(),
    ])
}

/// A signed or unsigned numeric literal.
///
/// ```rust
/// # use pasclex::{Source, TokenParser, UnsignedNumber, number, pos};
/// let tok = number().parse(&Source::new("-$FF"), pos!(0, 0, 0)).unwrap();
/// assert!(tok.is_negative());
/// match tok.number {
///     UnsignedNumber::Integer(i) => assert_eq!(i.value().unwrap(), 255),
///     UnsignedNumber::Real(_) => unreachable!(),
/// }
/// ```
pub fn number() -> impl TokenParser<Output = NumberToken> + Send + Sync + 'static {
    Sequence::new(
        (
            Optional::new(sign()),
            Alternative::new(vec![
                unsigned_real().boxed(),
                unsigned_integer().map(UnsignedNumber::Integer).boxed(),
            ]),
        ),
        |sign: OrEmpty<ElementaryToken>, number: UnsignedNumber| NumberToken {
            sign: sign.into_option(),
            number,
        },
    )
}
