//! # Tokens
//!
//! The token model produced by the lexer. Tokens come in two flavours:
//!
//! - [`ElementaryToken`]: a leaf carrying the literal text it matched,
//!   classified by [`ElementaryKind`].
//! - compound tokens ([`NumberToken`], [`CharacterStringToken`],
//!   [`CommentToken`] and their parts): built from other tokens and carrying
//!   only structure. Their start and end are read off their first and last
//!   child, so the span of a compound token can never drift from the tokens
//!   it is made of.
//!
//! Every token implements [`Spanned`]. The top-level [`Token`] enum is what
//! the lexer driver emits.

use crate::cursor::{Position, Span};
use smartstring::alias::String;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

/// Anything covering an inclusive range of source text.
pub trait Spanned {
    /// Position of the first character covered.
    fn start(&self) -> Position;

    /// Position of the last character covered.
    fn end(&self) -> Position;

    fn span(&self) -> Span {
        Span::new(self.start(), self.end())
    }

    /// Zero-width placeholders (see [`OrEmpty`](crate::OrEmpty)) report
    /// `true`; scanning does not move past them.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Classification of an [`ElementaryToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementaryKind {
    SpecialSymbol,
    Identifier,
    WhiteSpace,
    /// `+` or `-` in front of a number or exponent.
    Sign,
    /// `e` or `E` introducing a scale factor.
    Scale,
    Dot,
    SingleQuote,
    Hash,
    StringBody,
    /// `%` binary marker.
    Percent,
    /// `&` octal marker.
    Ampersand,
    /// `$` hexadecimal marker.
    Dollar,
    BinaryDigits,
    OctalDigits,
    DecimalDigits,
    HexDigits,
}

impl ElementaryKind {
    /// Human-readable kind name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SpecialSymbol => "special symbol",
            Self::Identifier => "identifier",
            Self::WhiteSpace => "whitespace",
            Self::Sign => "sign",
            Self::Scale => "scale marker",
            Self::Dot => "dot",
            Self::SingleQuote => "single quote",
            Self::Hash => "hash",
            Self::StringBody => "string body",
            Self::Percent => "percent",
            Self::Ampersand => "ampersand",
            Self::Dollar => "dollar",
            Self::BinaryDigits => "binary digits",
            Self::OctalDigits => "octal digits",
            Self::DecimalDigits => "decimal digits",
            Self::HexDigits => "hex digits",
        }
    }
}

impl fmt::Display for ElementaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A leaf token carrying the text it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementaryToken {
    pub kind: ElementaryKind,
    pub value: String,
    pub start: Position,
    pub end: Position,
}

impl ElementaryToken {
    /// A token of `kind` spanning `start..=end`.
    pub fn new(kind: ElementaryKind, value: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    /// A one-character token at `at`.
    pub fn single(kind: ElementaryKind, c: char, at: Position) -> Self {
        let mut value = String::new();
        value.push(c);
        Self::new(kind, value, at, at)
    }
}

impl Spanned for ElementaryToken {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

/// `sign? (unsigned real | unsigned integer)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberToken {
    pub sign: Option<ElementaryToken>,
    pub number: UnsignedNumber,
}

impl NumberToken {
    /// Is the sign a `-`?
    pub fn is_negative(&self) -> bool {
        matches!(&self.sign, Some(s) if s.value.as_str() == "-")
    }
}

impl Spanned for NumberToken {
    fn start(&self) -> Position {
        match &self.sign {
            Some(sign) => sign.start,
            None => self.number.start(),
        }
    }
    fn end(&self) -> Position {
        self.number.end()
    }
}

/// An unsigned real or integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsignedNumber {
    Real(UnsignedReal),
    Integer(UnsignedInteger),
}

impl Spanned for UnsignedNumber {
    fn start(&self) -> Position {
        match self {
            Self::Real(r) => r.start(),
            Self::Integer(i) => i.start(),
        }
    }
    fn end(&self) -> Position {
        match self {
            Self::Real(r) => r.end(),
            Self::Integer(i) => i.end(),
        }
    }
}

/// `digits ('.' digits)? (('e'|'E') sign? digits)?`
///
/// A real with neither fraction nor scale factor is never produced by the
/// number parser; it is normalized to a decimal [`UnsignedInteger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedReal {
    pub integer: ElementaryToken,
    pub fraction: Option<Fraction>,
    pub scale: Option<ScaleFactor>,
}

impl UnsignedReal {
    /// Numeric value of the literal.
    pub fn value(&self) -> Result<f64, ParseFloatError> {
        let mut text = std::string::String::from(self.integer.value.as_str());
        if let Some(fraction) = &self.fraction {
            text.push('.');
            text.push_str(&fraction.digits.value);
        }
        if let Some(scale) = &self.scale {
            text.push('e');
            text.push_str(&scale.exponent());
        }
        text.parse()
    }
}

impl Spanned for UnsignedReal {
    fn start(&self) -> Position {
        self.integer.start
    }
    fn end(&self) -> Position {
        match (&self.scale, &self.fraction) {
            (Some(scale), _) => scale.end(),
            (None, Some(fraction)) => fraction.end(),
            (None, None) => self.integer.end,
        }
    }
}

/// `.` followed by digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fraction {
    pub dot: ElementaryToken,
    pub digits: ElementaryToken,
}

impl Spanned for Fraction {
    fn start(&self) -> Position {
        self.dot.start
    }
    fn end(&self) -> Position {
        self.digits.end
    }
}

/// `e` or `E`, an optional sign and digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleFactor {
    pub marker: ElementaryToken,
    pub sign: Option<ElementaryToken>,
    pub digits: ElementaryToken,
}

impl ScaleFactor {
    /// Signed exponent text, e.g. `"-3"` for `e-3`.
    pub fn exponent(&self) -> String {
        let mut s = String::new();
        if let Some(sign) = &self.sign {
            s.push_str(&sign.value);
        }
        s.push_str(&self.digits.value);
        s
    }
}

impl Spanned for ScaleFactor {
    fn start(&self) -> Position {
        self.marker.start
    }
    fn end(&self) -> Position {
        self.digits.end
    }
}

/// Radix of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    /// Numeric base.
    pub const fn base(&self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// The character that introduces a literal of this radix, if any.
    pub const fn marker(&self) -> Option<char> {
        match self {
            Self::Binary => Some('%'),
            Self::Octal => Some('&'),
            Self::Decimal => None,
            Self::Hexadecimal => Some('$'),
        }
    }

    /// The radix introduced by marker `c`.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '%' => Some(Self::Binary),
            '&' => Some(Self::Octal),
            '$' => Some(Self::Hexadecimal),
            _ => None,
        }
    }
}

/// An integer literal: an optional radix marker followed by digits.
///
/// Decimal integers have no marker; binary (`%`), octal (`&`) and
/// hexadecimal (`$`) integers always do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedInteger {
    pub radix: Radix,
    pub marker: Option<ElementaryToken>,
    pub digits: ElementaryToken,
}

impl UnsignedInteger {
    /// A decimal integer without a marker.
    pub fn decimal(digits: ElementaryToken) -> Self {
        Self {
            radix: Radix::Decimal,
            marker: None,
            digits,
        }
    }

    /// An integer introduced by a radix marker.
    pub fn with_marker(radix: Radix, marker: ElementaryToken, digits: ElementaryToken) -> Self {
        Self {
            radix,
            marker: Some(marker),
            digits,
        }
    }

    /// Numeric value of the digits in this literal's radix.
    pub fn value(&self) -> Result<u64, ParseIntError> {
        u64::from_str_radix(&self.digits.value, self.radix.base())
    }
}

impl Spanned for UnsignedInteger {
    fn start(&self) -> Position {
        match &self.marker {
            Some(marker) => marker.start,
            None => self.digits.start,
        }
    }
    fn end(&self) -> Position {
        self.digits.end
    }
}

/// A sequence of quoted segments and control characters, e.g.
/// `'Hello'#13#10'World'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterStringToken {
    elements: Vec<StringElement>,
}

impl CharacterStringToken {
    /// # Panics
    ///
    /// Panics if `elements` is empty; a character string has at least one
    /// element.
    pub fn new(elements: Vec<StringElement>) -> Self {
        assert!(!elements.is_empty(), "character string without elements");
        Self { elements }
    }

    /// Segments in source order.
    pub fn elements(&self) -> &[StringElement] {
        &self.elements
    }

    /// The decoded text, or `None` if a control code is not a valid `char`.
    pub fn value(&self) -> Option<std::string::String> {
        let mut out = std::string::String::new();
        for element in &self.elements {
            match element {
                StringElement::Quoted(q) => {
                    if let Some(body) = &q.body {
                        out.push_str(&body.value);
                    }
                }
                StringElement::Control(c) => {
                    let code = c.code.value().ok()?;
                    out.push(char::from_u32(u32::try_from(code).ok()?)?);
                }
            }
        }
        Some(out)
    }
}

impl Spanned for CharacterStringToken {
    fn start(&self) -> Position {
        self.elements[0].start()
    }
    fn end(&self) -> Position {
        self.elements[self.elements.len() - 1].end()
    }
}

/// One segment of a character string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringElement {
    Quoted(QuotedString),
    Control(ControlString),
}

impl Spanned for StringElement {
    fn start(&self) -> Position {
        match self {
            Self::Quoted(q) => q.start(),
            Self::Control(c) => c.start(),
        }
    }
    fn end(&self) -> Position {
        match self {
            Self::Quoted(q) => q.end(),
            Self::Control(c) => c.end(),
        }
    }
}

/// `'...'`; the body is absent for `''`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedString {
    pub open: ElementaryToken,
    pub body: Option<ElementaryToken>,
    pub close: ElementaryToken,
}

impl Spanned for QuotedString {
    fn start(&self) -> Position {
        self.open.start
    }
    fn end(&self) -> Position {
        self.close.end
    }
}

/// `#` followed by an unsigned integer character code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlString {
    pub hash: ElementaryToken,
    pub code: UnsignedInteger,
}

impl Spanned for ControlString {
    fn start(&self) -> Position {
        self.hash.start
    }
    fn end(&self) -> Position {
        self.code.end()
    }
}

/// The three comment forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...` up to and including the end of line.
    Line,
    /// `(* ... *)`
    RoundBracket,
    /// `{ ... }`
    CurlyBracket,
}

impl CommentKind {
    /// Text that opens the comment.
    pub const fn opener(&self) -> &'static str {
        match self {
            Self::Line => "//",
            Self::RoundBracket => "(*",
            Self::CurlyBracket => "{",
        }
    }

    /// Text that closes the comment.
    pub const fn closer(&self) -> &'static str {
        match self {
            Self::Line => "\n",
            Self::RoundBracket => "*)",
            Self::CurlyBracket => "}",
        }
    }
}

/// A comment together with the comments nested inside it, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToken {
    pub kind: CommentKind,
    pub nested: Vec<CommentToken>,
    pub start: Position,
    pub end: Position,
}

impl Spanned for CommentToken {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

/// A token emitted by the lexer driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Elementary(ElementaryToken),
    Number(NumberToken),
    CharacterString(CharacterStringToken),
    Comment(CommentToken),
}

impl Token {
    /// Is this a whitespace run?
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Elementary(e) if e.kind == ElementaryKind::WhiteSpace)
    }

    /// Kind name used in listings and errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Elementary(e) => e.kind.name(),
            Token::Number(_) => "number",
            Token::CharacterString(_) => "character string",
            Token::Comment(_) => "comment",
        }
    }
}

impl Spanned for Token {
    fn start(&self) -> Position {
        match self {
            Token::Elementary(t) => t.start(),
            Token::Number(t) => t.start(),
            Token::CharacterString(t) => t.start(),
            Token::Comment(t) => t.start(),
        }
    }
    fn end(&self) -> Position {
        match self {
            Token::Elementary(t) => t.end(),
            Token::Number(t) => t.end(),
            Token::CharacterString(t) => t.end(),
            Token::Comment(t) => t.end(),
        }
    }
}
