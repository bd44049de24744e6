//! Nested comments.
//!
//! Three forms are recognised: `// ...` up to the end of the line, `(* ... *)`
//! and `{ ... }`. Any opener found inside a comment starts a nested comment,
//! parsed recursively and collected in source order. The nested comment is
//! handed the closing sequence of its enclosing comment:
//!
//! - A line comment nested in another comment ends just before that closer,
//!   or at the end of its own line. Inside a nested line comment, a further
//!   opener also ends it; the opener then belongs to the enclosing comment.
//! - A bracket comment fails if it meets the enclosing closer before its
//!   own. Inside a top-level line comment that closer is the newline, so a
//!   nested `{ ... }` or `(* ... *)` must close on the same line.
//! - A bracket comment without its closer before the end of the text fails.
//!   A line comment is terminated by the end of the text.

use crate::combinator::TokenParser;
use crate::cursor::{Position, Source, advance};
use crate::token::{CommentKind, CommentToken};

const KINDS: [CommentKind; 3] = [
    CommentKind::Line,
    CommentKind::CurlyBracket,
    CommentKind::RoundBracket,
];

/// Parses a comment of any of the three forms.
///
/// ```rust
/// # use pasclex::{CommentKind, CommentParser, Source, TokenParser, pos};
/// let src = Source::new("(* a { b } c *)");
/// let tok = CommentParser.parse(&src, pos!(0, 0, 0)).unwrap();
/// assert_eq!(tok.kind, CommentKind::RoundBracket);
/// assert_eq!(tok.nested.len(), 1);
/// assert_eq!(tok.nested[0].kind, CommentKind::CurlyBracket);
/// assert_eq!((tok.nested[0].start.offset, tok.nested[0].end.offset), (5, 9));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentParser;

impl TokenParser for CommentParser {
    type Output = CommentToken;

    fn parse(&self, src: &Source, at: Position) -> Option<CommentToken> {
        parse_comment(src, at, None)
    }
}

fn opener_at(src: &Source, offset: usize) -> Option<CommentKind> {
    KINDS
        .into_iter()
        .find(|kind| src.starts_with_at(offset, kind.opener()))
}

fn parse_comment(src: &Source, at: Position, parent_closer: Option<&'static str>) -> Option<CommentToken> {
    let kind = opener_at(src, at.offset)?;
    match kind {
        CommentKind::Line => parse_line(src, at, parent_closer),
        _ => parse_block(src, kind, at, parent_closer),
    }
}

fn finish(src: &Source, kind: CommentKind, at: Position, last: usize, nested: Vec<CommentToken>) -> CommentToken {
    CommentToken {
        kind,
        nested,
        start: at,
        end: advance(src, at, last),
    }
}

fn parse_line(src: &Source, at: Position, parent_closer: Option<&'static str>) -> Option<CommentToken> {
    let kind = CommentKind::Line;
    let mut nested = Vec::new();
    let mut i = at.offset + kind.opener().len();
    while i < src.len() {
        if opener_at(src, i).is_some() {
            if parent_closer.is_some() {
                return Some(finish(src, kind, at, i - 1, nested));
            }
            let child = parse_comment(src, advance(src, at, i), Some(kind.closer()))?;
            i = child.end.offset + 1;
            nested.push(child);
            continue;
        }
        if let Some(closer) = parent_closer {
            if src.starts_with_at(i, closer) {
                return Some(finish(src, kind, at, i - 1, nested));
            }
        }
        if src.starts_with_at(i, kind.closer()) {
            return Some(finish(src, kind, at, i, nested));
        }
        i += 1;
    }
    let last = src.len() - 1;
    Some(finish(src, kind, at, last, nested))
}

fn parse_block(
    src: &Source,
    kind: CommentKind,
    at: Position,
    parent_closer: Option<&'static str>,
) -> Option<CommentToken> {
    let closer = kind.closer();
    let mut nested = Vec::new();
    let mut i = at.offset + kind.opener().len();
    while i < src.len() {
        if opener_at(src, i).is_some() {
            let child = parse_comment(src, advance(src, at, i), Some(closer))?;
            i = child.end.offset + 1;
            nested.push(child);
            continue;
        }
        if src.starts_with_at(i, closer) {
            return Some(finish(src, kind, at, i + closer.chars().count() - 1, nested));
        }
        if parent_closer.is_some_and(|p| src.starts_with_at(i, p)) {
            log::trace!("{} comment at {} cut short at offset {}", kind.opener(), at, i);
            return None;
        }
        i += 1;
    }
    log::trace!("{} comment at {} not closed", kind.opener(), at);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    #[derive(Debug, PartialEq)]
    struct Shape(CommentKind, Vec<Shape>);

    fn shape(tok: &CommentToken) -> Shape {
        Shape(tok.kind, tok.nested.iter().map(shape).collect())
    }

    fn leaf(kind: CommentKind) -> Shape {
        Shape(kind, Vec::new())
    }

    fn parse(text: &str) -> Option<CommentToken> {
        CommentParser.parse(&Source::new(text), Position::default())
    }

    /// Parses `text` and checks that the comment spans all of it.
    fn parse_whole(text: &str) -> CommentToken {
        let src = Source::new(text);
        let tok = CommentParser.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.start, Position::default());
        assert_eq!(tok.end, src.position_of(src.len() - 1), "{text:?}");
        tok
    }

    #[test]
    fn line_comment_includes_newline() {
        let tok = parse_whole("// Some comment text\n");
        assert_eq!(tok.kind, CommentKind::Line);
        assert_eq!(tok.end, pos!(0, 20, 20));
    }

    #[test]
    fn line_comment_ends_at_eof() {
        assert_eq!(parse_whole("// Another text inside comment").kind, CommentKind::Line);
    }

    #[test]
    fn line_comment_stops_after_first_line() {
        let tok = parse("// one\ntwo").unwrap();
        assert_eq!(tok.end, pos!(0, 6, 6));
    }

    #[test]
    fn line_comment_with_nested_bracket_comments() {
        let tok = parse_whole("// Another text inside { Hello } some text, (* Nested 2 *) abc");
        assert_eq!(
            shape(&tok),
            Shape(
                CommentKind::Line,
                vec![leaf(CommentKind::CurlyBracket), leaf(CommentKind::RoundBracket)]
            )
        );
    }

    #[test]
    fn line_comment_with_nested_line_comment() {
        let tok = parse_whole("// Another text inside { Hello } some text, (* Nested 2 *) // abc");
        assert_eq!(
            shape(&tok),
            Shape(
                CommentKind::Line,
                vec![
                    leaf(CommentKind::CurlyBracket),
                    leaf(CommentKind::RoundBracket),
                    leaf(CommentKind::Line),
                ]
            )
        );
    }

    #[test]
    fn newline_inside_nested_bracket_of_line_comment_fails() {
        assert!(parse("// Hello world { Oops \n }").is_none());
        assert!(parse("// Hello world (* Oops \n )*").is_none());
    }

    #[test]
    fn unclosed_nested_bracket_of_line_comment_fails() {
        assert!(parse("// Some text (* Another text").is_none());
        assert!(parse("// More text { More text").is_none());
        assert!(parse("// Bye { (* Hello *) World").is_none());
    }

    #[test]
    fn round_comment_single_and_multi_line() {
        assert_eq!(parse_whole("(* What a great day today is *)").kind, CommentKind::RoundBracket);
        let tok = parse_whole("(*\n  Hello\n  it is me\n  how are you?\n*)");
        assert_eq!(tok.end, pos!(4, 1, 38));
    }

    #[test]
    fn round_comment_with_every_nested_form() {
        let text = [
            "(*",
            "  Some text { Hello",
            "              World }",
            "  Wow // it is me",
            "  how are you? (*",
            "  I am fine *)",
            "*)",
        ]
        .join("\n");
        let tok = parse_whole(&text);
        assert_eq!(
            shape(&tok),
            Shape(
                CommentKind::RoundBracket,
                vec![
                    leaf(CommentKind::CurlyBracket),
                    leaf(CommentKind::Line),
                    leaf(CommentKind::RoundBracket),
                ]
            )
        );
        // The nested line comment owns its newline.
        let line = &tok.nested[1];
        assert_eq!(line.start.line, 3);
        assert_eq!(line.end.line, 3);
        assert_eq!(src_char(&text, line.end.offset), '\n');
    }

    fn src_char(text: &str, offset: usize) -> char {
        Source::new(text).char_at(offset).unwrap()
    }

    #[test]
    fn curly_comment_single_and_multi_line() {
        assert_eq!(parse_whole("{ What a great day today is }").kind, CommentKind::CurlyBracket);
        parse_whole("{\n  I am fine!\n  And what about you?\n}");
    }

    #[test]
    fn nested_curly_inside_round() {
        let tok = parse_whole("(* a { b } c *)");
        assert_eq!(
            shape(&tok),
            Shape(CommentKind::RoundBracket, vec![leaf(CommentKind::CurlyBracket)])
        );
        assert_eq!(tok.nested[0].start, pos!(0, 5, 5));
        assert_eq!(tok.nested[0].end, pos!(0, 9, 9));
    }

    #[test]
    fn nested_line_comment_ends_before_parent_closer() {
        let tok = parse_whole("{ note // trailing }");
        assert_eq!(tok.nested.len(), 1);
        let line = &tok.nested[0];
        assert_eq!(line.kind, CommentKind::Line);
        assert_eq!(line.end, pos!(0, 18, 18));
    }

    #[test]
    fn opener_inside_nested_line_comment_belongs_to_parent() {
        let tok = parse_whole("(* // a { b } *)");
        assert_eq!(
            shape(&tok),
            Shape(
                CommentKind::RoundBracket,
                vec![leaf(CommentKind::Line), leaf(CommentKind::CurlyBracket)]
            )
        );
        assert_eq!(tok.nested[0].end, pos!(0, 7, 7));
    }

    #[test]
    fn bracket_comment_cut_short_by_parent_closer_fails() {
        assert!(parse("{ (* x } *)").is_none());
        assert!(parse("(* { x *) }").is_none());
    }

    #[test]
    fn unclosed_bracket_comment_fails() {
        assert!(parse("(* never closed").is_none());
        assert!(parse("{ { inner } outer").is_none());
    }

    #[test]
    fn deep_nesting() {
        let tok = parse_whole("{ (* { (* x *) } *) }");
        let mut depth = 0;
        let mut cur = &tok;
        while let Some(child) = cur.nested.first() {
            depth += 1;
            cur = child;
        }
        assert_eq!(depth, 3);
    }

    #[test]
    fn not_a_comment() {
        assert!(parse("/ x").is_none());
        assert!(parse("( x )").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn parses_from_middle_of_text() {
        let src = Source::new("x := 1; { set x }\ny");
        let at = src.position_of(8);
        let tok = CommentParser.parse(&src, at).unwrap();
        assert_eq!(tok.start, pos!(0, 8, 8));
        assert_eq!(tok.end, pos!(0, 16, 16));
    }
}
