//! Composite token parsers for the Pascal-like token set.
//!
//! Each constructor returns a ready-to-use [`TokenParser`](crate::TokenParser).
//! The lexer driver combines them in the order
//! number, identifier, comment, character string, special symbol.

pub mod comment;
pub mod identifier;
pub mod number;
pub mod string;
pub mod symbol;

pub use comment::CommentParser;
pub use identifier::identifier;
pub use number::{number, sign, unsigned_integer, unsigned_real};
pub use string::character_string;
pub use symbol::{special_symbol, whitespace};
