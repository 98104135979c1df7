//! Parser for the OD shape-line format → `Shape`.
//!
//! Built on `winnow` 0.7. One line describes one shape:
//!
//! ```text
//! oval <x0 y0 x1 y1> outline_thickness outline_color fill_color
//! ```
//!
//! Whitespace is free around the angle brackets and required between the
//! remaining tokens. Numbers are signed decimals (`-3`, `+4.25`); colors
//! are `#`-prefixed or bare word tokens. Color tokens are kept verbatim,
//! whether or not they name a known color.

use crate::error::{Field, ParseError, ParseErrorKind};
use crate::model::*;
use crate::token::ColorToken;
use winnow::ascii::digit1;
use winnow::combinator::opt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// How a single text line relates to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    Shape(Shape),
    /// The exactly-empty line. Neither a shape nor a failure.
    Blank,
    Invalid(ParseError),
}

/// Classify a line: shape, blank, or parse failure.
pub fn classify_line(line: &str) -> LineClass {
    if line.is_empty() {
        return LineClass::Blank;
    }
    match parse_line(line) {
        Ok(shape) => LineClass::Shape(shape),
        Err(err) => LineClass::Invalid(err),
    }
}

/// Parse one line into a `Shape`.
///
/// The empty line is reported as a failure here; callers that treat it as
/// blank should go through [`classify_line`].
pub fn parse_line(line: &str) -> Result<Shape, ParseError> {
    let mut cursor = Cursor::new(line);

    cursor.skip(whitespace);
    let kind_column = cursor.column();
    let keyword = cursor.next(parse_keyword, ParseErrorKind::UnknownKind)?;
    let kind = ShapeKind::from_keyword(keyword)
        .ok_or(ParseError::new(ParseErrorKind::UnknownKind, kind_column))?;

    cursor.skip(whitespace);
    cursor.next('<', ParseErrorKind::ExpectedOpenBracket)?;
    cursor.skip(whitespace);
    let x0 = cursor.number(Field::X0)?;
    cursor.separator(Field::Y0)?;
    let y0 = cursor.number(Field::Y0)?;
    cursor.separator(Field::X1)?;
    let x1 = cursor.number(Field::X1)?;
    cursor.separator(Field::Y1)?;
    let y1 = cursor.number(Field::Y1)?;
    cursor.skip(whitespace);
    cursor.next('>', ParseErrorKind::ExpectedCloseBracket)?;
    cursor.skip(whitespace);

    let outline_thickness = cursor.number(Field::OutlineThickness)?;
    cursor.separator(Field::OutlineColor)?;
    let outline = cursor.color(Field::OutlineColor)?;
    cursor.separator(Field::FillColor)?;
    let fill = cursor.color(Field::FillColor)?;
    cursor.skip(whitespace);

    if !cursor.rest.is_empty() {
        return Err(cursor.error(ParseErrorKind::TrailingInput));
    }

    Ok(Shape::new(
        kind,
        Bounds::new(x0, y0, x1, y1),
        outline_thickness,
        outline,
        fill,
    ))
}

/// Whether `token` is a whole color token: `#? word+`.
pub fn is_color_token(token: &str) -> bool {
    parse_color_token.parse(token).is_ok()
}

/// Whether `value` emits as a number the grammar reads back.
pub fn is_number(value: f64) -> bool {
    value.is_finite()
}

// ─── Cursor ─────────────────────────────────────────────────────────────

/// Runs winnow parsers step by step over one line, turning the first
/// failure into a `ParseError` positioned where that step started.
struct Cursor<'a> {
    line: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, rest: line }
    }

    fn column(&self) -> usize {
        self.line[..self.line.len() - self.rest.len()].chars().count()
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.column())
    }

    fn next<O>(
        &mut self,
        mut parser: impl Parser<&'a str, O, ErrMode<ContextError>>,
        kind: ParseErrorKind,
    ) -> Result<O, ParseError> {
        let checkpoint = self.rest;
        parser.parse_next(&mut self.rest).map_err(|_| {
            self.rest = checkpoint;
            self.error(kind)
        })
    }

    fn skip(&mut self, parser: impl Parser<&'a str, &'a str, ErrMode<ContextError>>) {
        // Optional whitespace cannot fail; the kind is never reported.
        let _ = self.next(parser, ParseErrorKind::TrailingInput);
    }

    /// One or more whitespace chars before `field`. At end of line the
    /// field itself is what's missing.
    fn separator(&mut self, field: Field) -> Result<(), ParseError> {
        if self.rest.is_empty() {
            return Err(self.error(missing(field)));
        }
        self.next(whitespace1, ParseErrorKind::MissingSeparator(field))
            .map(|_| ())
    }

    fn number(&mut self, field: Field) -> Result<f64, ParseError> {
        let column = self.column();
        let literal = self.next(parse_number_literal, ParseErrorKind::ExpectedNumber(field))?;
        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::new(ParseErrorKind::ExpectedNumber(field), column)),
        }
    }

    fn color(&mut self, field: Field) -> Result<ColorToken, ParseError> {
        self.next(parse_color_token, ParseErrorKind::ExpectedColor(field))
            .map(ColorToken::intern)
    }
}

fn missing(field: Field) -> ParseErrorKind {
    match field {
        Field::OutlineColor | Field::FillColor => ParseErrorKind::ExpectedColor(field),
        _ => ParseErrorKind::ExpectedNumber(field),
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn whitespace<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., |c: char| c.is_whitespace()).parse_next(input)
}

fn whitespace1<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_whitespace()).parse_next(input)
}

fn parse_keyword<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., is_word_char).parse_next(input)
}

/// `[+-]? digits ( . digits )?`, no exponent, no bare `.5` or `1.`.
fn parse_number_literal<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (opt(one_of(['+', '-'])), digit1, opt(('.', digit1)))
        .take()
        .parse_next(input)
}

/// `#? word+`
fn parse_color_token<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (opt('#'), take_while(1.., is_word_char))
        .take()
        .parse_next(input)
}
