//! Structured parse failures for shape lines.

use std::fmt;
use thiserror::Error;

/// The shape-line field a parser step was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X0,
    Y0,
    X1,
    Y1,
    OutlineThickness,
    OutlineColor,
    FillColor,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X0 => "x0",
            Self::Y0 => "y0",
            Self::X1 => "x1",
            Self::Y1 => "y1",
            Self::OutlineThickness => "outline thickness",
            Self::OutlineColor => "outline color",
            Self::FillColor => "fill color",
        })
    }
}

/// What went wrong on a line that is not a valid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unknown shape kind, expected `oval`")]
    UnknownKind,
    #[error("expected `<` before the coordinates")]
    ExpectedOpenBracket,
    #[error("expected a number for {0}")]
    ExpectedNumber(Field),
    #[error("expected whitespace before {0}")]
    MissingSeparator(Field),
    #[error("expected `>` after the coordinates")]
    ExpectedCloseBracket,
    #[error("expected a color for {0}")]
    ExpectedColor(Field),
    #[error("unexpected text after the fill color")]
    TrailingInput,
}

/// A grammar failure, with the char column where parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} (column {column})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, column: usize) -> Self {
        Self { kind, column }
    }
}
