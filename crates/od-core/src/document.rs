//! Whole-buffer conversion between text and `Scene`.
//!
//! Two pure functions, one per direction. `to_scene` never discards a
//! line: anything that fails to parse comes back as an `UnparsedLine`, and
//! `to_text` writes those lines after the shapes, verbatim and in their
//! original relative order.

use crate::emitter::emit_shape;
use crate::error::ParseError;
use crate::parser::{LineClass, classify_line};
use crate::scene::Scene;

/// Status of one buffer line after parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStatus {
    /// Parsed into the shape at this Scene index.
    Parsed(usize),
    /// Exactly empty.
    Blank,
    Unparsed(ParseError),
}

/// A non-empty line that is not a valid shape, carried through verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedLine {
    /// Zero-based line number in the buffer it was read from.
    pub line: usize,
    pub text: String,
    pub error: ParseError,
}

/// Result of parsing a full buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub scene: Scene,
    /// One entry per buffer line.
    pub lines: Vec<LineStatus>,
    pub unparsed: Vec<UnparsedLine>,
}

impl ParsedDocument {
    /// Line numbers that failed to parse.
    pub fn incorrect_lines(&self) -> Vec<usize> {
        self.unparsed.iter().map(|u| u.line).collect()
    }
}

/// Split a buffer into lines. Only `\n` separates lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

/// Parse every line of `text`, in order.
#[must_use]
pub fn to_scene(text: &str) -> ParsedDocument {
    let mut doc = ParsedDocument::default();
    for (line, raw) in split_lines(text).enumerate() {
        let status = match classify_line(raw) {
            LineClass::Shape(shape) => LineStatus::Parsed(doc.scene.append(shape)),
            LineClass::Blank => LineStatus::Blank,
            LineClass::Invalid(error) => {
                log::debug!("line {line} not a shape: {error}");
                doc.unparsed.push(UnparsedLine {
                    line,
                    text: raw.to_string(),
                    error,
                });
                LineStatus::Unparsed(error)
            }
        };
        doc.lines.push(status);
    }
    doc
}

/// The non-empty lines of `text` that fail to parse.
#[must_use]
pub fn unparsed_lines(text: &str) -> Vec<UnparsedLine> {
    to_scene(text).unparsed
}

/// Serialize shapes in Scene order, then the unparsed lines.
///
/// Lines are joined with `\n`; there is no trailing newline.
#[must_use]
pub fn to_text(scene: &Scene, unparsed: &[UnparsedLine]) -> String {
    let lines: Vec<String> = scene
        .iter()
        .map(emit_shape)
        .chain(unparsed.iter().map(|u| u.text.clone()))
        .collect();
    lines.join("\n")
}
