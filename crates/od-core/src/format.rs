//! Document formatting: re-emit valid lines canonically.
//!
//! Unparsed lines are never touched. Reconciliation does not call this;
//! it backs an explicit "tidy" action in the host.

use crate::document::{LineStatus, split_lines, to_scene};
use crate::emitter::emit_shape;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for `format_document`.
#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    /// Move unparsed lines after all shapes, the same layout a canvas
    /// edit produces. Default: **false** (keep them in place).
    pub unparsed_last: bool,

    /// Drop empty lines. Default: **false**.
    pub drop_blank_lines: bool,
}

// ─── Pipeline ─────────────────────────────────────────────────────────────

/// Canonicalize every shape line of `text`.
///
/// The output is idempotent: `format_document(format_document(s, c), c) == format_document(s, c)`.
#[must_use]
pub fn format_document(text: &str, config: &FormatConfig) -> String {
    let doc = to_scene(text);
    let mut shapes = Vec::new();
    let mut others = Vec::new();

    for (raw, status) in split_lines(text).zip(&doc.lines) {
        match status {
            LineStatus::Parsed(index) => shapes.push(emit_shape(doc.scene.get(*index))),
            LineStatus::Blank if config.drop_blank_lines => {}
            LineStatus::Blank | LineStatus::Unparsed(_) => {
                if config.unparsed_last {
                    others.push(raw.to_string());
                } else {
                    shapes.push(raw.to_string());
                }
            }
        }
    }

    shapes.extend(others);
    shapes.join("\n")
}
