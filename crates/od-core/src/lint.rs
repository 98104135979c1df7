//! Line diagnostics for OD documents.
//!
//! Reports lines that are not shapes, and shapes whose colors a renderer
//! will not recognize. Never modifies the document.

use crate::document::{LineStatus, to_scene};
use crate::model::Color;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// The line is not a shape and will not be drawn.
    Error,
    /// Informational: the shape is drawn, with a fallback.
    Info,
}

/// A diagnostic spanning part of one buffer line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDiagnostic {
    /// Zero-based line number.
    pub line: usize,
    /// Char column where the span starts.
    pub start_col: usize,
    /// Char column where the span ends (exclusive).
    pub end_col: usize,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier.
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all rules over `text` and return diagnostics in line order.
#[must_use]
pub fn lint_document(text: &str) -> Vec<LineDiagnostic> {
    let doc = to_scene(text);
    let mut diags = Vec::new();

    for (line, (raw, status)) in text.split('\n').zip(&doc.lines).enumerate() {
        match status {
            LineStatus::Unparsed(error) => diags.push(LineDiagnostic {
                line,
                start_col: 0,
                end_col: raw.chars().count(),
                message: error.to_string(),
                severity: LintSeverity::Error,
                rule: "invalid-shape",
            }),
            LineStatus::Parsed(index) => {
                let shape = doc.scene.get(*index);
                for (role, token) in [("outline", shape.outline), ("fill", shape.fill)] {
                    if Color::from_token(token.as_str()).is_none() {
                        diags.push(LineDiagnostic {
                            line,
                            start_col: 0,
                            end_col: raw.chars().count(),
                            message: format!(
                                "Unrecognized {role} color `{token}`, drawn as black."
                            ),
                            severity: LintSeverity::Info,
                            rule: "unrecognized-color",
                        });
                    }
                }
            }
            LineStatus::Blank => {}
        }
    }

    diags
}
