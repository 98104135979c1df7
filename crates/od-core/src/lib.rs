pub mod document;
pub mod emitter;
pub mod error;
pub mod format;
pub mod lint;
pub mod model;
pub mod parser;
pub mod scene;
pub mod token;

pub use document::{LineStatus, ParsedDocument, UnparsedLine, to_scene, to_text};
pub use error::{Field, ParseError, ParseErrorKind};
pub use format::{FormatConfig, format_document};
pub use lint::{LineDiagnostic, LintSeverity, lint_document};
pub use model::*;
pub use scene::Scene;
pub use token::ColorToken;
