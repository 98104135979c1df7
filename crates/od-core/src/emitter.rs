//! Emitter: `Shape` → OD text line.
//!
//! Produces the canonical form that round-trips through the parser:
//! `oval <x0 y0 x1 y1> thickness outline fill`.

use crate::model::Shape;
use std::fmt::Write;

/// Emit one shape as a single line (no trailing newline).
#[must_use]
pub fn emit_shape(shape: &Shape) -> String {
    let mut out = String::with_capacity(48);
    let b = &shape.bounds;
    let _ = write!(
        out,
        "{} <{} {} {} {}> {} {} {}",
        shape.kind.keyword(),
        format_num(b.x0),
        format_num(b.y0),
        format_num(b.x1),
        format_num(b.y1),
        format_num(shape.outline_thickness),
        shape.outline,
        shape.fill,
    );
    out
}

/// Shortest decimal that parses back to the same `f64`.
///
/// Integral values print without a fraction (`10`, not `10.0`) and no
/// exponent is ever produced, so the output stays inside the grammar.
fn format_num(n: f64) -> String {
    format!("{n}")
}
