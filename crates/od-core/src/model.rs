//! Core data model for OD documents.
//!
//! A document is a flat, ordered list of shapes. Each shape is one line of
//! text and one item on the drawable surface; its identity is its position
//! in stacking order. Geometry is `f64` so pointer deltas are applied
//! exactly as the host delivers them.

use crate::token::ColorToken;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Named colors accepted by the reference palette (lowercase, RGB bytes).
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("gray", [190, 190, 190]),
    ("grey", [190, 190, 190]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("orange", [255, 165, 0]),
    ("purple", [160, 32, 240]),
    ("violet", [238, 130, 238]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("maroon", [176, 48, 96]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("teal", [0, 128, 128]),
    ("silver", [192, 192, 192]),
    ("gold", [255, 215, 0]),
    ("beige", [245, 245, 220]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("salmon", [250, 128, 114]),
    ("coral", [255, 127, 80]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("indigo", [75, 0, 130]),
    ("lavender", [230, 230, 250]),
    ("skyblue", [135, 206, 235]),
    ("steelblue", [70, 130, 180]),
    ("darkblue", [0, 0, 139]),
    ("darkgreen", [0, 100, 0]),
    ("darkred", [139, 0, 0]),
    ("lightblue", [173, 216, 230]),
    ("lightgreen", [144, 238, 144]),
    ("forestgreen", [34, 139, 34]),
    ("chocolate", [210, 105, 30]),
    ("tan", [210, 180, 140]),
    ("snow", [255, 250, 250]),
];

impl Color {
    /// Rendering fallback for tokens the surface does not recognize.
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Resolve a color token: a `#` hex form or a palette name.
    ///
    /// Returns `None` for syntactically valid but unrecognized tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.starts_with('#') {
            return Self::from_hex(token);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, rgb)| Self::from_bytes(*rgb))
    }

    /// Parse a hex color string with 1, 2, 3 or 4 digits per channel:
    /// `#RGB`, `#RRGGBB`, `#RRRGGGBBB`, `#RRRRGGGGBBBB`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        if bytes.is_empty() || bytes.len() % 3 != 0 || bytes.len() > 12 {
            return None;
        }

        let digits = bytes.len() / 3;
        let max = ((1u32 << (4 * digits)) - 1) as f32;
        let mut channels = [0.0f32; 3];
        for (channel, chunk) in channels.iter_mut().zip(bytes.chunks(digits)) {
            let mut value = 0u32;
            for &c in chunk {
                value = value << 4 | u32::from(hex_val(c)?);
            }
            *channel = value as f32 / max;
        }
        Some(Self::rgba(channels[0], channels[1], channels[2], 1.0))
    }

    /// Emit as a `#RRGGBB` string (alpha is ignored).
    pub fn to_hex(&self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A pointer position or box corner in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Two opposite corners of an axis-aligned box.
///
/// No ordering is enforced: `(x0, y0)` may lie to the right of or below
/// `(x1, y1)`. Use [`Bounds::normalized`] when an ordered box is needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A zero-size box at `p`.
    pub const fn at(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// The box spanning `a` and `b`, min corner first.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn normalized(&self) -> Self {
        Self::spanning(Point::new(self.x0, self.y0), Point::new(self.x1, self.y1))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// The primitive type of a shape. One keyword per grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Ellipse inscribed in the bounding box.
    Oval,
}

impl ShapeKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "oval" => Some(Self::Oval),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Oval => "oval",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One visual object: geometry plus style, exchanged between text and canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub bounds: Bounds,
    pub outline_thickness: f64,
    pub outline: ColorToken,
    pub fill: ColorToken,
}

impl Shape {
    pub fn new(
        kind: ShapeKind,
        bounds: Bounds,
        outline_thickness: f64,
        outline: ColorToken,
        fill: ColorToken,
    ) -> Self {
        Self {
            kind,
            bounds,
            outline_thickness,
            outline,
            fill,
        }
    }

    /// Convenience constructor interning both color tokens.
    pub fn oval(bounds: Bounds, outline_thickness: f64, outline: &str, fill: &str) -> Self {
        Self::new(
            ShapeKind::Oval,
            bounds,
            outline_thickness,
            ColorToken::intern(outline),
            ColorToken::intern(fill),
        )
    }
}
