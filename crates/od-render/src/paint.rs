//! Scene → drawable-surface items.
//!
//! Resolves each shape's color tokens against the surface's palette. A
//! token the surface does not recognize is drawn black; the shape record
//! keeps the original token, so nothing is rewritten in the text.

use crate::surface::{DrawableSurface, RenderStyle};
use od_core::model::{Color, Shape};
use od_core::scene::Scene;
use od_core::token::ColorToken;

/// Drawing attributes for `shape` on `surface`.
pub fn resolve_style<S: DrawableSurface + ?Sized>(surface: &S, shape: &Shape) -> RenderStyle {
    RenderStyle {
        outline: resolve_color(surface, shape.outline),
        fill: resolve_color(surface, shape.fill),
        outline_width: shape.outline_thickness.max(0.0) as f32,
    }
}

fn resolve_color<S: DrawableSurface + ?Sized>(surface: &S, token: ColorToken) -> Color {
    surface.recognizes_color(token.as_str()).unwrap_or_else(|| {
        log::debug!("unrecognized color {token:?}, drawing as black");
        Color::BLACK
    })
}

/// Draw one shape on top of the stack.
pub fn paint_shape<S: DrawableSurface + ?Sized>(surface: &mut S, shape: &Shape) -> S::Handle {
    let style = resolve_style(surface, shape);
    surface.create_shape(shape.kind, shape.bounds, &style)
}

/// Draw every shape of `scene` bottom to top, returning handles in Scene
/// order.
pub fn paint_scene<S: DrawableSurface + ?Sized>(surface: &mut S, scene: &Scene) -> Vec<S::Handle> {
    scene.iter().map(|shape| paint_shape(surface, shape)).collect()
}
