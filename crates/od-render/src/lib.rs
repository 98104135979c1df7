pub mod hit;
pub mod paint;
pub mod surface;

pub use paint::{paint_scene, paint_shape, resolve_style};
pub use surface::{DrawableSurface, Hits, ItemId, MemorySurface, RenderStyle};
