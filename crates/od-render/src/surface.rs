//! The drawable surface: where shapes are displayed.
//!
//! The host toolkit owns the real canvas; the engine only talks to it
//! through `DrawableSurface`. `MemorySurface` is a headless implementation
//! used by tests and by hosts that render from a display list.

use crate::hit::shape_contains;
use od_core::model::{Bounds, Color, Point, ShapeKind};
use smallvec::SmallVec;
use std::fmt::Debug;

/// Concrete drawing attributes for one item. Colors are already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub outline: Color,
    pub fill: Color,
    pub outline_width: f32,
}

/// Candidate list returned by hit queries. Rarely more than a few items.
pub type Hits<H> = SmallVec<[H; 4]>;

/// Operations the engine needs from a host canvas.
pub trait DrawableSurface {
    /// Opaque item handle, valid until `delete_all`.
    type Handle: Copy + Eq + Debug;

    /// Create an item on top of the stack.
    fn create_shape(&mut self, kind: ShapeKind, bounds: Bounds, style: &RenderStyle) -> Self::Handle;

    fn move_shape(&mut self, handle: Self::Handle, dx: f64, dy: f64);

    fn set_shape_bounds(&mut self, handle: Self::Handle, bounds: Bounds);

    /// Items overlapping `point`, bottom to top.
    fn find_overlapping(&self, point: Point) -> Hits<Self::Handle>;

    fn delete_all(&mut self);

    /// Resolve a color token the way this surface would draw it.
    /// `None` means the surface does not know the color.
    fn recognizes_color(&self, token: &str) -> Option<Color> {
        Color::from_token(token)
    }
}

// ─── In-memory surface ───────────────────────────────────────────────────

/// Handle of an item on a `MemorySurface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// One drawn item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ShapeKind,
    pub bounds: Bounds,
    pub style: RenderStyle,
}

/// Display list kept in z-order. Ids are never reused, even across
/// `delete_all`, so a stale handle can never alias a new item.
#[derive(Debug, Default)]
pub struct MemorySurface {
    items: Vec<Item>,
    next_id: u32,
    clears: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items bottom to top.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How many times the surface has been wiped.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    fn item_mut(&mut self, id: ItemId) -> &mut Item {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .unwrap_or_else(|| panic!("no item {id:?} on surface"))
    }
}

impl DrawableSurface for MemorySurface {
    type Handle = ItemId;

    fn create_shape(&mut self, kind: ShapeKind, bounds: Bounds, style: &RenderStyle) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(Item {
            id,
            kind,
            bounds,
            style: *style,
        });
        id
    }

    fn move_shape(&mut self, handle: ItemId, dx: f64, dy: f64) {
        let item = self.item_mut(handle);
        item.bounds = item.bounds.translated(dx, dy);
    }

    fn set_shape_bounds(&mut self, handle: ItemId, bounds: Bounds) {
        self.item_mut(handle).bounds = bounds;
    }

    fn find_overlapping(&self, point: Point) -> Hits<ItemId> {
        self.items
            .iter()
            .filter(|item| {
                shape_contains(item.kind, item.bounds, f64::from(item.style.outline_width), point)
            })
            .map(|item| item.id)
            .collect()
    }

    fn delete_all(&mut self) {
        self.items.clear();
        self.clears += 1;
    }
}
