//! The Scene: ordered shapes, the single source of truth for what exists.
//!
//! Order is creation order, which is also stacking (z) order and
//! serialization order. Indices always come from the Scene itself, so an
//! out-of-range index means an invariant is broken; accessors panic.

use crate::model::Shape;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top of the stack and return the new shape's index.
    pub fn append(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Replace the shape at `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn replace(&mut self, index: usize, shape: Shape) {
        *self.get_mut(index) = shape;
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn get(&self, index: usize) -> &Shape {
        let len = self.shapes.len();
        self.shapes
            .get(index)
            .unwrap_or_else(|| panic!("scene index {index} out of range (len {len})"))
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn get_mut(&mut self, index: usize) -> &mut Shape {
        let len = self.shapes.len();
        self.shapes
            .get_mut(index)
            .unwrap_or_else(|| panic!("scene index {index} out of range (len {len})"))
    }

    pub fn try_get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// All shapes, bottom to top.
    pub fn all(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
