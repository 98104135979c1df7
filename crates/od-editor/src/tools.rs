//! Shape tool: pointer-driven creation and moving of shapes.
//!
//! The tool translates input events into `SceneMutation`s that the
//! `SyncEngine` applies live to the Scene and the surface. Releasing the
//! pointer commits the interaction, which is the engine's cue to rewrite
//! the text.
//!
//! | State | down(p) | move(p) | up |
//! |-------|---------|---------|----|
//! | `Idle` | hit: `Moving`; miss: add degenerate shape, `Creating` | no-op | no-op |
//! | `Creating` | commit, back to `Idle` | resize to span origin..p | commit |
//! | `Moving` | commit, back to `Idle` | translate by p - last | commit |
//!
//! A press that ends an unreleased gesture only commits it. The caller
//! applies the commit and then feeds the same press again, so the new
//! gesture starts from the Scene the commit produced.

use crate::input::InputEvent;
use crate::style::StyleState;
use od_core::model::*;
use smallvec::SmallVec;

/// A Scene change produced by the tool.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneMutation {
    /// Append a new shape on top.
    AddShape { shape: Shape },
    /// Replace a shape's bounding box.
    SetBounds { index: usize, bounds: Bounds },
    /// Translate a shape.
    Translate { index: usize, dx: f64, dy: f64 },
}

/// Where the tool is in a press-drag-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Drawing a new shape from `origin`; it lives at Scene `index`.
    Creating { origin: Point, index: usize },
    /// Dragging the shape at `index`; `last` is the previous pointer position.
    Moving { last: Point, index: usize },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What the tool needs to know about the world for one event.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// Topmost Scene index under the pointer (only consulted on press).
    pub hit: Option<usize>,
    /// Current Scene length; a new shape lands at this index.
    pub scene_len: usize,
    pub style: &'a StyleState,
}

/// The tool's reaction to one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolResponse {
    pub mutations: SmallVec<[SceneMutation; 2]>,
    /// A gesture ended: text must be rewritten from the Scene. A committing
    /// response never carries mutations.
    pub commit: bool,
}

#[derive(Debug, Default)]
pub struct ShapeTool {
    state: Interaction,
}

impl ShapeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Interaction {
        self.state
    }

    /// Drop any gesture in progress without committing it.
    pub fn reset(&mut self) {
        self.state = Interaction::Idle;
    }

    pub fn handle(&mut self, event: &InputEvent, ctx: &ToolContext<'_>) -> ToolResponse {
        let mut response = ToolResponse::default();
        let p = event.position();

        match (*event, self.state) {
            (InputEvent::PointerDown { .. }, Interaction::Creating { .. } | Interaction::Moving { .. }) => {
                // Release was never delivered; finish that gesture first.
                log::trace!("press while {:?}, committing", self.state);
                self.state = Interaction::Idle;
                response.commit = true;
            }
            (InputEvent::PointerDown { .. }, Interaction::Idle) => {
                self.state = match ctx.hit {
                    Some(index) => Interaction::Moving { last: p, index },
                    None => {
                        let shape = Shape::new(
                            ShapeKind::Oval,
                            Bounds::at(p),
                            ctx.style.outline_thickness,
                            ctx.style.outline,
                            ctx.style.fill,
                        );
                        response.mutations.push(SceneMutation::AddShape { shape });
                        Interaction::Creating {
                            origin: p,
                            index: ctx.scene_len,
                        }
                    }
                };
            }
            (InputEvent::PointerMove { .. }, Interaction::Creating { origin, index }) => {
                response.mutations.push(SceneMutation::SetBounds {
                    index,
                    bounds: Bounds::spanning(origin, p),
                });
            }
            (InputEvent::PointerMove { .. }, Interaction::Moving { last, index }) => {
                response.mutations.push(SceneMutation::Translate {
                    index,
                    dx: p.x - last.x,
                    dy: p.y - last.y,
                });
                self.state = Interaction::Moving { last: p, index };
            }
            (InputEvent::PointerUp { .. }, Interaction::Creating { .. } | Interaction::Moving { .. }) => {
                self.state = Interaction::Idle;
                response.commit = true;
            }
            (InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. }, Interaction::Idle) => {}
        }

        log::trace!("{event:?} -> {:?}", self.state);
        response
    }
}
