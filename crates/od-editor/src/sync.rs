//! Bidirectional sync engine: canvas ↔ OD text.
//!
//! Each direction replaces one side wholesale from the other:
//!
//! - **Canvas → Text** (`scene_to_text`): after a gesture commits, every
//!   shape is re-serialized in Scene order and the lines that do not parse
//!   are appended after them, verbatim. The buffer is rewritten, never
//!   diffed.
//!
//! - **Text → Canvas** (`text_to_scene`): after any buffer change, the
//!   Scene and the surface are cleared and rebuilt from the lines that
//!   parse; the rest are tagged as incorrect and left alone.
//!
//! The only chain between the two is the one a commit starts: the rewrite
//! raises the text area's change notification, which the engine drains
//! with exactly one `text_to_scene`. That pass never writes text, so the
//! chain stops there.

use crate::config::EditorConfig;
use crate::input::InputEvent;
use crate::style::{ColorPicker, StyleState};
use crate::text::{TextArea, TextPos};
use crate::tools::{Interaction, SceneMutation, ShapeTool, ToolContext, ToolResponse};
use od_core::document::{UnparsedLine, to_scene, to_text, unparsed_lines};
use od_core::format::{FormatConfig, format_document};
use od_core::lint::{LineDiagnostic, lint_document};
use od_core::model::Point;
use od_core::parser::{is_color_token, is_number};
use od_core::scene::Scene;
use od_core::token::ColorToken;
use od_render::paint::{paint_scene, paint_shape};
use od_render::surface::DrawableSurface;

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Shapes in the Scene after the pass.
    pub shapes: usize,
    /// Lines that did not parse.
    pub unparsed: usize,
    /// Lines now tagged as incorrect, ascending.
    pub incorrect_lines: Vec<usize>,
}

/// What handling one input event did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
    /// Live mutations applied to the Scene and surface.
    pub mutations: usize,
    /// The Canvas → Text pass, if the event committed a gesture.
    pub scene_to_text: Option<SyncReport>,
    /// The Text → Canvas pass that rewrite triggered.
    pub text_to_scene: Option<SyncReport>,
}

/// The sync engine owns the Scene and keeps the surface and the text area
/// in step with it.
pub struct SyncEngine<S: DrawableSurface, T: TextArea> {
    /// Single source of truth for what exists.
    scene: Scene,
    /// Surface handle of each Scene shape, same order.
    handles: Vec<S::Handle>,
    /// Buffer lines that failed to parse in the last Text → Canvas pass.
    unparsed: Vec<UnparsedLine>,
    tool: ShapeTool,
    style: StyleState,
    config: EditorConfig,
    surface: S,
    text: T,
}

impl<S: DrawableSurface, T: TextArea> SyncEngine<S, T> {
    /// Create an engine over a host surface and text area, and render
    /// whatever the buffer already holds.
    pub fn new(surface: S, text: T, config: EditorConfig) -> Self {
        let mut engine = Self {
            scene: Scene::new(),
            handles: Vec::new(),
            unparsed: Vec::new(),
            tool: ShapeTool::new(),
            style: StyleState::from_config(&config),
            config,
            surface,
            text,
        };
        engine.text_to_scene();
        let _ = engine.text.take_content_changed();
        engine
    }

    /// Create an engine whose buffer starts as `source`.
    pub fn from_text(surface: S, mut text: T, config: EditorConfig, source: &str) -> Self {
        text.set_text(source);
        Self::new(surface, text, config)
    }

    // ─── Canvas → Text direction ─────────────────────────────────────────

    /// Feed one pointer event through the shape tool.
    ///
    /// Mutations are applied live. A committed gesture rewrites the text
    /// and then rebuilds the canvas from it once. A press that commits an
    /// unreleased gesture is dispatched again afterwards, against the
    /// rebuilt Scene.
    pub fn handle_input(&mut self, event: &InputEvent) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        let mut response = self.dispatch(event);
        if response.commit {
            outcome.scene_to_text = Some(self.scene_to_text());
            outcome.text_to_scene = self.drain_text_change();
            if matches!(event, InputEvent::PointerDown { .. }) {
                response = self.dispatch(event);
            }
        }
        for mutation in response.mutations {
            let adds = matches!(mutation, SceneMutation::AddShape { .. });
            self.apply_mutation(mutation);
            if let (true, Interaction::Creating { index, .. }) = (adds, self.tool.state()) {
                debug_assert_eq!(index + 1, self.scene.len(), "new shape landed off the tool's index");
            }
            outcome.mutations += 1;
        }
        outcome
    }

    fn dispatch(&mut self, event: &InputEvent) -> ToolResponse {
        let hit = match event {
            InputEvent::PointerDown { .. } => self.hit_test(event.position()),
            _ => None,
        };
        let ctx = ToolContext {
            hit,
            scene_len: self.scene.len(),
            style: &self.style,
        };
        self.tool.handle(event, &ctx)
    }

    /// Apply a Scene mutation and mirror it on the surface.
    pub fn apply_mutation(&mut self, mutation: SceneMutation) {
        match mutation {
            SceneMutation::AddShape { shape } => {
                let handle = paint_shape(&mut self.surface, &shape);
                self.scene.append(shape);
                self.handles.push(handle);
            }
            SceneMutation::SetBounds { index, bounds } => {
                let mut shape = self.scene.get(index).clone();
                shape.bounds = bounds;
                self.scene.replace(index, shape);
                self.surface.set_shape_bounds(self.handles[index], bounds);
            }
            SceneMutation::Translate { index, dx, dy } => {
                let shape = self.scene.get_mut(index);
                shape.bounds = shape.bounds.translated(dx, dy);
                self.surface.move_shape(self.handles[index], dx, dy);
            }
        }
        debug_assert_eq!(
            self.scene.len(),
            self.handles.len(),
            "scene and surface out of step"
        );
    }

    /// Rewrite the whole buffer from the Scene.
    ///
    /// Lines of the current buffer that do not parse are carried over
    /// after the shapes, in their original order.
    pub fn scene_to_text(&mut self) -> SyncReport {
        let carried = unparsed_lines(&self.text.text());
        let new_text = to_text(&self.scene, &carried);
        self.text.set_text(&new_text);

        let rewritten = to_scene(&new_text);
        let incorrect_lines =
            mark_incorrect_lines(&mut self.text, &self.config.incorrect_tag, &rewritten.unparsed);

        log::debug!(
            "scene → text: {} shapes, {} carried lines",
            self.scene.len(),
            carried.len()
        );
        SyncReport {
            shapes: self.scene.len(),
            unparsed: carried.len(),
            incorrect_lines,
        }
    }

    // ─── Text → Canvas direction ─────────────────────────────────────────

    /// Rebuild the Scene and the surface from the buffer, and re-tag the
    /// lines that do not parse. Idempotent.
    pub fn text_to_scene(&mut self) -> SyncReport {
        let text = self.text.text();

        self.scene.clear();
        self.handles.clear();
        self.surface.delete_all();

        let doc = to_scene(&text);
        self.handles = paint_scene(&mut self.surface, &doc.scene);
        self.scene = doc.scene;
        self.unparsed = doc.unparsed;

        let incorrect_lines =
            mark_incorrect_lines(&mut self.text, &self.config.incorrect_tag, &self.unparsed);

        log::debug!(
            "text → scene: {} shapes, {} unparsed lines",
            self.scene.len(),
            self.unparsed.len()
        );
        debug_assert_eq!(self.scene.len(), self.handles.len());
        SyncReport {
            shapes: self.scene.len(),
            unparsed: self.unparsed.len(),
            incorrect_lines,
        }
    }

    /// The host's content-changed hook. Rebuilds the canvas if the buffer
    /// changed since the last pass; a gesture in progress is abandoned
    /// because its Scene index may no longer exist.
    pub fn content_changed(&mut self) -> Option<SyncReport> {
        if !self.text.take_content_changed() {
            return None;
        }
        if !self.tool.state().is_idle() {
            log::debug!("buffer edited during {:?}, dropping gesture", self.tool.state());
            self.tool.reset();
        }
        Some(self.text_to_scene())
    }

    fn drain_text_change(&mut self) -> Option<SyncReport> {
        if self.text.take_content_changed() {
            Some(self.text_to_scene())
        } else {
            None
        }
    }

    /// Canonicalize the buffer's shape lines. Rebuilds the canvas only if
    /// the text actually changed.
    pub fn format_text(&mut self, config: &FormatConfig) -> Option<SyncReport> {
        let text = self.text.text();
        let formatted = format_document(&text, config);
        if formatted == text {
            return None;
        }
        self.text.set_text(&formatted);
        self.drain_text_change()
    }

    // ─── Style ───────────────────────────────────────────────────────────

    /// Ask the user for a new outline color. Returns `false` if cancelled
    /// or if the answer is not a color token the text could carry.
    pub fn pick_outline_color(&mut self, picker: &mut impl ColorPicker) -> bool {
        picker
            .pick_color(self.style.outline)
            .is_some_and(|token| self.set_outline_color(token))
    }

    /// Ask the user for a new fill color. Returns `false` if cancelled or
    /// if the answer is not a color token the text could carry.
    pub fn pick_fill_color(&mut self, picker: &mut impl ColorPicker) -> bool {
        picker
            .pick_color(self.style.fill)
            .is_some_and(|token| self.set_fill_color(token))
    }

    pub fn set_outline_color(&mut self, token: ColorToken) -> bool {
        let ok = accept_color(token);
        if ok {
            self.style.outline = token;
        }
        ok
    }

    pub fn set_fill_color(&mut self, token: ColorToken) -> bool {
        let ok = accept_color(token);
        if ok {
            self.style.fill = token;
        }
        ok
    }

    /// Negative values are kept (drawn without an outline); non-finite
    /// ones are refused.
    pub fn set_outline_thickness(&mut self, thickness: f64) -> bool {
        if !is_number(thickness) {
            log::debug!("refusing outline thickness {thickness}");
            return false;
        }
        self.style.outline_thickness = thickness;
        true
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Topmost Scene index whose item overlaps `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.surface
            .find_overlapping(point)
            .iter()
            .rev()
            .find_map(|h| self.handles.iter().position(|x| x == h))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn unparsed(&self) -> &[UnparsedLine] {
        &self.unparsed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn text_area(&self) -> &T {
        &self.text
    }

    /// For host-side edits; call `content_changed` afterwards.
    pub fn text_area_mut(&mut self) -> &mut T {
        &mut self.text
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn interaction(&self) -> Interaction {
        self.tool.state()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Diagnostics for the current buffer.
    pub fn diagnostics(&self) -> Vec<LineDiagnostic> {
        lint_document(&self.text.text())
    }
}

fn accept_color(token: ColorToken) -> bool {
    let ok = is_color_token(token.as_str());
    if !ok {
        log::debug!("refusing color {token:?}: not a color token");
    }
    ok
}

/// Clear `tag` and re-apply it to the full span of every unparsed line.
fn mark_incorrect_lines<T: TextArea>(text: &mut T, tag: &str, unparsed: &[UnparsedLine]) -> Vec<usize> {
    text.clear_tag(tag);
    for line in unparsed {
        let end = line.text.chars().count();
        text.tag_range(tag, TextPos::new(line.line, 0), TextPos::new(line.line, end));
    }
    unparsed.iter().map(|line| line.line).collect()
}
