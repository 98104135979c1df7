//! Integration tests: bidirectional sync engine (od-editor ↔ od-core ↔ od-render).
//!
//! Drives the SyncEngine with pointer events and buffer edits through the
//! headless surface and text area, and checks both panes after every step.

use od_core::model::{Bounds, Color, Point};
use od_editor::{
    EditorConfig, InputEvent, Interaction, MemoryTextArea, ScriptedPicker, SyncEngine, TextArea,
};
use od_render::MemorySurface;
use pretty_assertions::assert_eq;

type Engine = SyncEngine<MemorySurface, MemoryTextArea>;

const INCORRECT: &str = "incorrect";

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine(source: &str) -> Engine {
    init_logs();
    SyncEngine::from_text(
        MemorySurface::new(),
        MemoryTextArea::new(),
        EditorConfig::default(),
        source,
    )
}

fn drag(engine: &mut Engine, from: (f64, f64), steps: &[(f64, f64)]) {
    engine.handle_input(&InputEvent::down(from.0, from.1));
    for &(x, y) in steps {
        engine.handle_input(&InputEvent::moved(x, y));
    }
    let last = steps.last().copied().unwrap_or(from);
    engine.handle_input(&InputEvent::up(last.0, last.1));
}

fn surface_bounds(engine: &Engine) -> Vec<Bounds> {
    engine.surface().items().iter().map(|i| i.bounds).collect()
}

fn scene_bounds(engine: &Engine) -> Vec<Bounds> {
    engine.scene().iter().map(|s| s.bounds).collect()
}

// ─── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn scenario_move() {
    let mut e = engine("oval <0 0 10 10> 1 black white");
    let writes = e.text_area().write_count();

    let out = e.handle_input(&InputEvent::down(5.0, 5.0));
    assert_eq!(
        e.interaction(),
        Interaction::Moving {
            last: Point::new(5.0, 5.0),
            index: 0
        }
    );
    assert_eq!(out.mutations, 0);

    e.handle_input(&InputEvent::moved(8.0, 5.0));
    assert_eq!(e.scene().get(0).bounds, Bounds::new(3.0, 0.0, 13.0, 10.0));
    assert_eq!(surface_bounds(&e), vec![Bounds::new(3.0, 0.0, 13.0, 10.0)]);

    e.handle_input(&InputEvent::moved(8.0, 7.0));
    assert_eq!(e.scene().get(0).bounds, Bounds::new(3.0, 2.0, 13.0, 12.0));

    // Nothing is written until release.
    assert_eq!(e.text_area().write_count(), writes);

    let out = e.handle_input(&InputEvent::up(8.0, 7.0));
    assert!(out.scene_to_text.is_some());
    assert!(out.text_to_scene.is_some());
    assert_eq!(e.text_area().write_count(), writes + 1);
    assert_eq!(e.text_area().text(), "oval <3 2 13 12> 1 black white");
    assert!(e.interaction().is_idle());
}

#[test]
fn scenario_create() {
    let mut e = engine("");

    e.handle_input(&InputEvent::down(20.0, 20.0));
    assert_eq!(e.scene().len(), 1);
    assert_eq!(e.scene().get(0).bounds, Bounds::new(20.0, 20.0, 20.0, 20.0));
    assert_eq!(
        e.interaction(),
        Interaction::Creating {
            origin: Point::new(20.0, 20.0),
            index: 0
        }
    );

    e.handle_input(&InputEvent::moved(10.0, 30.0));
    assert_eq!(e.scene().get(0).bounds, Bounds::new(10.0, 20.0, 20.0, 30.0));
    assert_eq!(surface_bounds(&e), vec![Bounds::new(10.0, 20.0, 20.0, 30.0)]);

    let out = e.handle_input(&InputEvent::up(10.0, 30.0));
    assert_eq!(out.scene_to_text.map(|r| r.shapes), Some(1));
    assert_eq!(e.text_area().text(), "oval <10 20 20 30> 1 black white");
    assert_eq!(e.text_area().text().lines().count(), 1);
}

#[test]
fn drag_up_left_is_normalized() {
    let mut e = engine("");
    drag(&mut e, (50.0, 50.0), &[(10.0, 10.0)]);
    assert_eq!(e.scene().get(0).bounds, Bounds::new(10.0, 10.0, 50.0, 50.0));
    assert_eq!(e.text_area().text(), "oval <10 10 50 50> 1 black white");
}

#[test]
fn click_without_drag_creates_degenerate_shape() {
    let mut e = engine("");
    drag(&mut e, (7.0, 9.0), &[]);
    assert_eq!(e.text_area().text(), "oval <7 9 7 9> 1 black white");
    // It is still hittable through its outline.
    assert_eq!(e.hit_test(Point::new(7.0, 9.0)), Some(0));
}

#[test]
fn press_on_overlap_moves_topmost() {
    let mut e = engine("oval <0 0 20 20> 1 black white\noval <5 5 15 15> 1 black red");
    drag(&mut e, (10.0, 10.0), &[(30.0, 10.0)]);
    assert_eq!(
        scene_bounds(&e),
        vec![Bounds::new(0.0, 0.0, 20.0, 20.0), Bounds::new(25.0, 5.0, 35.0, 15.0)]
    );
}

// ─── Reconciliation rules ───────────────────────────────────────────────

#[test]
fn unparsed_line_survives_canvas_edit() {
    let mut e = engine("oval<0 0 10 10>1 black white\nnot a shape");
    drag(&mut e, (5.0, 5.0), &[(6.0, 6.0)]);
    assert_eq!(
        e.text_area().text(),
        "oval <1 1 11 11> 1 black white\nnot a shape"
    );
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![1]);
}

#[test]
fn unparsed_lines_move_after_all_shapes() {
    let mut e = engine(include_str!("fixtures/face.od"));
    assert_eq!(e.scene().len(), 4);
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![0, 4]);

    // Drag the left eye: topmost under the pointer, above the face.
    drag(&mut e, (32.5, 37.5), &[(37.5, 37.5), (42.5, 37.5)]);

    assert_eq!(
        e.text_area().text(),
        "oval <0 0 100 100> 2 black #ffe0bd\n\
         oval <35 30 50 45> 1 black white\n\
         oval <60 30 75 45> 1 black white\n\
         oval <35 65 65 80> 1 notacolor red\n\
         # sketch of a face\n\
         mouth goes here"
    );
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![4, 5]);
    assert_eq!(e.unparsed().len(), 2);
}

#[test]
fn unparsed_lines_persist_across_many_rewrites() {
    let mut e = engine("zzz\noval <0 0 10 10> 1 black white\n???");
    for step in 0..5 {
        let x = 5.0 + step as f64;
        drag(&mut e, (x, 5.0), &[(x + 1.0, 5.0)]);
    }
    drag(&mut e, (100.0, 100.0), &[(120.0, 120.0)]);
    assert_eq!(
        e.text_area().text(),
        "oval <5 0 15 10> 1 black white\noval <100 100 120 120> 1 black white\nzzz\n???"
    );
}

#[test]
fn unknown_color_renders_black_and_survives() {
    let mut e = engine("oval <0 0 10 10> notacolor");
    assert_eq!(e.scene().len(), 0, "missing fill is a parse failure");

    let mut e = engine("oval <0 0 10 10> 1 notacolor white");
    assert_eq!(e.scene().len(), 1);
    assert_eq!(e.surface().items()[0].style.outline, Color::BLACK);
    assert_eq!(e.surface().items()[0].style.fill, Color::WHITE);
    assert!(e.text_area().tagged_lines(INCORRECT).is_empty());

    drag(&mut e, (5.0, 5.0), &[(6.0, 5.0)]);
    assert_eq!(e.text_area().text(), "oval <1 0 11 10> 1 notacolor white");
    assert_eq!(e.scene().get(0).outline.as_str(), "notacolor");
}

#[test]
fn text_to_scene_is_idempotent() {
    let mut e = engine(include_str!("fixtures/face.od"));
    let first = e.text_to_scene();
    let scene1 = e.scene().clone();
    let tags1 = e.text_area().tagged_lines(INCORRECT);
    let items1: Vec<_> = e.surface().items().iter().map(|i| (i.bounds, i.style)).collect();

    let second = e.text_to_scene();
    assert_eq!(second, first);
    assert_eq!(e.scene(), &scene1);
    assert_eq!(e.text_area().tagged_lines(INCORRECT), tags1);
    let items2: Vec<_> = e.surface().items().iter().map(|i| (i.bounds, i.style)).collect();
    assert_eq!(items2, items1);
}

#[test]
fn commit_chain_terminates_after_one_round() {
    let mut e = engine("oval <0 0 10 10> 1 black white");
    drag(&mut e, (5.0, 5.0), &[(9.0, 9.0)]);
    let writes = e.text_area().write_count();
    // The echo was already drained; the host's late notification is a no-op.
    assert_eq!(e.content_changed(), None);
    assert_eq!(e.text_area().write_count(), writes);
}

#[test]
fn user_edit_rebuilds_canvas_and_tags() {
    let mut e = engine("oval <0 0 10 10> 1 black white\nbroken");
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![1]);

    e.text_area_mut().edit_line(1, "oval <20 20 30 30> 1 red blue");
    let report = e.content_changed().expect("edit should rebuild");
    assert_eq!(report.shapes, 2);
    assert!(report.incorrect_lines.is_empty());
    assert!(e.text_area().tagged_lines(INCORRECT).is_empty());
    assert_eq!(e.surface().len(), 2);

    e.text_area_mut().insert_line(0, "oval <0 0");
    let report = e.content_changed().unwrap();
    assert_eq!(report.incorrect_lines, vec![0]);
    assert_eq!(e.scene().len(), 2);
    // User edits never rewrite the buffer.
    assert_eq!(e.text_area().write_count(), 1);
}

#[test]
fn blank_lines_are_dropped_on_rewrite_but_never_tagged() {
    let mut e = engine("oval <0 0 10 10> 1 black white\n\n   \n");
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![2]);
    drag(&mut e, (5.0, 5.0), &[(5.0, 6.0)]);
    assert_eq!(e.text_area().text(), "oval <0 1 10 11> 1 black white\n   ");
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![1]);
}

// ─── Style state ────────────────────────────────────────────────────────

#[test]
fn picked_colors_apply_to_new_shapes_only() {
    let mut e = engine("oval <0 0 10 10> 1 black white");
    let mut picker = ScriptedPicker::new([Some("#ff0000"), Some("navy")]);
    assert!(e.pick_fill_color(&mut picker));
    assert!(e.pick_outline_color(&mut picker));

    drag(&mut e, (50.0, 50.0), &[(60.0, 70.0)]);
    assert_eq!(
        e.text_area().text(),
        "oval <0 0 10 10> 1 black white\noval <50 50 60 70> 1 navy #ff0000"
    );
    let top = &e.surface().items()[1];
    assert_eq!(top.style.fill, Color::from_token("#ff0000").unwrap());
}

#[test]
fn unreadable_picked_color_is_ignored_and_shape_survives() {
    let mut e = engine("");
    let mut picker = ScriptedPicker::new([Some("light blue")]);
    assert!(!e.pick_fill_color(&mut picker));
    assert_eq!(e.style().fill.as_str(), "white");

    drag(&mut e, (10.0, 10.0), &[(20.0, 20.0)]);
    assert_eq!(e.text_area().text(), "oval <10 10 20 20> 1 black white");
    assert_eq!(e.scene().len(), 1);
    assert_eq!(e.surface().len(), 1);
    assert!(e.text_area().tagged_lines(INCORRECT).is_empty());
}

// ─── Press without release ──────────────────────────────────────────────

#[test]
fn press_during_create_commits_then_starts_over() {
    let mut e = engine("junk");

    e.handle_input(&InputEvent::down(10.0, 10.0));
    e.handle_input(&InputEvent::moved(30.0, 20.0));
    assert_eq!(scene_bounds(&e), vec![Bounds::new(10.0, 10.0, 30.0, 20.0)]);
    assert_eq!(e.text_area().text(), "junk");

    // Second press with no release in between.
    let out = e.handle_input(&InputEvent::down(100.0, 100.0));
    assert!(out.scene_to_text.is_some());
    assert!(out.text_to_scene.is_some());
    assert_eq!(e.text_area().text(), "oval <10 10 30 20> 1 black white
junk");
    assert_eq!(
        scene_bounds(&e),
        vec![Bounds::new(10.0, 10.0, 30.0, 20.0), Bounds::new(100.0, 100.0, 100.0, 100.0)]
    );
    assert_eq!(surface_bounds(&e), scene_bounds(&e));
    assert_eq!(
        e.interaction(),
        Interaction::Creating {
            origin: Point::new(100.0, 100.0),
            index: 1
        }
    );

    e.handle_input(&InputEvent::moved(90.0, 120.0));
    assert_eq!(e.scene().get(1).bounds, Bounds::new(90.0, 100.0, 100.0, 120.0));
    assert_eq!(surface_bounds(&e), scene_bounds(&e));

    e.handle_input(&InputEvent::up(90.0, 120.0));
    assert_eq!(
        e.text_area().text(),
        "oval <10 10 30 20> 1 black white
oval <90 100 100 120> 1 black white
junk"
    );
    assert_eq!(e.text_area().tagged_lines(INCORRECT), vec![2]);
    assert!(e.interaction().is_idle());
}

#[test]
fn press_during_move_can_grab_the_moved_shape() {
    let mut e = engine("oval <0 0 10 10> 1 black white");

    e.handle_input(&InputEvent::down(5.0, 5.0));
    e.handle_input(&InputEvent::moved(25.0, 5.0));
    assert_eq!(scene_bounds(&e), vec![Bounds::new(20.0, 0.0, 30.0, 10.0)]);

    // Pressed again on the shape's new position: commit, then move it again.
    let out = e.handle_input(&InputEvent::down(25.0, 5.0));
    assert_eq!(out.mutations, 0);
    assert_eq!(e.text_area().text(), "oval <20 0 30 10> 1 black white");
    assert_eq!(
        e.interaction(),
        Interaction::Moving {
            last: Point::new(25.0, 5.0),
            index: 0
        }
    );

    e.handle_input(&InputEvent::moved(25.0, 15.0));
    assert_eq!(scene_bounds(&e), vec![Bounds::new(20.0, 10.0, 30.0, 20.0)]);
    assert_eq!(surface_bounds(&e), scene_bounds(&e));

    e.handle_input(&InputEvent::up(25.0, 15.0));
    assert_eq!(e.text_area().text(), "oval <20 10 30 20> 1 black white");
    assert_eq!(e.scene().len(), 1);
}

// ─── Long drags ─────────────────────────────────────────────────────────

#[test]
fn long_drag_on_pixel_grid_has_no_drift() {
    let mut e = engine("oval <0 0 10 10> 1 black white");
    let mut path = Vec::new();
    for i in 1..=500 {
        let t = i as f64;
        path.push((5.0 + (t * 0.37).sin().round() * 3.0 + t, 5.0 + (t % 7.0)));
    }
    let end = *path.last().unwrap();
    drag(&mut e, (5.0, 5.0), &path);

    let b = e.scene().get(0).bounds;
    assert_eq!((b.x0, b.y0), (end.0 - 5.0, end.1 - 5.0));
}

#[test]
fn long_drag_with_fractional_pointer_stays_locked() {
    let mut e = engine("oval <0 0 10 10> 1 black white");
    let path: Vec<(f64, f64)> = (1..=1000).map(|i| (5.0 + i as f64 * 0.1, 5.0 + i as f64 * 0.03)).collect();
    let end = *path.last().unwrap();
    drag(&mut e, (5.0, 5.0), &path);

    let b = e.scene().get(0).bounds;
    assert!((b.x0 - (end.0 - 5.0)).abs() < 1e-9, "x drifted: {b:?}");
    assert!((b.y0 - (end.1 - 5.0)).abs() < 1e-9, "y drifted: {b:?}");
}
