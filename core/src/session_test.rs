#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::Point;
use crate::note_format::{NoteFile, NOTE_FILE_VERSION};
use crate::page::PageOp;

fn pt(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

fn session() -> Session {
    Session::default()
}

fn draw_stroke(session: &mut Session, from: Point, to: Point) {
    session.pointer_down(from);
    session.pointer_move(to);
    session.pointer_up();
}

// =============================================================
// Input -> surface mapping
// =============================================================

#[test]
fn new_session_has_one_blank_page() {
    let session = session();
    assert_eq!(session.page_count(), 1);
    assert_eq!(session.active_index(), 0);
    assert!(session.active_page().is_blank());
}

#[test]
fn pointer_down_returns_dot_feedback() {
    let mut session = session();
    let cmd = session.pointer_down(pt(10.0, 20.0));
    assert_eq!(
        cmd,
        Some(SurfaceCmd::Dot {
            at: pt(10.0, 20.0),
            color: DEFAULT_PEN_COLOR.to_string(),
            width: DEFAULT_PEN_WIDTH,
        })
    );
}

#[test]
fn pointer_move_returns_segment_from_last_point() {
    let mut session = session();
    session.pointer_down(pt(0.0, 0.0));
    let cmd = session.pointer_move(pt(5.0, 5.0));
    assert_eq!(
        cmd,
        Some(SurfaceCmd::Segment {
            from: pt(0.0, 0.0),
            to: pt(5.0, 5.0),
            color: DEFAULT_PEN_COLOR.to_string(),
            width: DEFAULT_PEN_WIDTH,
        })
    );
    let cmd = session.pointer_move(pt(9.0, 2.0));
    assert!(matches!(
        cmd,
        Some(SurfaceCmd::Segment { from, .. }) if from == pt(5.0, 5.0)
    ));
}

#[test]
fn pointer_move_without_down_is_noop() {
    let mut session = session();
    assert_eq!(session.pointer_move(pt(1.0, 1.0)), None);
    assert!(session.active_page().is_blank());
}

#[test]
fn non_finite_input_is_dropped() {
    let mut session = session();
    assert_eq!(session.pointer_down(pt(f32::NAN, 0.0)), None);
    session.pointer_down(pt(0.0, 0.0));
    assert_eq!(session.pointer_move(pt(f32::INFINITY, 1.0)), None);
    session.pointer_up();
    let ops = session.active_page().ops();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        PageOp::Stroke(stroke) => assert_eq!(stroke.points.len(), 1),
        other => panic!("expected stroke, got {other:?}"),
    }
}

#[test]
fn whole_gesture_commits_as_one_op() {
    let mut session = session();
    session.pointer_down(pt(0.0, 0.0));
    session.pointer_move(pt(1.0, 0.0));
    session.pointer_move(pt(2.0, 0.0));
    assert!(session.active_page().is_blank());
    session.pointer_up();
    assert_eq!(session.active_page().ops().len(), 1);
}

#[test]
fn eraser_gesture_is_one_op_with_pen_width_square() {
    let mut session = session();
    session.set_pen_width(12.0);
    session.set_tool(Tool::Eraser);
    let cmd = session.pointer_down(pt(4.0, 4.0));
    assert_eq!(
        cmd,
        Some(SurfaceCmd::ClearRect {
            center: pt(4.0, 4.0),
            size: 12.0,
        })
    );
    session.pointer_move(pt(6.0, 4.0));
    session.pointer_up();
    match &session.active_page().ops()[0] {
        PageOp::Erase { size, points } => {
            assert_eq!(*size, 12.0);
            assert_eq!(points.len(), 2);
        }
        other => panic!("expected erase, got {other:?}"),
    }
}

#[test]
fn second_pointer_down_mid_gesture_is_ignored() {
    let mut session = session();
    session.pointer_down(pt(0.0, 0.0));
    assert_eq!(session.pointer_down(pt(50.0, 50.0)), None);
    session.pointer_up();
    assert_eq!(session.active_page().ops().len(), 1);
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn n_strokes_then_n_undos_leaves_page_blank() {
    let mut session = session();
    for i in 0..3 {
        draw_stroke(&mut session, pt(i as f32, 0.0), pt(i as f32, 10.0));
    }
    assert_eq!(session.active_page().ops().len(), 3);
    for _ in 0..3 {
        assert!(session.undo());
    }
    assert!(session.active_page().is_blank());
    assert!(!session.undo());
}

#[test]
fn undo_then_redo_restores_exact_state() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(10.0, 10.0));
    draw_stroke(&mut session, pt(20.0, 0.0), pt(30.0, 10.0));
    let before = session.active_page().ops().to_vec();
    assert!(session.undo());
    assert_eq!(session.active_page().ops().len(), 1);
    assert!(session.redo());
    assert_eq!(session.active_page().ops(), &before[..]);
}

#[test]
fn new_stroke_after_undo_clears_redo() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(1.0, 1.0));
    assert!(session.undo());
    draw_stroke(&mut session, pt(2.0, 2.0), pt(3.0, 3.0));
    assert!(!session.redo());
    assert_eq!(session.active_page().ops().len(), 1);
}

#[test]
fn redo_is_invalidated_at_gesture_start() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(1.0, 1.0));
    assert!(session.undo());
    assert!(session.active_page().can_redo());
    session.pointer_down(pt(5.0, 5.0));
    assert!(!session.active_page().can_redo());
}

#[test]
fn undo_and_redo_on_empty_stacks_are_noops() {
    let mut session = session();
    assert!(!session.undo());
    assert!(!session.redo());
}

// =============================================================
// Page navigation
// =============================================================

#[test]
fn navigation_is_clamped_at_boundaries() {
    let mut session = session();
    assert!(!session.prev_page());
    assert!(!session.next_page());
    assert_eq!(session.active_index(), 0);
}

#[test]
fn add_page_appends_and_activates() {
    let mut session = session();
    session.add_page();
    assert_eq!(session.page_count(), 2);
    assert_eq!(session.active_index(), 1);
    assert!(session.active_page().is_blank());
}

#[test]
fn page_histories_are_independent() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(1.0, 1.0));
    session.add_page();
    draw_stroke(&mut session, pt(2.0, 2.0), pt(3.0, 3.0));
    assert!(session.undo());
    assert!(session.active_page().is_blank());
    assert!(session.prev_page());
    assert_eq!(session.active_page().ops().len(), 1);
    assert!(session.undo());
    assert!(session.active_page().is_blank());
}

#[test]
fn switching_pages_commits_the_active_gesture() {
    let mut session = session();
    session.pointer_down(pt(0.0, 0.0));
    session.pointer_move(pt(1.0, 1.0));
    session.add_page();
    assert_eq!(session.pages()[0].ops().len(), 1);
    assert!(session.active_page().is_blank());
}

#[test]
fn stroke_then_undo_then_add_page_scenario() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(10.0, 10.0));
    assert!(session.undo());
    assert!(session.active_page().is_blank());
    session.add_page();
    assert_eq!(session.page_count(), 2);
    assert_eq!(session.active_index(), 1);
}

// =============================================================
// Toolbar state
// =============================================================

#[test]
fn pen_width_is_clamped() {
    let mut session = session();
    session.set_pen_width(0.1);
    assert_eq!(session.pen_width(), MIN_PEN_WIDTH);
    session.set_pen_width(500.0);
    assert_eq!(session.pen_width(), MAX_PEN_WIDTH);
    session.set_pen_width(f32::NAN);
    assert_eq!(session.pen_width(), DEFAULT_PEN_WIDTH);
}

#[test]
fn empty_pen_color_falls_back_to_default() {
    let mut session = session();
    session.set_pen_color(String::new());
    assert_eq!(session.pen_color(), DEFAULT_PEN_COLOR);
    session.set_pen_color("#aabbcc".to_string());
    assert_eq!(session.pen_color(), "#aabbcc");
}

#[test]
fn theme_toggle_twice_returns_to_original() {
    let mut session = session();
    let original = session.theme();
    session.toggle_theme();
    assert_ne!(session.theme(), original);
    session.toggle_theme();
    assert_eq!(session.theme(), original);
}

#[test]
fn config_overrides_defaults() {
    let session = Session::new(SessionConfig {
        pen_color: "#112233".to_string(),
        pen_width: 9.0,
        swipe_threshold: 120.0,
    });
    assert_eq!(session.pen_color(), "#112233");
    assert_eq!(session.pen_width(), 9.0);
    assert_eq!(session.swipe_threshold(), 120.0);
}

// =============================================================
// Text annotation
// =============================================================

#[test]
fn text_flow_arms_places_and_commits() {
    let mut session = session();
    session.arm_text();
    assert_eq!(session.tool(), Tool::Text);
    assert_eq!(session.text_arming(), TextArming::Armed);
    assert_eq!(session.place_text(pt(40.0, 60.0)), Some(pt(40.0, 60.0)));
    let cmd = session.commit_text("hello");
    assert_eq!(
        cmd,
        Some(SurfaceCmd::Text {
            at: pt(40.0, 60.0),
            content: "hello".to_string(),
            color: DEFAULT_PEN_COLOR.to_string(),
        })
    );
    assert_eq!(session.tool(), Tool::Pen);
    assert_eq!(session.text_arming(), TextArming::Off);
    assert_eq!(session.active_page().ops().len(), 1);
}

#[test]
fn place_before_arming_is_noop() {
    let mut session = session();
    assert_eq!(session.place_text(pt(1.0, 1.0)), None);
    assert_eq!(session.text_arming(), TextArming::Off);
}

#[test]
fn empty_commit_applies_nothing_but_disarms() {
    let mut session = session();
    session.arm_text();
    session.place_text(pt(1.0, 1.0));
    assert_eq!(session.commit_text(""), None);
    assert_eq!(session.tool(), Tool::Pen);
    assert!(session.active_page().is_blank());
}

#[test]
fn commit_uses_pen_color_at_commit_time() {
    let mut session = session();
    session.arm_text();
    session.place_text(pt(1.0, 1.0));
    session.set_pen_color("#ff0000".to_string());
    match session.commit_text("note") {
        Some(SurfaceCmd::Text { color, .. }) => assert_eq!(color, "#ff0000"),
        other => panic!("expected text cmd, got {other:?}"),
    }
}

#[test]
fn rearming_restarts_placement() {
    let mut session = session();
    session.arm_text();
    session.place_text(pt(1.0, 1.0));
    session.arm_text();
    assert_eq!(session.text_arming(), TextArming::Armed);
}

#[test]
fn selecting_pen_disarms_text() {
    let mut session = session();
    session.arm_text();
    session.set_tool(Tool::Pen);
    assert_eq!(session.text_arming(), TextArming::Off);
    assert_eq!(session.commit_text("late"), None);
}

#[test]
fn text_is_undoable() {
    let mut session = session();
    session.arm_text();
    session.place_text(pt(1.0, 1.0));
    session.commit_text("hello");
    assert!(session.undo());
    assert!(session.active_page().is_blank());
    assert!(session.redo());
    assert_eq!(session.active_page().ops().len(), 1);
}

// =============================================================
// Import / export
// =============================================================

#[test]
fn imported_image_is_recorded_and_undoable() {
    let mut session = session();
    session.apply_image("data:image/png;base64,AAAA".to_string());
    assert_eq!(session.active_page().ops().len(), 1);
    assert!(session.undo());
    assert!(session.active_page().is_blank());
}

#[test]
fn import_clears_redo_history() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(1.0, 1.0));
    assert!(session.undo());
    session.apply_image("data:image/png;base64,AAAA".to_string());
    assert!(!session.redo());
}

#[test]
fn export_filename_is_one_based() {
    let mut session = session();
    assert_eq!(session.export_filename(), "page-1.png");
    session.add_page();
    assert_eq!(session.export_filename(), "page-2.png");
}

#[test]
fn note_export_and_adopt_round_trip() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(1.0, 1.0));
    session.add_page();
    session.arm_text();
    session.place_text(pt(2.0, 2.0));
    session.commit_text("second page");
    let note = session.export_note();
    assert_eq!(note.pages.len(), 2);

    let mut fresh = Session::default();
    fresh.adopt_note(note);
    assert_eq!(fresh.page_count(), 2);
    assert_eq!(fresh.active_index(), 0);
    assert_eq!(fresh.pages()[0].ops(), session.pages()[0].ops());
    assert_eq!(fresh.pages()[1].ops(), session.pages()[1].ops());
}

#[test]
fn adopting_an_empty_note_keeps_one_blank_page() {
    let mut session = session();
    draw_stroke(&mut session, pt(0.0, 0.0), pt(1.0, 1.0));
    session.adopt_note(NoteFile {
        version: NOTE_FILE_VERSION,
        pages: Vec::new(),
    });
    assert_eq!(session.page_count(), 1);
    assert!(session.active_page().is_blank());
}
