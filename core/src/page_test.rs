use super::*;
use crate::geometry::Point;

fn stroke_op(x: f32) -> PageOp {
    PageOp::Stroke(Stroke {
        color: "#1f1f1f".to_string(),
        width: 2.0,
        points: vec![Point::new(x, 0.0), Point::new(x, 10.0)],
    })
}

#[test]
fn undo_moves_the_newest_op_to_redo() {
    let mut page = Page::new();
    page.push(stroke_op(0.0));
    page.push(stroke_op(1.0));
    assert!(page.undo());
    assert_eq!(page.ops(), &[stroke_op(0.0)]);
    assert!(page.can_redo());
}

#[test]
fn redo_replays_in_reverse_undo_order() {
    let mut page = Page::new();
    page.push(stroke_op(0.0));
    page.push(stroke_op(1.0));
    page.undo();
    page.undo();
    assert!(page.redo());
    assert_eq!(page.ops(), &[stroke_op(0.0)]);
    assert!(page.redo());
    assert_eq!(page.ops(), &[stroke_op(0.0), stroke_op(1.0)]);
    assert!(!page.redo());
}

#[test]
fn from_ops_starts_with_empty_redo() {
    let page = Page::from_ops(vec![stroke_op(0.0)]);
    assert!(!page.can_redo());
    assert!(page.can_undo());
}

#[test]
fn clear_redo_discards_undone_ops() {
    let mut page = Page::new();
    page.push(stroke_op(0.0));
    page.undo();
    page.clear_redo();
    assert!(!page.redo());
    assert!(page.is_blank());
}
