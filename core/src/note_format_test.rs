use super::*;
use crate::geometry::Point;
use crate::page::{PageOp, Stroke};

#[test]
fn encode_then_decode_preserves_pages() {
    let note = NoteFile {
        version: NOTE_FILE_VERSION,
        pages: vec![
            vec![PageOp::Stroke(Stroke {
                color: "#1f1f1f".to_string(),
                width: 2.0,
                points: vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)],
            })],
            vec![PageOp::Text {
                at: Point::new(10.0, 20.0),
                content: "hello".to_string(),
                color: "#ff0000".to_string(),
            }],
        ],
    };
    let text = encode_note_file(&note).unwrap();
    let back = decode_note_file(&text).unwrap();
    assert_eq!(back.version, NOTE_FILE_VERSION);
    assert_eq!(back.pages, note.pages);
}

#[test]
fn unknown_version_is_rejected() {
    let text = r#"{"version":9,"pages":[]}"#;
    match decode_note_file(text) {
        Err(NoteFileError::UnsupportedVersion(version)) => assert_eq!(version, 9),
        other => panic!("expected version error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(
        decode_note_file("not json"),
        Err(NoteFileError::Invalid(_))
    ));
}

#[test]
fn op_tags_are_stable() {
    let op = PageOp::Erase {
        size: 8.0,
        points: vec![Point::new(1.0, 2.0)],
    };
    let json = serde_json::to_string(&op).unwrap();
    assert!(json.contains(r#""type":"erase""#));
    let back: PageOp = serde_json::from_str(&json).unwrap();
    assert_eq!(back, op);
}
