//! Session model for the pennote sketching widget.
//!
//! Everything in this crate is plain in-memory state: pages, their operation
//! logs, undo/redo, tool and theme selection, swipe thresholding, and the
//! note file codec. The crate never touches a canvas or the DOM — the client
//! feeds it pointer coordinates and interprets the [`session::SurfaceCmd`]
//! values it hands back — so the whole model is testable natively.

pub mod geometry;
pub mod gesture;
pub mod note_format;
pub mod page;
pub mod session;
pub mod theme;

pub use geometry::Point;
pub use gesture::{SwipeDirection, SwipeTracker};
pub use note_format::{
    decode_note_file, encode_note_file, NoteFile, NoteFileError, NOTE_FILE_VERSION,
};
pub use page::{Page, PageOp, Stroke};
pub use session::{
    sanitize_color, sanitize_width, Session, SessionConfig, SurfaceCmd, TextArming, Tool,
    DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, SWIPE_THRESHOLD,
};
pub use theme::{Theme, THEME_STORAGE_KEY};
