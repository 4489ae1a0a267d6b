#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::geometry::Point;
use crate::note_format::{NoteFile, NOTE_FILE_VERSION};
use crate::page::{Page, PageOp, Stroke};
use crate::theme::Theme;

pub const DEFAULT_PEN_COLOR: &str = "#1f1f1f";
pub const DEFAULT_PEN_WIDTH: f32 = 2.0;
pub const MIN_PEN_WIDTH: f32 = 1.0;
pub const MAX_PEN_WIDTH: f32 = 60.0;
/// Minimum horizontal touch displacement that counts as a page swipe.
pub const SWIPE_THRESHOLD: f64 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
    Text,
}

/// Text placement state: armed by the toolbar, positioned by the next
/// surface click, committed on field blur. Only one placement is armed at a
/// time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextArming {
    Off,
    Armed,
    Placed { at: Point },
}

/// A paint primitive for the rendering layer.
///
/// The core never touches a canvas; it hands these back to whoever owns one
/// so in-progress gestures can be painted incrementally without a full
/// replay.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCmd {
    Dot {
        at: Point,
        color: String,
        width: f32,
    },
    Segment {
        from: Point,
        to: Point,
        color: String,
        width: f32,
    },
    ClearRect {
        center: Point,
        size: f32,
    },
    Text {
        at: Point,
        content: String,
        color: String,
    },
}

/// Tunable defaults for a new session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub pen_color: String,
    pub pen_width: f32,
    pub swipe_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pen_color: DEFAULT_PEN_COLOR.to_string(),
            pen_width: DEFAULT_PEN_WIDTH,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

pub fn sanitize_color(mut color: String) -> String {
    if color.is_empty() {
        return DEFAULT_PEN_COLOR.to_string();
    }
    if color.len() > 32 {
        color.truncate(32);
    }
    color
}

pub fn sanitize_width(width: f32) -> f32 {
    let width = if width.is_finite() {
        width
    } else {
        DEFAULT_PEN_WIDTH
    };
    width.max(MIN_PEN_WIDTH).min(MAX_PEN_WIDTH)
}

enum Pending {
    Stroke(Stroke),
    Erase { size: f32, points: Vec<Point> },
}

/// The in-memory aggregate for one running widget instance: all pages, their
/// histories, and the toolbar state.
///
/// Invariants: `pages` is never empty and `active` always indexes into it.
pub struct Session {
    pages: Vec<Page>,
    active: usize,
    tool: Tool,
    pen_color: String,
    pen_width: f32,
    theme: Theme,
    swipe_threshold: f64,
    pending: Option<Pending>,
    text: TextArming,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            pages: vec![Page::new()],
            active: 0,
            tool: Tool::Pen,
            pen_color: sanitize_color(config.pen_color),
            pen_width: sanitize_width(config.pen_width),
            theme: Theme::default(),
            swipe_threshold: config.swipe_threshold,
            pending: None,
            text: TextArming::Off,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Select the pen or eraser. Any armed text placement is dropped; use
    /// [`Session::arm_text`] to enter text mode.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == Tool::Text {
            self.arm_text();
            return;
        }
        self.finish_gesture();
        self.text = TextArming::Off;
        self.tool = tool;
    }

    pub fn pen_color(&self) -> &str {
        &self.pen_color
    }

    pub fn set_pen_color(&mut self, color: String) {
        self.pen_color = sanitize_color(color);
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    pub fn set_pen_width(&mut self, width: f32) {
        self.pen_width = sanitize_width(width);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn swipe_threshold(&self) -> f64 {
        self.swipe_threshold
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active]
    }

    /// Begin a gesture for the current tool. Returns the immediate paint
    /// feedback, or `None` when nothing should be drawn (text mode, a stray
    /// second pointer, non-finite input).
    pub fn pointer_down(&mut self, p: Point) -> Option<SurfaceCmd> {
        let p = p.normalized()?;
        if self.pending.is_some() {
            return None;
        }
        match self.tool {
            Tool::Text => None,
            Tool::Pen => {
                self.pages[self.active].clear_redo();
                let color = self.pen_color.clone();
                let width = self.pen_width;
                self.pending = Some(Pending::Stroke(Stroke {
                    color: color.clone(),
                    width,
                    points: vec![p],
                }));
                Some(SurfaceCmd::Dot {
                    at: p,
                    color,
                    width,
                })
            }
            Tool::Eraser => {
                self.pages[self.active].clear_redo();
                let size = self.pen_width;
                self.pending = Some(Pending::Erase {
                    size,
                    points: vec![p],
                });
                Some(SurfaceCmd::ClearRect { center: p, size })
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> Option<SurfaceCmd> {
        let p = p.normalized()?;
        match self.pending.as_mut()? {
            Pending::Stroke(stroke) => {
                let from = *stroke.points.last()?;
                stroke.points.push(p);
                Some(SurfaceCmd::Segment {
                    from,
                    to: p,
                    color: stroke.color.clone(),
                    width: stroke.width,
                })
            }
            Pending::Erase { size, points } => {
                points.push(p);
                Some(SurfaceCmd::ClearRect {
                    center: p,
                    size: *size,
                })
            }
        }
    }

    /// End the active gesture, committing it as one undoable op. Also used
    /// for pointer-cancel.
    pub fn pointer_up(&mut self) {
        self.finish_gesture();
    }

    fn finish_gesture(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let op = match pending {
            Pending::Stroke(stroke) => PageOp::Stroke(stroke),
            Pending::Erase { size, points } => PageOp::Erase { size, points },
        };
        self.pages[self.active].push(op);
    }

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        self.pages[self.active].undo()
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        self.pages[self.active].redo()
    }

    pub fn add_page(&mut self) {
        self.finish_gesture();
        self.pages.push(Page::new());
        self.active = self.pages.len() - 1;
    }

    pub fn next_page(&mut self) -> bool {
        if self.active + 1 >= self.pages.len() {
            return false;
        }
        self.finish_gesture();
        self.active += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.active == 0 {
            return false;
        }
        self.finish_gesture();
        self.active -= 1;
        true
    }

    pub fn arm_text(&mut self) {
        self.finish_gesture();
        self.tool = Tool::Text;
        self.text = TextArming::Armed;
    }

    pub fn text_arming(&self) -> TextArming {
        self.text
    }

    /// Record where the floating text field should appear. No-op unless a
    /// placement is armed and not yet positioned.
    pub fn place_text(&mut self, p: Point) -> Option<Point> {
        if self.text != TextArming::Armed {
            return None;
        }
        let p = p.normalized()?;
        self.text = TextArming::Placed { at: p };
        Some(p)
    }

    /// Rasterize the field's text at the recorded position using the pen
    /// color at commit time, then restore drawing mode. Empty content
    /// commits nothing.
    pub fn commit_text(&mut self, content: &str) -> Option<SurfaceCmd> {
        let at = match self.text {
            TextArming::Placed { at } => at,
            _ => {
                self.disarm_text();
                return None;
            }
        };
        self.disarm_text();
        if content.is_empty() {
            return None;
        }
        let color = self.pen_color.clone();
        let page = &mut self.pages[self.active];
        page.clear_redo();
        page.push(PageOp::Text {
            at,
            content: content.to_string(),
            color: color.clone(),
        });
        Some(SurfaceCmd::Text {
            at,
            content: content.to_string(),
            color,
        })
    }

    fn disarm_text(&mut self) {
        self.text = TextArming::Off;
        if self.tool == Tool::Text {
            self.tool = Tool::Pen;
        }
    }

    /// Record an imported image on the active page. Replay clears the
    /// surface and draws it scaled to the full surface dimensions.
    pub fn apply_image(&mut self, source: String) {
        self.finish_gesture();
        let page = &mut self.pages[self.active];
        page.clear_redo();
        page.push(PageOp::Image { source });
    }

    pub fn export_filename(&self) -> String {
        format!("page-{}.png", self.active + 1)
    }

    pub fn export_note(&self) -> NoteFile {
        NoteFile {
            version: NOTE_FILE_VERSION,
            pages: self.pages.iter().map(|page| page.ops().to_vec()).collect(),
        }
    }

    /// Replace every page with the contents of a decoded note file and make
    /// the first page active. An empty file yields a single blank page.
    pub fn adopt_note(&mut self, note: NoteFile) {
        self.pending = None;
        self.text = TextArming::Off;
        let mut pages: Vec<Page> = note.pages.into_iter().map(Page::from_ops).collect();
        if pages.is_empty() {
            pages.push(Page::new());
        }
        self.pages = pages;
        self.active = 0;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
