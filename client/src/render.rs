use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlImageElement};

use pennote_core::{PageOp, Point, Stroke, SurfaceCmd};

use crate::state::State;

const TEXT_FONT: &str = "16px sans-serif";
const TEXT_BASELINE_OFFSET: f64 = 16.0;

pub fn apply_cmd(state: &State, cmd: &SurfaceCmd) {
    match cmd {
        SurfaceCmd::Dot { at, color, width } => draw_dot(&state.ctx, *at, color, *width),
        SurfaceCmd::Segment {
            from,
            to,
            color,
            width,
        } => draw_segment(&state.ctx, *from, *to, color, *width),
        SurfaceCmd::ClearRect { center, size } => clear_square(&state.ctx, *center, *size),
        SurfaceCmd::Text { at, content, color } => draw_text(&state.ctx, *at, content, color),
    }
}

pub fn draw_dot(ctx: &CanvasRenderingContext2d, at: Point, color: &str, width: f32) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(
        at.x as f64,
        at.y as f64,
        width as f64 / 2.0,
        0.0,
        std::f64::consts::PI * 2.0,
    );
    ctx.fill();
}

pub fn draw_segment(ctx: &CanvasRenderingContext2d, from: Point, to: Point, color: &str, width: f32) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width as f64);
    ctx.begin_path();
    ctx.move_to(from.x as f64, from.y as f64);
    ctx.line_to(to.x as f64, to.y as f64);
    ctx.stroke();
}

pub fn clear_square(ctx: &CanvasRenderingContext2d, center: Point, size: f32) {
    let size = size as f64;
    ctx.clear_rect(
        center.x as f64 - size / 2.0,
        center.y as f64 - size / 2.0,
        size,
        size,
    );
}

pub fn draw_text(ctx: &CanvasRenderingContext2d, at: Point, content: &str, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.set_font(TEXT_FONT);
    let _ = ctx.fill_text(content, at.x as f64, at.y as f64 + TEXT_BASELINE_OFFSET);
}

fn draw_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
    if stroke.points.is_empty() {
        return;
    }
    if stroke.points.len() == 1 {
        draw_dot(ctx, stroke.points[0], &stroke.color, stroke.width);
        return;
    }
    for i in 1..stroke.points.len() {
        draw_segment(
            ctx,
            stroke.points[i - 1],
            stroke.points[i],
            &stroke.color,
            stroke.width,
        );
    }
}

// Image decode is asynchronous and uncancelled; ops recorded after an image
// can paint before it lands and be painted over.
fn draw_image_fill(ctx: &CanvasRenderingContext2d, source: &str, width: f64, height: f64) {
    let Ok(img) = HtmlImageElement::new() else {
        return;
    };
    let ctx = ctx.clone();
    let img_cb = img.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        ctx.clear_rect(0.0, 0.0, width, height);
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &img_cb, 0.0, 0.0, width, height,
        );
    });
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    img.set_src(source);
}

pub fn replay(state: &State) {
    state
        .ctx
        .clear_rect(0.0, 0.0, state.surface_width, state.surface_height);
    for op in state.session.active_page().ops() {
        match op {
            PageOp::Stroke(stroke) => draw_stroke(&state.ctx, stroke),
            PageOp::Erase { size, points } => {
                for point in points {
                    clear_square(&state.ctx, *point, *size);
                }
            }
            PageOp::Text { at, content, color } => draw_text(&state.ctx, *at, content, color),
            PageOp::Image { source } => {
                draw_image_fill(&state.ctx, source, state.surface_width, state.surface_height);
            }
        }
    }
}
