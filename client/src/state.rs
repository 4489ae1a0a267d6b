use wasm_bindgen::prelude::Closure;
use web_sys::{
    CanvasRenderingContext2d, FileReader, HtmlCanvasElement, HtmlInputElement, HtmlSpanElement,
    ProgressEvent,
};

use pennote_core::{Session, SwipeTracker};

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub session: Session,
    pub text_input: HtmlInputElement,
    pub page_current: HtmlSpanElement,
    pub page_total: HtmlSpanElement,
    pub surface_width: f64,
    pub surface_height: f64,
    pub drawing_pointer: Option<i32>,
    pub swipe: SwipeTracker,
    pub load_reader: Option<FileReader>,
    pub load_onload: Option<Closure<dyn FnMut(ProgressEvent)>>,
}
