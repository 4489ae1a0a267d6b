use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, FileReader, HtmlButtonElement, HtmlCanvasElement,
    HtmlInputElement, HtmlSpanElement, KeyboardEvent, PointerEvent, ProgressEvent,
};

use pennote_core::{Session, SessionConfig, SwipeDirection, SwipeTracker, TextArming, Tool};

use crate::dom::{
    event_to_point, get_element, hide_text_input, resize_canvas, set_canvas_cursor,
    set_tool_button, show_text_input, update_page_indicator, update_size_label,
};
use crate::persistence::{export_note, export_png, parse_note_payload};
use crate::render::{apply_cmd, replay};
use crate::state::State;
use crate::theme::{apply_theme, store_theme, stored_theme};

fn sync_tool_buttons(
    session: &Session,
    pen_button: &HtmlButtonElement,
    eraser_button: &HtmlButtonElement,
    text_button: &HtmlButtonElement,
) {
    set_tool_button(pen_button, session.tool() == Tool::Pen);
    set_tool_button(eraser_button, session.tool() == Tool::Eraser);
    set_tool_button(text_button, session.tool() == Tool::Text);
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    if document.ready_state() == "complete" {
        return start_app();
    }

    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "canvas")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let color_input: HtmlInputElement = get_element(&document, "colorPicker")?;
    let pen_button: HtmlButtonElement = get_element(&document, "penBtn")?;
    let eraser_button: HtmlButtonElement = get_element(&document, "eraserBtn")?;
    let text_button: HtmlButtonElement = get_element(&document, "textBtn")?;
    let size_input: HtmlInputElement = get_element(&document, "sizeInput")?;
    let size_value: HtmlSpanElement = get_element(&document, "sizeValue")?;
    let undo_button: HtmlButtonElement = get_element(&document, "undoBtn")?;
    let redo_button: HtmlButtonElement = get_element(&document, "redoBtn")?;
    let add_page_button: HtmlButtonElement = get_element(&document, "addPageBtn")?;
    let prev_page_button: HtmlButtonElement = get_element(&document, "prevPageBtn")?;
    let next_page_button: HtmlButtonElement = get_element(&document, "nextPageBtn")?;
    let save_button: HtmlButtonElement = get_element(&document, "saveBtn")?;
    let export_button: HtmlButtonElement = get_element(&document, "exportBtn")?;
    let load_button: HtmlButtonElement = get_element(&document, "loadBtn")?;
    let load_file: HtmlInputElement = get_element(&document, "loadInput")?;
    let text_input: HtmlInputElement = get_element(&document, "textInput")?;
    let theme_button: HtmlButtonElement = get_element(&document, "themeToggle")?;
    let page_current: HtmlSpanElement = get_element(&document, "currentPageNumber")?;
    let page_total: HtmlSpanElement = get_element(&document, "totalPages")?;

    let mut session = Session::new(SessionConfig {
        pen_color: color_input.value(),
        ..SessionConfig::default()
    });
    if let Some(theme) = stored_theme(&window) {
        session.set_theme(theme);
    }
    apply_theme(&document, session.theme());
    let swipe_threshold = session.swipe_threshold();

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        session,
        text_input: text_input.clone(),
        page_current,
        page_total,
        surface_width: 0.0,
        surface_height: 0.0,
        drawing_pointer: None,
        swipe: SwipeTracker::new(swipe_threshold),
        load_reader: None,
        load_onload: None,
    }));

    update_size_label(&size_input, &size_value);
    {
        let mut state = state.borrow_mut();
        if let Ok(width) = size_input.value().parse::<f32>() {
            state.session.set_pen_width(width);
        }
        resize_canvas(&window, &mut state);
        update_page_indicator(&state);
        set_canvas_cursor(&state.canvas, &state.session);
        sync_tool_buttons(&state.session, &pen_button, &eraser_button, &text_button);
    }

    {
        let resize_state = state.clone();
        let window_cb = window.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            let mut state = resize_state.borrow_mut();
            resize_canvas(&window_cb, &mut state);
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        let color_state = state.clone();
        let color_input_cb = color_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = color_state.borrow_mut();
            state.session.set_pen_color(color_input_cb.value());
        });
        color_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let size_state = state.clone();
        let size_input_cb = size_input.clone();
        let size_value_cb = size_value.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            update_size_label(&size_input_cb, &size_value_cb);
            if let Ok(width) = size_input_cb.value().parse::<f32>() {
                let mut state = size_state.borrow_mut();
                state.session.set_pen_width(width);
            }
        });
        size_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let tool_state = state.clone();
        let pen_button_cb = pen_button.clone();
        let eraser_button_cb = eraser_button.clone();
        let text_button_cb = text_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = tool_state.borrow_mut();
            state.session.set_tool(Tool::Pen);
            hide_text_input(&state.text_input);
            sync_tool_buttons(
                &state.session,
                &pen_button_cb,
                &eraser_button_cb,
                &text_button_cb,
            );
            set_canvas_cursor(&state.canvas, &state.session);
        });
        pen_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let tool_state = state.clone();
        let pen_button_cb = pen_button.clone();
        let eraser_button_cb = eraser_button.clone();
        let text_button_cb = text_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = tool_state.borrow_mut();
            state.session.set_tool(Tool::Eraser);
            hide_text_input(&state.text_input);
            sync_tool_buttons(
                &state.session,
                &pen_button_cb,
                &eraser_button_cb,
                &text_button_cb,
            );
            set_canvas_cursor(&state.canvas, &state.session);
        });
        eraser_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let tool_state = state.clone();
        let pen_button_cb = pen_button.clone();
        let eraser_button_cb = eraser_button.clone();
        let text_button_cb = text_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = tool_state.borrow_mut();
            state.session.arm_text();
            sync_tool_buttons(
                &state.session,
                &pen_button_cb,
                &eraser_button_cb,
                &text_button_cb,
            );
            set_canvas_cursor(&state.canvas, &state.session);
        });
        text_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let undo_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = undo_state.borrow_mut();
            if state.session.undo() {
                replay(&state);
            }
        });
        undo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let redo_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = redo_state.borrow_mut();
            if state.session.redo() {
                replay(&state);
            }
        });
        redo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let page_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = page_state.borrow_mut();
            state.session.add_page();
            replay(&state);
            update_page_indicator(&state);
        });
        add_page_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let page_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = page_state.borrow_mut();
            if state.session.prev_page() {
                replay(&state);
                update_page_indicator(&state);
            }
        });
        prev_page_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let page_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = page_state.borrow_mut();
            if state.session.next_page() {
                replay(&state);
                update_page_indicator(&state);
            }
        });
        next_page_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let save_state = state.clone();
        let document_cb = document.clone();
        let canvas_cb = canvas.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = save_state.borrow();
            export_png(&document_cb, &canvas_cb, &state.session);
        });
        save_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let export_state = state.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = export_state.borrow();
            export_note(&document_cb, &state.session);
        });
        export_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let theme_state = state.clone();
        let window_cb = window.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let theme = theme_state.borrow_mut().session.toggle_theme();
            apply_theme(&document_cb, theme);
            store_theme(&window_cb, theme);
        });
        theme_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let load_file_cb = load_file.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            load_file_cb.set_value("");
            load_file_cb.click();
        });
        load_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let load_file_cb = load_file.clone();
        let load_state = state.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let file = load_file_cb.files().and_then(|list| list.get(0));
            let Some(file) = file else {
                return;
            };
            let Ok(reader) = FileReader::new() else {
                return;
            };
            let is_image = file.type_().starts_with("image/");
            let state_onload = load_state.clone();
            let onload = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
                let text = event
                    .target()
                    .and_then(|target| target.dyn_into::<FileReader>().ok())
                    .and_then(|reader| reader.result().ok())
                    .and_then(|value| value.as_string());
                let mut state = state_onload.borrow_mut();
                if let Some(text) = text {
                    if is_image {
                        state.session.apply_image(text);
                        replay(&state);
                    } else if let Some(note) = parse_note_payload(&text) {
                        state.session.adopt_note(note);
                        replay(&state);
                        update_page_indicator(&state);
                    }
                }
                state.load_reader = None;
                state.load_onload = None;
            });
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            let started = if is_image {
                reader.read_as_data_url(&file)
            } else {
                reader.read_as_text(&file)
            };
            if started.is_err() {
                return;
            }
            let mut state = load_state.borrow_mut();
            state.load_reader = Some(reader);
            state.load_onload = Some(onload);
        });
        load_file.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let down_state = state.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let mut state = down_state.borrow_mut();
            if event.pointer_type() == "touch" {
                state.swipe.begin(event.client_x() as f64);
                return;
            }
            event.prevent_default();
            if state.session.text_arming() == TextArming::Armed {
                if let Some(point) = event_to_point(&state.canvas, &event) {
                    if state.session.place_text(point).is_some() {
                        show_text_input(
                            &state.text_input,
                            event.client_x() as f64,
                            event.client_y() as f64,
                        );
                    }
                }
                return;
            }
            let Some(point) = event_to_point(&state.canvas, &event) else {
                return;
            };
            if let Some(cmd) = state.session.pointer_down(point) {
                apply_cmd(&state, &cmd);
                let _ = state.canvas.set_pointer_capture(event.pointer_id());
                state.drawing_pointer = Some(event.pointer_id());
            }
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            if state.drawing_pointer != Some(event.pointer_id()) {
                return;
            }
            let Some(point) = event_to_point(&state.canvas, &event) else {
                return;
            };
            if let Some(cmd) = state.session.pointer_move(point) {
                apply_cmd(&state, &cmd);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for event_name in ["pointerup", "pointercancel"] {
        let up_state = state.clone();
        let cancelled = event_name == "pointercancel";
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = up_state.borrow_mut();
            if event.pointer_type() == "touch" {
                if cancelled {
                    state.swipe.cancel();
                    return;
                }
                let moved = match state.swipe.finish(event.client_x() as f64) {
                    Some(SwipeDirection::Next) => state.session.next_page(),
                    Some(SwipeDirection::Prev) => state.session.prev_page(),
                    None => false,
                };
                if moved {
                    replay(&state);
                    update_page_indicator(&state);
                }
                return;
            }
            if state.drawing_pointer == Some(event.pointer_id()) {
                state.drawing_pointer = None;
                state.session.pointer_up();
                let _ = state.canvas.release_pointer_capture(event.pointer_id());
            }
        });
        canvas.add_event_listener_with_callback(event_name, onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let ontouchmove = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
        });
        canvas
            .add_event_listener_with_callback("touchmove", ontouchmove.as_ref().unchecked_ref())?;
        ontouchmove.forget();
    }

    {
        let blur_state = state.clone();
        let pen_button_cb = pen_button.clone();
        let eraser_button_cb = eraser_button.clone();
        let text_button_cb = text_button.clone();
        let onblur = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = blur_state.borrow_mut();
            let content = state.text_input.value();
            if let Some(cmd) = state.session.commit_text(&content) {
                apply_cmd(&state, &cmd);
            }
            hide_text_input(&state.text_input);
            sync_tool_buttons(
                &state.session,
                &pen_button_cb,
                &eraser_button_cb,
                &text_button_cb,
            );
            set_canvas_cursor(&state.canvas, &state.session);
        });
        text_input.add_event_listener_with_callback("blur", onblur.as_ref().unchecked_ref())?;
        onblur.forget();
    }

    {
        let key_state = state.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if !(event.meta_key() || event.ctrl_key()) {
                return;
            }
            let mut state = key_state.borrow_mut();
            let applied = if event.shift_key() && key.eq_ignore_ascii_case("z") {
                state.session.redo()
            } else if key.eq_ignore_ascii_case("z") {
                state.session.undo()
            } else if key.eq_ignore_ascii_case("y") {
                state.session.redo()
            } else {
                return;
            };
            event.prevent_default();
            if applied {
                replay(&state);
            }
        });
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    Ok(())
}
