use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement};

use pennote_core::{decode_note_file, encode_note_file, NoteFile, Session};

pub fn download_href(document: &Document, filename: &str, href: &str) {
    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() {
            anchor.set_href(href);
            anchor.set_download(filename);
            anchor.click();
        }
    }
}

pub fn export_png(document: &Document, canvas: &HtmlCanvasElement, session: &Session) {
    let Ok(href) = canvas.to_data_url() else {
        return;
    };
    download_href(document, &session.export_filename(), &href);
}

pub fn export_note(document: &Document, session: &Session) {
    let Ok(json) = encode_note_file(&session.export_note()) else {
        return;
    };
    let encoded = js_sys::encode_uri_component(&json);
    let href = format!("data:application/json;charset=utf-8,{encoded}");
    download_href(document, "note.json", &href);
}

pub fn parse_note_payload(text: &str) -> Option<NoteFile> {
    match decode_note_file(text) {
        Ok(note) => Some(note),
        Err(error) => {
            web_sys::console::warn_1(&format!("Ignoring note file: {error}").into());
            None
        }
    }
}
