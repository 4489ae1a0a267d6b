use web_sys::{Document, Window};

use pennote_core::{Theme, THEME_STORAGE_KEY};

pub fn stored_theme(window: &Window) -> Option<Theme> {
    let storage = window.local_storage().ok()??;
    let value = storage.get_item(THEME_STORAGE_KEY).ok()??;
    Theme::from_name(&value)
}

pub fn store_theme(window: &Window, theme: Theme) {
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

pub fn apply_theme(document: &Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}
