// src/preferences.rs
//
// Reader switches persisted in the site's own cookies, so they follow the
// site-wide settings.

use crate::error::ReaderError;
use crate::navigation::ReadingMode;
use gloo_utils::document;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub const DISPLAY_MODE: &str = "display_mode";
pub const IMG_FILTER: &str = "img_filter";

const FOREVER: &str = "expires=Fri, 31 Dec 9999 23:59:59 GMT; path=/";

pub fn parse_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `0` or nothing selects continuous mode; any other value the grid.
pub fn mode_from_cookie(value: Option<&str>) -> ReadingMode {
    match value.map(str::trim) {
        None | Some("") | Some("0") => ReadingMode::Continuous,
        Some(_) => ReadingMode::Paginated,
    }
}

pub fn mode_cookie_value(mode: ReadingMode) -> &'static str {
    match mode {
        ReadingMode::Continuous => "0",
        ReadingMode::Paginated => "1",
    }
}

pub fn cookie_assignment(name: &str, value: &str) -> String {
    format!("{}={}; {}", name, value, FOREVER)
}

fn html_document() -> Result<HtmlDocument, ReaderError> {
    document()
        .dyn_into::<HtmlDocument>()
        .map_err(|_| ReaderError::Dom("document is not an HTML document".to_string()))
}

fn read(name: &str) -> Option<String> {
    let cookies = html_document().ok()?.cookie().ok()?;
    parse_cookie(&cookies, name).map(str::to_string)
}

fn write(name: &str, value: &str) -> Result<(), ReaderError> {
    html_document()?
        .set_cookie(&cookie_assignment(name, value))
        .map_err(|e| ReaderError::Dom(format!("{:?}", e)))
}

/// Reading mode for this page load. An unset preference is persisted as
/// continuous.
pub fn reading_mode() -> ReadingMode {
    let stored = read(DISPLAY_MODE);
    let mode = mode_from_cookie(stored.as_deref());
    if stored.is_none() {
        if let Err(e) = set_reading_mode(mode) {
            log::warn!("Failed to persist reading mode: {}", e);
        }
    }
    mode
}

pub fn set_reading_mode(mode: ReadingMode) -> Result<(), ReaderError> {
    write(DISPLAY_MODE, mode_cookie_value(mode))
}

pub fn grayscale() -> bool {
    read(IMG_FILTER).as_deref() == Some("1")
}

pub fn set_grayscale(enabled: bool) -> Result<(), ReaderError> {
    write(IMG_FILTER, if enabled { "1" } else { "0" })
}
