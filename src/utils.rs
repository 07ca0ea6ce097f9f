// src/utils.rs
use crate::error::ReaderError;
use gloo_utils::{document, window};

/// Pathname, query string and hash of the current location.
pub fn current_location() -> Result<(String, String, String), ReaderError> {
    let location = window().location();
    let dom = |e| ReaderError::Dom(format!("{:?}", e));
    Ok((
        location.pathname().map_err(dom)?,
        location.search().map_err(dom)?,
        location.hash().map_err(dom)?,
    ))
}

pub fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}

pub fn set_fragment(fragment: &str) {
    if let Err(e) = window().location().set_hash(fragment) {
        log::warn!("Failed to update location hash: {:?}", e);
    }
}

pub fn navigate(url: &str) {
    log::info!("Leaving reader for {}", url);
    if let Err(e) = window().location().set_href(url) {
        log::warn!("Failed to navigate to {}: {:?}", url, e);
    }
}

pub fn reload() {
    if let Err(e) = window().location().reload() {
        log::warn!("Failed to reload: {:?}", e);
    }
}

pub fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

/// The site serves an error page with an `a.error-btn` for chapters it no
/// longer shows. Only that page is taken over.
pub fn native_page_blocked() -> bool {
    matches!(document().query_selector("a.error-btn"), Ok(Some(_)))
}

/// Keeps the `cid` query on the native page's chapter links.
pub fn patch_native_chapter_links(comic_id: u64) {
    for id in ["prev_chapter", "next_chapter"] {
        let Some(link) = document().get_element_by_id(id) else {
            continue;
        };
        if let Some(href) = link.get_attribute("href") {
            let _ = link.set_attribute("href", &with_cid(&href, comic_id));
        }
    }
}

pub fn with_cid(href: &str, comic_id: u64) -> String {
    let separator = if href.contains('?') { '&' } else { '?' };
    format!("{}{}cid={}", href, separator, comic_id)
}

/// Stops the native page from loading further and empties it.
pub fn blank_page() -> Result<(), ReaderError> {
    window()
        .stop()
        .map_err(|e| ReaderError::Dom(format!("{:?}", e)))?;
    set_head_html("");
    document()
        .body()
        .ok_or_else(|| ReaderError::Dom("document has no body".to_string()))?
        .set_inner_html("");
    Ok(())
}

pub fn set_head_html(html: &str) {
    match document().head() {
        Some(head) => head.set_inner_html(html),
        None => log::warn!("Document has no head"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_cid() {
        assert_eq!(with_cid("/abc/12.shtml", 7), "/abc/12.shtml?cid=7");
        assert_eq!(with_cid("/abc/12.shtml?from=x", 7), "/abc/12.shtml?from=x&cid=7");
    }
}
