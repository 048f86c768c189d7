use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, Window};

use super::dom;
use crate::config::SiteConfig;
use crate::error::Result;

/// In-page anchors scroll smoothly to their target instead of jumping.
/// Anchors that point at a whole page rewrite the fragment instead, so any
/// such link switches page even without the nav-link class.
pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Result<()> {
    let pages = config.selectors.pages;
    for anchor in dom::query_all(document, config.selectors.anchors)? {
        let window = window.clone();
        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            // `#` alone is not a valid selector.
            if href.len() < 2 {
                return;
            }
            let Ok(Some(target)) = document.query_selector(&href) else {
                return;
            };
            if target.matches(pages).unwrap_or(false) {
                if let Err(err) = window.location().set_hash(&href) {
                    log::warn!("could not switch to {href}: {err:?}");
                }
                return;
            }
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }
    Ok(())
}
