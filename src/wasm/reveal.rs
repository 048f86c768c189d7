use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::dom;
use crate::config::RevealOptions;
use crate::error::Result;
use crate::reveal::{Intersection, RevealSet};

/// Observes every card matching the reveal targets and marks each one the
/// first time enough of it scrolls into view.
pub fn install(document: &Document, options: &RevealOptions) -> Result<()> {
    // One query so a card matching several targets is observed once.
    let cards: Vec<Element> = dom::query_all(document, &options.targets.join(", "))?;
    if cards.is_empty() {
        log::debug!("no reveal targets on this page");
        return Ok(());
    }

    let cards = Rc::new(cards);
    let revealed = Rc::new(RefCell::new(RevealSet::new(cards.len(), options)));
    let marker = options.marker_class;

    let callback = {
        let cards = Rc::clone(&cards);
        Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let Some(index) = cards.iter().position(|card| *card == target) else {
                    continue;
                };
                let hit = revealed.borrow_mut().observe(Intersection {
                    index,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });
                if hit.is_some() {
                    if let Err(err) = target.class_list().add_1(marker) {
                        log::warn!("reveal failed: {err:?}");
                    }
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(options.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for card in cards.iter() {
        observer.observe(card);
    }
    log::debug!("watching {} cards for reveal", cards.len());
    Ok(())
}
