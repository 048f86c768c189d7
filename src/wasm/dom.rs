use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use crate::error::{Result, SiteError};

pub fn query(root: &Document, selector: &str) -> Result<Option<Element>> {
    Ok(root.query_selector(selector)?)
}

pub fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_within(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn set_class(element: &Element, class: &str, on: bool) -> Result<()> {
    element.class_list().toggle_with_force(class, on)?;
    Ok(())
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<()> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

/// Appends a `<style>` block to `<head>`.
pub fn inject_style(document: &Document, css: &str) -> Result<()> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(css));
    let head = document
        .head()
        .ok_or_else(|| SiteError::MissingElement("head".to_owned()))?;
    head.append_child(&style)?;
    Ok(())
}

/// Registers `handler` for `event` on `target` for the life of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
