use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Event, FormData, HtmlElement, HtmlFormElement};

use super::{dom, toast, timer::BrowserScheduler};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::form::{submit, FieldStyle};

fn on_submit(
    event: &Event,
    form: &HtmlFormElement,
    document: &Document,
    config: &SiteConfig,
    scheduler: &BrowserScheduler,
) -> Result<()> {
    event.prevent_default();
    let data = FormData::new_with_form(form)?;
    let outcome = submit(|field| data.get(field).as_string());
    toast::present(document, scheduler, &config.toast, &outcome.notice)?;
    form.reset();
    Ok(())
}

fn restyle(event: &Event, style: FieldStyle) {
    let Some(field) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return;
    };
    let applied = dom::set_styles(
        &field,
        &[("border-color", style.border_color), ("box-shadow", style.box_shadow)],
    );
    if let Err(err) = applied {
        log::warn!("field styling failed: {err}");
    }
}

/// Intercepts the contact form and adds focus highlighting to its controls.
/// Pages without the form are left alone.
pub fn install(
    document: &Document,
    config: Rc<SiteConfig>,
    scheduler: Rc<BrowserScheduler>,
) -> Result<()> {
    let Some(element) = document.get_element_by_id(config.selectors.contact_form_id) else {
        log::debug!("no #{} form on this page", config.selectors.contact_form_id);
        return Ok(());
    };
    let Ok(form) = element.dyn_into::<HtmlFormElement>() else {
        log::warn!("#{} is not a form", config.selectors.contact_form_id);
        return Ok(());
    };

    for field in dom::query_within(&form, config.selectors.form_fields)? {
        dom::listen(&field, "focus", |event| restyle(&event, FieldStyle::focused()))?;
        dom::listen(&field, "blur", |event| restyle(&event, FieldStyle::blurred()))?;
    }

    let target = form.clone();
    let document = document.clone();
    dom::listen(&form, "submit", move |event| {
        if let Err(err) = on_submit(&event, &target, &document, &config, &scheduler) {
            log::error!("contact form: {err}");
        }
    })
}
