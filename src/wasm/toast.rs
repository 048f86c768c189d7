use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::dom;
use crate::config::ToastTimings;
use crate::error::{Result, SiteError};
use crate::schedule::Scheduler;
use crate::toast::{schedule_lifecycle, Notice, ToastPhase};

/// Inserts a notification at the top right and lets it play out.
/// Concurrent toasts overlap; nothing queues or deduplicates them.
pub fn present<S>(
    document: &Document,
    scheduler: &S,
    timings: &ToastTimings,
    notice: &Notice,
) -> Result<()>
where
    S: Scheduler + ?Sized,
{
    let body = document
        .body()
        .ok_or_else(|| SiteError::MissingElement("body".to_owned()))?;
    let element: HtmlElement = document.create_element("div")?.unchecked_into();
    element.set_class_name(&notice.severity.class_name());
    element.set_text_content(Some(&notice.message));

    let transition = format!("transform {}s ease", f64::from(timings.transition_ms) / 1000.0);
    dom::set_styles(
        &element,
        &[
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "1rem 1.5rem"),
            ("border-radius", "0.5rem"),
            ("color", "white"),
            ("font-weight", "600"),
            ("z-index", "1000"),
            ("transform", ToastPhase::Created.transform().unwrap_or_default()),
            ("transition", transition.as_str()),
            ("background", notice.severity.background()),
        ],
    )?;
    body.append_child(&element)?;

    schedule_lifecycle(scheduler, timings, move |phase| {
        let applied = match phase.transform() {
            Some(transform) => element.style().set_property("transform", transform),
            None => {
                element.remove();
                Ok(())
            }
        };
        if let Err(err) = applied {
            log::warn!("notification update failed: {err:?}");
        }
    })?;
    Ok(())
}
