#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod config;
pub mod error;
pub mod form;
pub mod geometry;
pub mod nav;
pub mod reveal;
pub mod scene;
pub mod schedule;
pub mod toast;
pub mod view;

pub use config::SiteConfig;
pub use error::{Result, SiteError};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Window};

    use crate::config::SiteConfig;
    use crate::error::SiteError;

    pub mod dom;
    pub mod form;
    pub mod nav;
    pub mod render;
    pub mod reveal;
    pub mod scroll;
    pub mod timer;
    pub mod toast;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = Rc::new(SiteConfig::default());
        console_log::init_with_level(config.log_level)
            .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;

        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let document = window.document().ok_or(SiteError::NoDocument)?;
        boot(&window, &document, config)?;
        Ok(())
    }

    /// Wires every behavior onto `document`. Parts whose elements are missing
    /// are skipped, so a stripped-down page still gets whatever it has.
    pub fn boot(window: &Window, document: &Document, config: Rc<SiteConfig>) -> crate::Result<()> {
        let scheduler = Rc::new(timer::BrowserScheduler::new(window.clone()));

        // Unstyled reveals still work, so a missing `<head>` is not fatal.
        if let Err(err) = dom::inject_style(document, &crate::reveal::stylesheet(&config.reveal)) {
            log::warn!("reveal styles not injected: {err}");
        }

        nav::install(window, document, Rc::clone(&config), Rc::clone(&scheduler))?;

        // The scene is decorative: without a canvas or WebGL2 the rest of the
        // site keeps working.
        match render::start(window, document, &config) {
            Ok(Some(handle)) => render::teardown_on_unload(window, handle)?,
            Ok(None) => log::debug!("no #{} canvas, 3D scene disabled", config.selectors.canvas_id),
            Err(err) => log::warn!("3D scene disabled: {err}"),
        }

        reveal::install(document, &config.reveal)?;
        form::install(document, Rc::clone(&config), Rc::clone(&scheduler))?;
        scroll::install(window, document, &config)?;

        log::info!("site ready");
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
