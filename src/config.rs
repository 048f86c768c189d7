//! Site-wide constants: selectors, page ids, timings and colours.
//!
//! Everything the browser glue looks up or schedules is read from a
//! [`SiteConfig`], so tests can shrink delays or point at other markup
//! without touching the wiring code.

use log::Level;

/// A one-shot `loaded` flag applied to a home-page region after a delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayedReveal {
    pub selector: &'static str,
    pub delay_ms: u32,
}

/// Notification lifecycle durations, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastTimings {
    /// Delay between insertion and the slide-in.
    pub enter_delay_ms: u32,
    /// Time spent fully on screen.
    pub hold_ms: u32,
    /// Length of the CSS transform transition.
    pub transition_ms: u32,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            hold_ms: 3000,
            transition_ms: 300,
        }
    }
}

/// IntersectionObserver parameters for the card reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub targets: &'static [&'static str],
    pub marker_class: &'static str,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px",
            targets: &[".skill-card", ".project-card", ".info-item"],
            marker_class: "animate-in",
        }
    }
}

/// Selectors for the markup the site is wired against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors {
    pub mobile_button: &'static str,
    pub mobile_panel: &'static str,
    pub nav_links: &'static str,
    pub pages: &'static str,
    pub contact_form_id: &'static str,
    pub form_fields: &'static str,
    pub canvas_id: &'static str,
    pub anchors: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            mobile_button: ".nav-mobile-btn",
            mobile_panel: ".nav-mobile",
            nav_links: ".nav-link",
            pages: ".page",
            contact_form_id: "contactForm",
            form_fields: "input, textarea",
            canvas_id: "scene3d",
            anchors: "a[href^=\"#\"]",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub default_page: &'static str,
    /// Attribute on each nav link naming the page it activates.
    pub page_attribute: &'static str,
    pub active_class: &'static str,
    pub loaded_class: &'static str,
    pub home_reveals: Vec<DelayedReveal>,
    pub toast: ToastTimings,
    pub reveal: RevealOptions,
    pub selectors: Selectors,
    pub log_level: Level,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_page: "home",
            page_attribute: "data-page",
            active_class: "active",
            loaded_class: "loaded",
            home_reveals: vec![
                DelayedReveal { selector: ".home-text", delay_ms: 500 },
                DelayedReveal { selector: ".scene-container", delay_ms: 800 },
                DelayedReveal { selector: ".photo-frame-desktop", delay_ms: 1100 },
            ],
            toast: ToastTimings::default(),
            reveal: RevealOptions::default(),
            selectors: Selectors::default(),
            log_level: Level::Info,
        }
    }
}
