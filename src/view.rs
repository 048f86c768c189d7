//! Declarative mapping from [`NavState`] to what the document should show.
//!
//! The browser glue never decides which classes to toggle by itself; it asks
//! for a [`NavView`] and applies it wholesale.

use crate::config::{DelayedReveal, SiteConfig};
use crate::nav::{NavChange, NavState};

pub const MENU_ICON_CLOSED: &str = "fas fa-bars";
pub const MENU_ICON_OPEN: &str = "fas fa-times";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavView {
    /// Section to mark active. `None` for unknown ids.
    pub active_section: Option<String>,
    /// Position of the one nav link to mark active: the first whose page id
    /// matches. `None` when no link targets the page.
    pub active_link: Option<usize>,
    pub mobile_menu_open: bool,
    pub menu_icon: &'static str,
}

impl NavView {
    /// `sections` are the ids of the page sections present in the document,
    /// `links` the page ids carried by the nav links.
    pub fn of<S, L>(state: &NavState, sections: &[S], links: &[L]) -> Self
    where
        S: AsRef<str>,
        L: AsRef<str>,
    {
        let current = state.current_page();
        Self {
            active_section: pick_from(current, sections),
            active_link: current
                .and_then(|page| links.iter().position(|link| link.as_ref() == page)),
            mobile_menu_open: state.is_mobile_menu_open(),
            menu_icon: menu_icon(state.is_mobile_menu_open()),
        }
    }

    /// Whether the section with `id` should carry the active class.
    pub fn shows_section(&self, id: &str) -> bool {
        self.active_section.as_deref() == Some(id)
    }

    pub fn highlights_link(&self, index: usize) -> bool {
        self.active_link == Some(index)
    }
}

fn pick_from<T: AsRef<str>>(current: Option<&str>, ids: &[T]) -> Option<String> {
    let page = current?;
    ids.iter()
        .map(|id| id.as_ref())
        .find(|id| *id == page)
        .map(str::to_owned)
}

pub fn menu_icon(open: bool) -> &'static str {
    if open {
        MENU_ICON_OPEN
    } else {
        MENU_ICON_CLOSED
    }
}

/// Staggered entrance effects owed by a page switch.
pub fn home_reveals<'a>(change: &NavChange, config: &'a SiteConfig) -> &'a [DelayedReveal] {
    if change.entered_home {
        &config.home_reveals
    } else {
        &[]
    }
}
