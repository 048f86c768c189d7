//! Hash-based page switching and the mobile menu.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, Event, Window};

use super::dom;
use super::timer::BrowserScheduler;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::nav::{parse_fragment, NavChange, NavState};
use crate::schedule::Scheduler;
use crate::view::{self, NavView};

struct Navigator {
    config: Rc<SiteConfig>,
    scheduler: Rc<BrowserScheduler>,
    window: Window,
    document: Document,
    state: RefCell<NavState>,
    sections: Vec<(String, Element)>,
    links: Vec<(String, Element)>,
    mobile_button: Option<Element>,
    mobile_panel: Option<Element>,
}

impl Navigator {
    fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|(id, _)| id.as_str()).collect()
    }

    fn link_pages(&self) -> Vec<&str> {
        self.links.iter().map(|(page, _)| page.as_str()).collect()
    }

    fn view(&self) -> NavView {
        NavView::of(&self.state.borrow(), &self.section_ids(), &self.link_pages())
    }

    /// Reads `location.hash` and switches page if it changed.
    fn sync_to_hash(&self) -> Result<()> {
        let hash = self.window.location().hash()?;
        let page = parse_fragment(&hash, self.config.default_page);
        let change = self.state.borrow_mut().navigate(page);
        if let Some(change) = change {
            log::debug!("navigating to #{}", change.page);
            self.render()?;
            self.schedule_home_reveals(&change)?;
        }
        Ok(())
    }

    fn render(&self) -> Result<()> {
        let view = self.view();
        let active = self.config.active_class;
        for (id, section) in &self.sections {
            dom::set_class(section, active, view.shows_section(id))?;
        }
        for (index, (_, link)) in self.links.iter().enumerate() {
            dom::set_class(link, active, view.highlights_link(index))?;
        }
        self.render_menu(&view)
    }

    fn render_menu(&self, view: &NavView) -> Result<()> {
        if let Some(panel) = &self.mobile_panel {
            dom::set_class(panel, self.config.active_class, view.mobile_menu_open)?;
        }
        if let Some(icon) = self
            .mobile_button
            .as_ref()
            .map(|button| button.query_selector("i"))
            .transpose()?
            .flatten()
        {
            icon.set_class_name(view.menu_icon);
        }
        Ok(())
    }

    fn schedule_home_reveals(&self, change: &NavChange) -> Result<()> {
        for reveal in view::home_reveals(change, &self.config) {
            let Some(region) = dom::query(&self.document, reveal.selector)? else {
                continue;
            };
            let class = self.config.loaded_class;
            self.scheduler.schedule(
                reveal.delay_ms,
                Box::new(move || {
                    if let Err(err) = region.class_list().add_1(class) {
                        log::warn!("could not mark region loaded: {err:?}");
                    }
                }),
            )?;
        }
        Ok(())
    }

    fn toggle_menu(&self) -> Result<()> {
        self.state.borrow_mut().toggle_mobile_menu();
        self.render_menu(&self.view())
    }

    fn follow_link(&self, event: &Event, link: &Element) -> Result<()> {
        event.prevent_default();
        if let Some(href) = link.get_attribute("href") {
            self.window.location().set_hash(&href)?;
        }
        let was_open = self.state.borrow_mut().close_mobile_menu();
        if was_open {
            self.render_menu(&self.view())?;
        }
        Ok(())
    }
}

fn report(result: Result<()>) {
    if let Err(err) = result {
        log::error!("navigation: {err}");
    }
}

/// Wires nav links, the mobile toggle and `hashchange`, then shows the page
/// named by the current fragment.
pub fn install(
    window: &Window,
    document: &Document,
    config: Rc<SiteConfig>,
    scheduler: Rc<BrowserScheduler>,
) -> Result<()> {
    let selectors = &config.selectors;
    let sections = dom::query_all(document, selectors.pages)?
        .into_iter()
        .map(|el| (el.id(), el))
        .collect();
    let links = dom::query_all(document, selectors.nav_links)?
        .into_iter()
        .filter_map(|el| Some((el.get_attribute(config.page_attribute)?, el)))
        .collect::<Vec<_>>();
    let mobile_button = dom::query(document, selectors.mobile_button)?;
    let mobile_panel = dom::query(document, selectors.mobile_panel)?;

    let nav = Rc::new(Navigator {
        state: RefCell::new(NavState::new(config.default_page)),
        config: Rc::clone(&config),
        scheduler,
        window: window.clone(),
        document: document.clone(),
        sections,
        links,
        mobile_button,
        mobile_panel,
    });

    match &nav.mobile_button {
        Some(button) => {
            let nav = Rc::clone(&nav);
            dom::listen(button, "click", move |_| report(nav.toggle_menu()))?;
        }
        None => log::warn!("{} not found, mobile menu disabled", config.selectors.mobile_button),
    }

    for (_, link) in &nav.links {
        let nav = Rc::clone(&nav);
        let target = link.clone();
        dom::listen(link, "click", move |event| report(nav.follow_link(&event, &target)))?;
    }

    {
        let nav = Rc::clone(&nav);
        dom::listen(window, "hashchange", move |_| report(nav.sync_to_hash()))?;
    }

    nav.sync_to_hash()
}
