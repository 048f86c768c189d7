use std::cell::RefCell;
use std::rc::Rc;

use portfolio_site::config::SiteConfig;
use portfolio_site::nav::{parse_fragment, NavState};
use portfolio_site::schedule::{Scheduler, VirtualScheduler};
use portfolio_site::view::{self, NavView, MENU_ICON_CLOSED, MENU_ICON_OPEN};

const PAGES: [&str; 5] = ["home", "about", "skills", "projects", "contact"];
// Desktop bar followed by the mobile panel.
const LINKS: [&str; 10] = [
    "home", "about", "skills", "projects", "contact", "home", "about", "skills", "projects",
    "contact",
];

fn go(state: &mut NavState, hash: &str) -> Option<portfolio_site::nav::NavChange> {
    let page = parse_fragment(hash, "home").to_owned();
    state.navigate(&page)
}

#[test]
fn fragment_parsing() {
    assert_eq!(parse_fragment("#about", "home"), "about");
    assert_eq!(parse_fragment("about", "home"), "about");
    assert_eq!(parse_fragment("", "home"), "home");
    assert_eq!(parse_fragment("#", "home"), "home");
}

#[test]
fn every_known_page_shows_one_section_and_one_link() {
    for page in PAGES {
        let mut state = NavState::new("home");
        go(&mut state, &format!("#{page}")).expect("first navigation always switches");
        let view = NavView::of(&state, &PAGES, &LINKS);

        let sections: Vec<_> = PAGES.iter().filter(|id| view.shows_section(id)).collect();
        assert_eq!(sections, [&page]);

        let links: Vec<_> = (0..LINKS.len()).filter(|&i| view.highlights_link(i)).collect();
        assert_eq!(links.len(), 1, "page {page}");
        assert_eq!(LINKS[links[0]], page);
    }
}

#[test]
fn switching_pages_moves_the_highlight() {
    let mut state = NavState::new("home");
    go(&mut state, "#about");
    go(&mut state, "#contact");
    let view = NavView::of(&state, &PAGES, &LINKS);
    assert!(!view.shows_section("about"));
    assert!(view.shows_section("contact"));
    assert_eq!(view.active_link, Some(4));
}

#[test]
fn unknown_fragment_shows_nothing() {
    let mut state = NavState::new("home");
    go(&mut state, "#home");
    let change = go(&mut state, "#does-not-exist").expect("page id changed");
    assert!(!change.entered_home);
    assert_eq!(state.current_page(), Some("does-not-exist"));

    let view = NavView::of(&state, &PAGES, &LINKS);
    assert_eq!(view.active_section, None);
    assert_eq!(view.active_link, None);
    assert!(PAGES.iter().all(|id| !view.shows_section(id)));
}

#[test]
fn same_page_is_a_no_op() {
    let mut state = NavState::new("home");
    assert!(go(&mut state, "").is_some());
    assert!(go(&mut state, "#home").is_none());
    assert!(go(&mut state, "#about").is_some());
    assert!(go(&mut state, "#about").is_none());
}

#[test]
fn initial_load_on_home_still_renders() {
    let mut state = NavState::new("home");
    assert_eq!(state.current_page(), None);
    let change = go(&mut state, "").expect("nothing shown yet");
    assert!(change.entered_home);
}

#[test]
fn mobile_menu_toggles_back() {
    let mut state = NavState::new("home");
    let before = NavView::of(&state, &PAGES, &LINKS);
    assert!(!before.mobile_menu_open);
    assert_eq!(before.menu_icon, MENU_ICON_CLOSED);

    assert!(state.toggle_mobile_menu());
    let open = NavView::of(&state, &PAGES, &LINKS);
    assert!(open.mobile_menu_open);
    assert_eq!(open.menu_icon, MENU_ICON_OPEN);

    assert!(!state.toggle_mobile_menu());
    assert_eq!(NavView::of(&state, &PAGES, &LINKS), before);
}

#[test]
fn menu_is_independent_of_page() {
    let mut state = NavState::new("home");
    state.toggle_mobile_menu();
    go(&mut state, "#skills");
    assert!(state.is_mobile_menu_open());

    assert!(state.close_mobile_menu());
    assert!(!state.close_mobile_menu());
    assert_eq!(state.current_page(), Some("skills"));
}

#[test]
fn home_reveals_are_staggered() {
    let config = SiteConfig::default();
    let scheduler = VirtualScheduler::new();
    let loaded = Rc::new(RefCell::new(Vec::new()));

    let mut state = NavState::new(config.default_page);
    let change = go(&mut state, "#home").unwrap();
    for reveal in view::home_reveals(&change, &config) {
        let loaded = Rc::clone(&loaded);
        let selector = reveal.selector;
        scheduler
            .schedule(reveal.delay_ms, Box::new(move || loaded.borrow_mut().push(selector)))
            .unwrap();
    }

    scheduler.advance(499);
    assert!(loaded.borrow().is_empty());
    scheduler.advance(1);
    assert_eq!(*loaded.borrow(), [".home-text"]);
    scheduler.advance(300);
    assert_eq!(*loaded.borrow(), [".home-text", ".scene-container"]);
    scheduler.advance(300);
    assert_eq!(
        *loaded.borrow(),
        [".home-text", ".scene-container", ".photo-frame-desktop"]
    );
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn other_pages_owe_no_reveals() {
    let config = SiteConfig::default();
    let mut state = NavState::new(config.default_page);
    let change = go(&mut state, "#projects").unwrap();
    assert!(view::home_reveals(&change, &config).is_empty());
}
