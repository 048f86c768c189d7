//! Navigation state: which page is shown and whether the mobile menu is open.

/// Page id addressed by a URL fragment. A leading `#` is stripped and an
/// empty fragment falls back to `default_page`.
pub fn parse_fragment<'a>(hash: &'a str, default_page: &'a str) -> &'a str {
    let page = hash.strip_prefix('#').unwrap_or(hash);
    if page.is_empty() {
        default_page
    } else {
        page
    }
}

/// Result of a navigation that actually switched pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavChange {
    pub page: String,
    /// The new page is the home page, so its entrance effects should run.
    pub entered_home: bool,
}

#[derive(Clone, Debug)]
pub struct NavState {
    home_page: String,
    current_page: Option<String>,
    mobile_menu_open: bool,
}

impl NavState {
    pub fn new(home_page: impl Into<String>) -> Self {
        Self {
            home_page: home_page.into(),
            current_page: None,
            mobile_menu_open: false,
        }
    }

    /// Page last navigated to; `None` before the first navigation.
    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    pub fn home_page(&self) -> &str {
        &self.home_page
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Switches to `page`. Returns `None` when it is already current.
    ///
    /// Unknown ids are accepted: the state records them and the view simply
    /// shows no section.
    pub fn navigate(&mut self, page: &str) -> Option<NavChange> {
        if self.current_page.as_deref() == Some(page) {
            return None;
        }
        self.current_page = Some(page.to_owned());
        Some(NavChange {
            page: page.to_owned(),
            entered_home: page == self.home_page,
        })
    }

    /// Flips the mobile menu and returns the new state.
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        self.mobile_menu_open
    }

    /// Closes the mobile menu, returning whether it was open.
    pub fn close_mobile_menu(&mut self) -> bool {
        std::mem::replace(&mut self.mobile_menu_open, false)
    }
}
