//! Layout State
//!
//! Tracks which overlay panels are open and whether page scrolling is locked.
//! At most one panel is open at a time. Scrolling is locked only on narrow
//! viewports, where an open panel covers the page.

use std::collections::{BTreeSet, HashMap};

/// Viewports at least this wide never lock scrolling.
pub const WIDE_VIEWPORT: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    Sidebar,
    Aside,
    Search,
}

#[derive(Debug, Clone)]
pub struct LayoutState {
    open: BTreeSet<Panel>,
    viewport_width: u32,
    scroll_locked: bool,
    aside_widgets: Vec<String>,
    translate: HashMap<String, String>,
}

impl LayoutState {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            open: BTreeSet::new(),
            viewport_width,
            scroll_locked: false,
            aside_widgets: Vec::new(),
            translate: HashMap::new(),
        }
    }

    fn is_narrow(&self) -> bool {
        self.viewport_width < WIDE_VIEWPORT
    }

    /// Closes `panel` if open; otherwise closes everything else and opens it.
    pub fn toggle(&mut self, panel: Panel) {
        if self.open.remove(&panel) {
            self.scroll_locked = false;
            return;
        }

        self.close_all();
        self.open.insert(panel);
        if self.is_narrow() {
            self.scroll_locked = true;
        }
    }

    pub fn close_all(&mut self) {
        self.open.clear();
        self.scroll_locked = false;
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        self.open.contains(&panel)
    }

    pub fn is_any_open(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Records a new viewport width; widening past the threshold releases
    /// the scroll lock while a panel stays open.
    pub fn on_resize(&mut self, width: u32) {
        self.viewport_width = width;
        if !self.is_narrow() && self.is_any_open() {
            self.scroll_locked = false;
        }
    }

    pub fn set_aside(&mut self, widgets: Vec<String>) {
        self.aside_widgets = widgets;
    }

    pub fn aside_widgets(&self) -> &[String] {
        &self.aside_widgets
    }

    /// Stores a page offset keyed by the reason it was applied.
    pub fn set_translate(&mut self, reason: impl Into<String>, value: impl Into<String>) {
        self.translate.insert(reason.into(), value.into());
    }

    pub fn translate(&self, reason: &str) -> Option<&str> {
        self.translate.get(reason).map(String::as_str)
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(WIDE_VIEWPORT)
    }
}
