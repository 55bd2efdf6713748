//! In-memory page environment for widget tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::error::WidgetError;
use crate::widget::{CommentWidget, ThemeToggle, WidgetConstructor, WidgetHost, WidgetOptions};

/// Fake page: a toggleable widget script, a set of rendered anchors and
/// counters for everything the manager does to it.
pub(crate) struct MockHost {
    me: Weak<MockHost>,
    script_loaded: AtomicBool,
    anchors: Mutex<HashSet<String>>,
    anchor_checks: AtomicUsize,
    constructions: AtomicUsize,
    teardowns: Arc<AtomicUsize>,
    dark: Arc<Mutex<Option<bool>>>,
    last_options: Mutex<Option<WidgetOptions>>,
    pub fail_construction: AtomicBool,
    pub fail_teardown: AtomicBool,
    pub themed: AtomicBool,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            script_loaded: AtomicBool::new(false),
            anchors: Mutex::new(HashSet::new()),
            anchor_checks: AtomicUsize::new(0),
            constructions: AtomicUsize::new(0),
            teardowns: Arc::new(AtomicUsize::new(0)),
            dark: Arc::new(Mutex::new(None)),
            last_options: Mutex::new(None),
            fail_construction: AtomicBool::new(false),
            fail_teardown: AtomicBool::new(false),
            themed: AtomicBool::new(true),
        })
    }

    pub fn load_script(&self) {
        self.script_loaded.store(true, Ordering::SeqCst);
    }

    pub fn render_anchor(&self, id: &str) {
        self.anchors.lock().unwrap().insert(id.to_string());
    }

    pub fn remove_anchor(&self, id: &str) {
        self.anchors.lock().unwrap().remove(id);
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn teardowns(&self) -> usize {
        self.teardowns.load(Ordering::SeqCst)
    }

    pub fn anchor_checks(&self) -> usize {
        self.anchor_checks.load(Ordering::SeqCst)
    }

    pub fn dark_mode(&self) -> Option<bool> {
        *self.dark.lock().unwrap()
    }

    pub fn last_options(&self) -> Option<WidgetOptions> {
        self.last_options.lock().unwrap().clone()
    }
}

impl WidgetHost for MockHost {
    fn constructor(&self) -> Option<Arc<dyn WidgetConstructor>> {
        if !self.script_loaded.load(Ordering::SeqCst) {
            return None;
        }
        self.me
            .upgrade()
            .map(|host| host as Arc<dyn WidgetConstructor>)
    }

    fn has_anchor(&self, id: &str) -> bool {
        self.anchor_checks.fetch_add(1, Ordering::SeqCst);
        self.anchors.lock().unwrap().contains(id)
    }
}

impl WidgetConstructor for MockHost {
    fn construct(&self, options: &WidgetOptions) -> Result<Box<dyn CommentWidget>, WidgetError> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options.clone());

        if self.fail_construction.load(Ordering::SeqCst) {
            return Err(WidgetError::Construction("server unreachable".to_string()));
        }

        Ok(Box::new(MockWidget {
            teardowns: self.teardowns.clone(),
            dark: self.dark.clone(),
            fail_teardown: self.fail_teardown.load(Ordering::SeqCst),
            themed: self.themed.load(Ordering::SeqCst),
        }))
    }
}

struct MockWidget {
    teardowns: Arc<AtomicUsize>,
    dark: Arc<Mutex<Option<bool>>>,
    fail_teardown: bool,
    themed: bool,
}

impl CommentWidget for MockWidget {
    fn destroy(&mut self) -> Result<(), WidgetError> {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
        if self.fail_teardown {
            Err(WidgetError::Teardown("already detached".to_string()))
        } else {
            Ok(())
        }
    }

    fn theme(&mut self) -> Option<&mut dyn ThemeToggle> {
        if self.themed {
            Some(self)
        } else {
            None
        }
    }
}

impl ThemeToggle for MockWidget {
    fn set_dark_mode(&mut self, dark: bool) {
        *self.dark.lock().unwrap() = Some(dark);
    }
}
