//! Widget Lifecycle Manager
//!
//! Owns at most one live comment widget and moves it between pages.
//!
//! Every `init` that gets past the same-page guard takes a new generation
//! number. Polling loops stop as soon as their generation is no longer the
//! latest, and an instance constructed for a stale generation is torn down
//! instead of installed, so the most recent `init` always wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::WidgetError;
use crate::widget::{CommentWidget, RetryPolicy, WidgetHost, WidgetOptions};

#[derive(Default)]
struct ManagerState {
    instance: Option<Box<dyn CommentWidget>>,
    page_key: Option<String>,
    generation: u64,
}

impl ManagerState {
    fn take(&mut self) -> Option<(Box<dyn CommentWidget>, String)> {
        let page_key = self.page_key.take().unwrap_or_default();
        self.instance.take().map(|instance| (instance, page_key))
    }
}

/// Process-wide owner of the comment widget. Share it as `Arc<WidgetManager>`.
pub struct WidgetManager {
    host: Arc<dyn WidgetHost>,
    policy: RetryPolicy,
    state: Mutex<ManagerState>,
}

impl WidgetManager {
    pub fn new(host: Arc<dyn WidgetHost>, policy: RetryPolicy) -> Self {
        Self {
            host,
            policy,
            state: Mutex::new(ManagerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Init ==
    /// Attaches the widget for `options.page_key`.
    ///
    /// A no-op if the widget is already live for the same page. Otherwise the
    /// current instance is torn down, then the call waits for the widget
    /// script and polls for the anchor up to `max_attempts` times.
    ///
    /// # Errors
    /// - `TargetNotFound` when the anchor never appears
    /// - `Construction` when the constructor fails (not retried)
    /// - `Superseded` when a newer `init` started while this one was waiting
    pub async fn init(&self, options: WidgetOptions) -> Result<(), WidgetError> {
        let (generation, previous) = {
            let mut state = self.lock();
            let same_page = state.page_key.as_deref() == Some(options.page_key.as_str());
            if state.instance.is_some() && same_page {
                debug!(page_key = %options.page_key, "Widget already live for page");
                return Ok(());
            }
            state.generation += 1;
            (state.generation, state.take())
        };

        if let Some((instance, page_key)) = previous {
            teardown(instance, &page_key);
        }

        self.wait_for_constructor(generation).await?;

        let anchor = options.anchor_id();
        for attempt in 1..=self.policy.max_attempts {
            self.ensure_current(generation)?;

            if self.host.has_anchor(anchor) {
                if let Some(constructor) = self.host.constructor() {
                    let instance = constructor.construct(&options).map_err(|err| {
                        error!(
                            page_key = %options.page_key,
                            error = %err,
                            "Widget construction failed"
                        );
                        err
                    })?;
                    return self.install(generation, options.page_key.clone(), instance);
                }
            }

            debug!(anchor, attempt, "Widget anchor not ready");
            if attempt < self.policy.max_attempts {
                sleep(self.policy.interval).await;
            }
        }

        warn!(anchor, attempts = self.policy.max_attempts, "Widget anchor never appeared");
        Err(WidgetError::TargetNotFound {
            anchor: anchor.to_string(),
            attempts: self.policy.max_attempts,
        })
    }

    /// Resolves once the widget library has registered its constructor.
    async fn wait_for_constructor(&self, generation: u64) -> Result<(), WidgetError> {
        loop {
            self.ensure_current(generation)?;
            if self.host.constructor().is_some() {
                return Ok(());
            }
            sleep(self.policy.interval).await;
        }
    }

    fn ensure_current(&self, generation: u64) -> Result<(), WidgetError> {
        if self.lock().generation == generation {
            Ok(())
        } else {
            debug!(generation, "Widget init superseded");
            Err(WidgetError::Superseded)
        }
    }

    fn install(
        &self,
        generation: u64,
        page_key: String,
        instance: Box<dyn CommentWidget>,
    ) -> Result<(), WidgetError> {
        let mut state = self.lock();
        if state.generation != generation {
            drop(state);
            teardown(instance, &page_key);
            return Err(WidgetError::Superseded);
        }

        // A destroy racing this init may have left nothing, but never two
        let displaced = state.take();
        info!(page_key = %page_key, "Widget initialized");
        state.instance = Some(instance);
        state.page_key = Some(page_key);
        drop(state);

        if let Some((instance, page_key)) = displaced {
            teardown(instance, &page_key);
        }
        Ok(())
    }

    // == Destroy ==
    /// Tears down the held widget, if any.
    ///
    /// Teardown is best-effort: failures are logged and dropped, and the
    /// manager is cleared whatever the outcome. Safe to call repeatedly.
    /// Leaves the generation alone: an `init` still waiting for its page
    /// goes on to install.
    pub fn destroy(&self) {
        let held = self.lock().take();
        if let Some((instance, page_key)) = held {
            teardown(instance, &page_key);
        }
    }

    // == Dark Mode ==
    /// Forwards the theme to the held widget when it supports theming.
    pub fn set_dark_mode(&self, dark: bool) {
        let mut state = self.lock();
        if let Some(theme) = state.instance.as_mut().and_then(|widget| widget.theme()) {
            theme.set_dark_mode(dark);
        }
    }

    /// Page that currently owns the widget.
    pub fn page_key(&self) -> Option<String> {
        self.lock().page_key.clone()
    }

    pub fn is_active(&self) -> bool {
        self.lock().instance.is_some()
    }

    /// Whether the page currently renders an element with `id`.
    pub fn anchor_present(&self, id: &str) -> bool {
        self.host.has_anchor(id)
    }
}

fn teardown(mut instance: Box<dyn CommentWidget>, page_key: &str) {
    match instance.destroy() {
        Ok(()) => info!(page_key, "Widget destroyed"),
        Err(err) => warn!(
            page_key,
            error = %err,
            "Widget teardown failed, state cleared anyway"
        ),
    }
}
