//! Route-transition hooks for the widget manager

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::Config;
use crate::tasks::spawn_deferred_teardown;
use crate::widget::WidgetManager;

/// Ties widget teardown to navigation and page unload.
pub struct NavigationGuard {
    manager: Arc<WidgetManager>,
    anchor: String,
    delay: Duration,
}

impl NavigationGuard {
    pub fn new(manager: Arc<WidgetManager>, anchor: impl Into<String>, delay: Duration) -> Self {
        Self {
            manager,
            anchor: anchor.into(),
            delay,
        }
    }

    pub fn from_config(manager: Arc<WidgetManager>, config: &Config) -> Self {
        Self::new(manager, config.widget_anchor.clone(), config.teardown_delay())
    }

    /// Runs before every route transition.
    ///
    /// When the path changes, schedules the deferred anchor check and returns
    /// its handle. Query or fragment changes on the same path are ignored.
    pub fn before_each(&self, to: &str, from: &str) -> Option<JoinHandle<()>> {
        if route_path(to) == route_path(from) {
            return None;
        }

        debug!(from, to, "Route changed, scheduling widget anchor check");
        Some(spawn_deferred_teardown(
            self.manager.clone(),
            self.anchor.clone(),
            self.delay,
        ))
    }

    /// Runs when the page is unloading.
    pub fn before_unload(&self) {
        self.manager.destroy();
    }
}

fn route_path(route: &str) -> &str {
    route.split(['?', '#']).next().unwrap_or(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::widget::testing::MockHost;
    use crate::widget::{RetryPolicy, WidgetOptions};

    async fn guarded() -> (Arc<MockHost>, Arc<WidgetManager>, NavigationGuard) {
        let host = MockHost::new();
        host.load_script();
        host.render_anchor("artalk");
        let manager = Arc::new(WidgetManager::new(host.clone(), RetryPolicy::default()));
        manager
            .init(WidgetOptions::new("#artalk", "/posts/a", "A"))
            .await
            .unwrap();
        let guard = NavigationGuard::from_config(manager.clone(), &Config::default());
        (host, manager, guard)
    }

    #[test]
    fn test_route_path() {
        assert_eq!(route_path("/posts/a?page=2"), "/posts/a");
        assert_eq!(route_path("/posts/a#comments"), "/posts/a");
        assert_eq!(route_path("/posts/a"), "/posts/a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_path_schedules_nothing() {
        let (_host, _manager, guard) = guarded().await;

        assert!(guard.before_each("/posts/a#comments", "/posts/a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_to_page_without_widget() {
        let (host, manager, guard) = guarded().await;

        let handle = guard.before_each("/about", "/posts/a").unwrap();
        host.remove_anchor("artalk");
        handle.await.unwrap();

        assert!(!manager.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_between_widget_pages_keeps_instance() {
        let (host, manager, guard) = guarded().await;

        let handle = guard.before_each("/posts/b", "/posts/a").unwrap();
        handle.await.unwrap();

        assert!(manager.is_active());
        assert_eq!(host.teardowns(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_before_unload_destroys() {
        let (host, manager, guard) = guarded().await;

        guard.before_unload();

        assert!(!manager.is_active());
        assert_eq!(host.teardowns(), 1);
    }
}
