//! Deferred Widget Teardown
//!
//! After a route change the destination page gets a moment to render its
//! widget anchor. Only if the anchor is still missing after the delay is the
//! widget destroyed; a page that hosts the widget keeps it without a
//! destroy/init flicker.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::widget::WidgetManager;

/// Spawns a task that destroys the widget unless `anchor` shows up within
/// `delay`.
///
/// # Arguments
/// * `manager` - Shared widget manager
/// * `anchor` - DOM id the widget mounts on
/// * `delay` - Grace period for the new page to render
///
/// # Returns
/// A JoinHandle for the spawned task, which can be aborted if the check is
/// no longer wanted.
pub fn spawn_deferred_teardown(
    manager: Arc<WidgetManager>,
    anchor: String,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        if manager.anchor_present(&anchor) {
            debug!(anchor = %anchor, "Widget anchor present after navigation, keeping widget");
        } else {
            info!(anchor = %anchor, "Widget anchor gone after navigation, destroying widget");
            manager.destroy();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::widget::testing::MockHost;
    use crate::widget::{RetryPolicy, WidgetOptions};

    async fn live_manager() -> (Arc<MockHost>, Arc<WidgetManager>) {
        let host = MockHost::new();
        host.load_script();
        host.render_anchor("artalk");
        let manager = Arc::new(WidgetManager::new(host.clone(), RetryPolicy::default()));
        manager
            .init(WidgetOptions::new("#artalk", "/posts/a", "A"))
            .await
            .unwrap();
        (host, manager)
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroys_when_anchor_missing() {
        let (host, manager) = live_manager().await;
        host.remove_anchor("artalk");

        let handle = spawn_deferred_teardown(
            manager.clone(),
            "artalk".to_string(),
            Duration::from_millis(200),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(manager.is_active(), "Teardown must wait for the delay");

        handle.await.unwrap();
        assert!(!manager.is_active());
        assert_eq!(host.teardowns(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_widget_when_anchor_rendered_in_time() {
        let (host, manager) = live_manager().await;
        host.remove_anchor("artalk");

        let handle = spawn_deferred_teardown(
            manager.clone(),
            "artalk".to_string(),
            Duration::from_millis(200),
        );

        // New page renders its anchor inside the grace period
        tokio::time::sleep(Duration::from_millis(150)).await;
        host.render_anchor("artalk");

        handle.await.unwrap();
        assert!(manager.is_active());
        assert_eq!(host.teardowns(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_can_be_aborted() {
        let (host, manager) = live_manager().await;
        host.remove_anchor("artalk");

        let handle = spawn_deferred_teardown(
            manager.clone(),
            "artalk".to_string(),
            Duration::from_millis(200),
        );
        handle.abort();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
        assert!(manager.is_active());
    }
}
