//! Blog Core - comment widget lifecycle, TTL data cache and media proxy
//!
//! Keeps a single comment widget alive across page navigations, memoizes
//! remote feed data with per-entry expiry, and proxies third-party media
//! lookups.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod feeds;
pub mod fetch;
pub mod layout;
pub mod models;
pub mod proxy;
pub mod tasks;
pub mod widget;

pub use api::AppState;
pub use cache::DataCache;
pub use config::Config;
pub use tasks::spawn_deferred_teardown;
pub use widget::{NavigationGuard, WidgetManager};
