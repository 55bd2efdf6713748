//! Comment Widget Module
//!
//! Lifecycle management for the externally loaded comment widget: a single
//! shared [`WidgetManager`], the traits it uses to reach the page, and the
//! navigation hooks that tear it down between pages.

mod host;
mod manager;
mod navigation;
mod options;

#[cfg(test)]
pub(crate) mod testing;

pub use host::{CommentWidget, ThemeToggle, WidgetConstructor, WidgetHost};
pub use manager::WidgetManager;
pub use navigation::NavigationGuard;
pub use options::{RetryPolicy, WidgetOptions};
