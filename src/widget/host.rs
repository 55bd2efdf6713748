//! Seams between the manager and the page environment
//!
//! The widget library publishes its constructor once its script has loaded;
//! the page renders the anchor element at its own pace. Both are observed
//! through [`WidgetHost`].

use std::sync::Arc;

use crate::error::WidgetError;
use crate::widget::WidgetOptions;

/// The page environment hosting the widget.
pub trait WidgetHost: Send + Sync {
    /// The widget constructor, once the library has registered it.
    fn constructor(&self) -> Option<Arc<dyn WidgetConstructor>>;

    /// Whether an element with `id` is currently rendered.
    fn has_anchor(&self, id: &str) -> bool;
}

/// Builds a widget instance attached to the anchor named in the options.
pub trait WidgetConstructor: Send + Sync {
    fn construct(&self, options: &WidgetOptions) -> Result<Box<dyn CommentWidget>, WidgetError>;
}

/// A live widget instance.
pub trait CommentWidget: Send {
    /// Detaches the widget from the page.
    fn destroy(&mut self) -> Result<(), WidgetError>;

    /// Theme switching, for widgets that support it.
    fn theme(&mut self) -> Option<&mut dyn ThemeToggle> {
        None
    }
}

/// Optional light/dark theme capability.
pub trait ThemeToggle {
    fn set_dark_mode(&mut self, dark: bool);
}
