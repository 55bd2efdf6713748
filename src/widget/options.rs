//! Widget construction options

use std::time::Duration;

use serde::Serialize;

/// Options handed to the external widget constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Anchor selector, e.g. `#artalk`
    pub el: String,
    /// Identity of the page that owns the widget
    pub page_key: String,
    pub page_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoticons: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl WidgetOptions {
    pub fn new(
        el: impl Into<String>,
        page_key: impl Into<String>,
        page_title: impl Into<String>,
    ) -> Self {
        Self {
            el: el.into(),
            page_key: page_key.into(),
            page_title: page_title.into(),
            server: None,
            site: None,
            emoticons: None,
            dark_mode: None,
        }
    }

    /// Points the widget at a comment backend.
    pub fn with_backend(mut self, server: impl Into<String>, site: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self.site = Some(site.into());
        self
    }

    pub fn with_emoticons(mut self, emoticons: impl Into<String>) -> Self {
        self.emoticons = Some(emoticons.into());
        self
    }

    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark_mode = Some(dark);
        self
    }

    /// DOM id of the anchor, without the leading `#`.
    pub fn anchor_id(&self) -> &str {
        self.el.strip_prefix('#').unwrap_or(&self.el)
    }
}

// == Retry Policy ==
/// Fixed-interval readiness polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between polls
    pub interval: Duration,
    /// Anchor polls before giving up
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 10,
        }
    }
}
