//! The shared results region.
//!
//! One region is shared by every form controller. Content is replaced, never
//! appended, so only the most recent submission's outcome is visible; when two
//! submissions resolve concurrently the last publication wins. Each mutation is
//! one short lock-guarded assignment.

use std::sync::{Arc, Mutex, PoisonError};

/// Visibility flag plus an HTML content slot.
#[derive(Clone, Debug, Default)]
pub struct ResultsRegion {
    hidden: bool,
    content: String,
}

impl ResultsRegion {
    /// A fresh region starts hidden and empty.
    pub fn new() -> Self {
        Self {
            hidden: true,
            content: String::new(),
        }
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Replaces the content slot and reveals the region.
    pub fn publish(&mut self, html: String) {
        self.content = html;
        self.hidden = false;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Cloneable handle to the region shared across controllers.
#[derive(Clone, Debug)]
pub struct SharedResults(Arc<Mutex<ResultsRegion>>);

impl SharedResults {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(ResultsRegion::new())))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ResultsRegion> {
        // A poisoned region only ever holds plain strings; recover the data.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hides the region (stale results must not stay visible while a new
    /// request is in flight).
    pub fn hide(&self) {
        self.lock().hide();
    }

    /// Publishes new content and reveals the region. Last write wins.
    pub fn publish(&self, html: String) {
        self.lock().publish(html);
    }

    /// Snapshot of `(hidden, content)` for display or assertions.
    pub fn snapshot(&self) -> (bool, String) {
        let region = self.lock();
        (region.is_hidden(), region.content().to_string())
    }
}

impl Default for SharedResults {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_and_empty() {
        let results = SharedResults::new();
        let (hidden, content) = results.snapshot();
        assert!(hidden);
        assert!(content.is_empty());
    }

    #[test]
    fn publish_replaces_content_and_reveals() {
        let results = SharedResults::new();
        results.publish("<p>one</p>".to_string());
        results.publish("<p>two</p>".to_string());
        let (hidden, content) = results.snapshot();
        assert!(!hidden);
        assert_eq!(content, "<p>two</p>");
    }

    #[test]
    fn hide_keeps_content_but_masks_it() {
        let results = SharedResults::new();
        results.publish("<p>one</p>".to_string());
        results.hide();
        let (hidden, content) = results.snapshot();
        assert!(hidden);
        assert_eq!(content, "<p>one</p>");
    }

    #[test]
    fn clones_share_the_same_region() {
        let results = SharedResults::new();
        let other = results.clone();
        other.publish("<p>shared</p>".to_string());
        assert_eq!(results.snapshot().1, "<p>shared</p>");
    }
}
