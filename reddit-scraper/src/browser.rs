//! Browser automation capability.
//!
//! The scraper only talks to these traits; [`crate::chromium`] provides the
//! CDP-backed implementation and tests provide scripted fakes.

use persona_core::ScrapeError;
use std::time::Duration;

/// Stable identity of a DOM node across repeated queries.
pub trait NodeIdentity {
    fn node_id(&self) -> i64;
}

pub trait PageDriver {
    type Element: NodeIdentity;

    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ScrapeError>;

    /// Clicks the first `tag` element whose text contains `text`.
    async fn click_text(&self, tag: &str, text: &str, timeout: Duration)
        -> Result<(), ScrapeError>;

    async fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScrapeError>;

    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), ScrapeError>;

    async fn inner_text(&self, element: &Self::Element) -> Result<Option<String>, ScrapeError>;

    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, ScrapeError>;

    /// Current scrollable content height of the document body.
    async fn scroll_height(&self) -> Result<i64, ScrapeError>;

    async fn scroll_by(&self, delta_y: i64) -> Result<(), ScrapeError>;
}

/// A launched browser with a single working page.
pub trait BrowserSession {
    type Page: PageDriver;

    fn page(&self) -> &Self::Page;

    async fn close(self) -> Result<(), ScrapeError>;
}

pub trait BrowserLauncher {
    type Session: BrowserSession;

    /// Starts a headless browser whose requests identify as `user_agent`.
    async fn launch(&self, user_agent: &str) -> Result<Self::Session, ScrapeError>;
}
