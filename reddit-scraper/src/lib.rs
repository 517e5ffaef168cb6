pub mod browser;
pub mod chromium;
pub mod scraper;
pub mod scroll;


pub use browser::{BrowserLauncher, BrowserSession, NodeIdentity, PageDriver};
pub use chromium::{ChromiumLauncher, ChromiumPage, ChromiumSession};
pub use scraper::{
    parse_comment_label, Listing, RedditScraper, COMMENT_THREAD_SELECTOR, POST_TITLE_SELECTOR,
};
pub use scroll::{Observation, ScrollCollector, ScrollDecision, ScrollState, StopReason};
