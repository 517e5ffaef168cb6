use crate::browser::{BrowserLauncher, BrowserSession, PageDriver};
use crate::scroll::ScrollCollector;
use once_cell::sync::Lazy;
use persona_core::{
    ConfigError, CoreError, ErrorExt, ScrapeError, ScrapedRecord, ScraperConfig, UserActivity,
};
use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

pub const POST_TITLE_SELECTOR: &str = "a[slot='full-post-link'] faceplate-screen-reader-content";
pub const COMMENT_THREAD_SELECTOR: &str = "a[aria-label^='Thread for']";
pub const COMMENT_LABEL_ATTRIBUTE: &str = "aria-label";

const CONSENT_BUTTON_TAG: &str = "button";
const CONSENT_BUTTON_TEXT: &str = "Accept";

static COMMENT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"comment on (.+)").expect("comment label pattern is valid"));

/// Comment body from a thread link's accessible label, e.g.
/// `"Thread for u/someone's comment on Great build!"` -> `"Great build!"`.
pub fn parse_comment_label(label: &str) -> Option<String> {
    COMMENT_LABEL
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Posts,
    Comments,
}

impl Listing {
    fn path_segment(&self) -> &'static str {
        match self {
            Listing::Posts => "posts",
            Listing::Comments => "comments",
        }
    }

    fn selector(&self) -> &'static str {
        match self {
            Listing::Posts => POST_TITLE_SELECTOR,
            Listing::Comments => COMMENT_THREAD_SELECTOR,
        }
    }

    fn missing_content_warning(&self) -> &'static str {
        match self {
            Listing::Posts => "No post titles detected. User may have no posts or structure changed.",
            Listing::Comments => {
                "No comments detected. User may have no comments or structure changed."
            }
        }
    }
}

/// Collects a user's public posts and comments from their profile listings.
pub struct RedditScraper<L> {
    launcher: L,
    config: ScraperConfig,
    base_url: Url,
}

impl<L: BrowserLauncher> RedditScraper<L> {
    pub fn new(launcher: L, config: ScraperConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "scraper.base_url".to_string(),
            value: format!("{} ({})", config.base_url, e),
        })?;

        Ok(Self {
            launcher,
            config,
            base_url,
        })
    }

    pub fn listing_url(&self, username: &str, listing: Listing) -> Result<Url, CoreError> {
        self.base_url
            .join(&format!("user/{}/{}/", username, listing.path_segment()))
            .map_err(|e| CoreError::InvalidInput {
                message: format!("cannot build profile URL for '{}': {}", username, e),
            })
    }

    /// Runs one browser session over the posts and comments listings.
    ///
    /// Only a failed browser launch or an entirely empty result is an error;
    /// navigation and selector problems are logged and the run continues.
    pub async fn scrape(
        &self,
        username: &str,
        max_posts: usize,
        max_comments: usize,
    ) -> Result<UserActivity, CoreError> {
        let posts_url = self.listing_url(username, Listing::Posts)?;
        let comments_url = self.listing_url(username, Listing::Comments)?;

        let session = match self.launcher.launch(&self.config.user_agent).await {
            Ok(session) => session,
            Err(e) => {
                e.log_error();
                return Err(e.into());
            }
        };

        let page = session.page();
        let posts = self.collect_posts(page, &posts_url, max_posts).await;
        let comments = self.collect_comments(page, &comments_url, max_comments).await;

        if let Err(e) = session.close().await {
            e.log_warn();
        }

        let activity = UserActivity { posts, comments };
        if activity.is_empty() {
            let err = ScrapeError::NothingScraped {
                username: username.to_string(),
            };
            err.log_error();
            return Err(err.into());
        }

        info!(
            "Scraped {} posts and {} comments for u/{}",
            activity.posts.len(),
            activity.comments.len(),
            username
        );
        Ok(activity)
    }

    async fn collect_posts<P: PageDriver>(
        &self,
        page: &P,
        url: &Url,
        max_posts: usize,
    ) -> Vec<ScrapedRecord> {
        let nodes = self.collect_listing(page, url, Listing::Posts, max_posts).await;

        let mut posts = Vec::with_capacity(nodes.len());
        for node in &nodes {
            match page.inner_text(node).await {
                Ok(text) => posts.push(ScrapedRecord::post(text.unwrap_or_default())),
                Err(e) => {
                    e.log_warn();
                }
            }
        }
        posts
    }

    async fn collect_comments<P: PageDriver>(
        &self,
        page: &P,
        url: &Url,
        max_comments: usize,
    ) -> Vec<ScrapedRecord> {
        let nodes = self
            .collect_listing(page, url, Listing::Comments, max_comments)
            .await;

        let mut comments = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let label = match page.attribute(node, COMMENT_LABEL_ATTRIBUTE).await {
                Ok(Some(label)) => label,
                Ok(None) => continue,
                Err(e) => {
                    e.log_warn();
                    continue;
                }
            };

            match parse_comment_label(&label) {
                Some(body) => comments.push(ScrapedRecord::comment(body)),
                None => debug!("Skipping thread link with unexpected label: {}", label),
            }
        }
        comments
    }

    async fn collect_listing<P: PageDriver>(
        &self,
        page: &P,
        url: &Url,
        listing: Listing,
        max_items: usize,
    ) -> Vec<P::Element> {
        info!("Opening {}", url);
        if let Err(e) = page.goto(url.as_str(), self.config.navigation_timeout()).await {
            e.log_warn();
        }

        self.accept_cookies(page).await;

        if let Err(e) = page
            .wait_for_selector(listing.selector(), self.config.selector_timeout())
            .await
        {
            debug!("{}", e);
            warn!("{}", listing.missing_content_warning());
        }

        let collector =
            ScrollCollector::new(self.config.settle_delay(), self.config.scroll_step_px);
        collector
            .collect(page, listing.selector(), max_items, self.config.max_scrolls)
            .await
    }

    async fn accept_cookies<P: PageDriver>(&self, page: &P) {
        match page
            .click_text(
                CONSENT_BUTTON_TAG,
                CONSENT_BUTTON_TEXT,
                self.config.consent_timeout(),
            )
            .await
        {
            Ok(()) => debug!("Dismissed cookie consent banner"),
            Err(e) => debug!("Cookie consent not dismissed: {}", e),
        }
    }
}
