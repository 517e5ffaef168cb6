use persona_core::{AppConfig, CoreError};
use persona_engine::{AnalysisContext, PersonaBuilder};
use reddit_scraper::{BrowserLauncher, RedditScraper};
use std::path::PathBuf;
use tracing::info;

/// Result of one successful persona run.
#[derive(Debug, Clone)]
pub struct PersonaRun {
    pub posts: usize,
    pub comments: usize,
    pub persona: String,
    pub path: PathBuf,
}

/// Scrapes `username`, builds the persona and writes it to the output directory.
///
/// Nothing is written when scraping fails; the error is returned as-is.
pub async fn run<L: BrowserLauncher>(
    launcher: L,
    config: &AppConfig,
    context: &AnalysisContext,
    username: &str,
) -> Result<PersonaRun, CoreError> {
    let scraper = RedditScraper::new(launcher, config.scraper.clone())?;
    let activity = scraper
        .scrape(
            username,
            config.scraper.max_posts,
            config.scraper.max_comments,
        )
        .await?;

    let persona =
        PersonaBuilder::new(context).build(&activity.posts, &activity.comments, username);

    let path = config.output.persona_path(username);
    tokio::fs::write(&path, &persona).await?;
    info!("Wrote persona for u/{} to {}", username, path.display());

    Ok(PersonaRun {
        posts: activity.posts.len(),
        comments: activity.comments.len(),
        persona,
        path,
    })
}
