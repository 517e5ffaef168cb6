use anyhow::Context;
use persona_core::{normalize_username, AppConfig, CoreError, ErrorExt, ErrorReporter};
use persona_engine::AnalysisContext;
use reddit_scraper::ChromiumLauncher;
use std::process;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DEFAULT_LOG_FILTER: &str =
    "redditpersona=info,reddit_scraper=info,persona_engine=info,persona_core=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let reporter = ErrorReporter::new();
    let config = AppConfig::load().map_err(|e| report(&reporter, e))?;
    let context = AnalysisContext::english().map_err(|e| report(&reporter, e))?;

    let raw = prompt("Enter Reddit username (without /user/): ").await?;
    let username = normalize_username(&raw).map_err(|e| report(&reporter, e))?;

    tracing::info!("Building persona for u/{}", username);

    let launcher = ChromiumLauncher::from_config(&config.scraper);
    match redditpersona::run(launcher, &config, &context, &username).await {
        Ok(outcome) => {
            println!(
                "Scraped {} posts and {} comments.",
                outcome.posts, outcome.comments
            );
            println!("\n=== Generated User Persona ===\n");
            println!("{}", outcome.persona);
            println!("Persona saved to {}", outcome.path.display());
            Ok(())
        }
        Err(e @ CoreError::Scrape(_)) => {
            reporter.report(&e);
            eprintln!("❌ {} Exiting.", e.user_friendly_message());
            process::exit(1);
        }
        Err(e) => Err(report(&reporter, e)),
    }
}

fn report(reporter: &ErrorReporter, error: CoreError) -> anyhow::Error {
    reporter.report(&error);
    anyhow::anyhow!(error.user_friendly_message())
}

async fn prompt(message: &str) -> anyhow::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read username from stdin")?;
    Ok(line)
}
