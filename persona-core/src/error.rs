use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("Failed to launch browser: {reason}")]
    BrowserLaunchFailed { reason: String },

    #[error("Nothing scraped for u/{username}")]
    NothingScraped { username: String },

    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("Timed out after {timeout_ms}ms waiting for selector: {selector}")]
    SelectorTimeout { selector: String, timeout_ms: u64 },

    #[error("No element containing text '{text}' could be clicked")]
    ClickFailed { text: String },

    #[error("Page script evaluation failed: {reason}")]
    EvaluationFailed { reason: String },

    #[error("Browser driver error: {reason}")]
    Driver { reason: String },
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Stopword corpus unavailable for {language}")]
    StopwordsUnavailable { language: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
