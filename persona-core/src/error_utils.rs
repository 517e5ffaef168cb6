use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    /// Whether the error must end the run instead of being absorbed.
    fn is_fatal(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Scrape(e) => {
                error!("Scrape error details: {:?}", e);
            }
            CoreError::Analysis(e) => {
                error!("Analysis error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_fatal(&self) -> bool {
        match self {
            CoreError::Scrape(e) => e.is_fatal(),
            CoreError::Analysis(e) => e.is_fatal(),
            CoreError::Config(e) => e.is_fatal(),
            CoreError::Io(_) => true,
            CoreError::InvalidInput { .. } => true,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Scrape(e) => e.user_friendly_message(),
            CoreError::Analysis(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(e) => format!("Could not read or write a file: {}", e),
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Scrape(_) => "SCRAPE".to_string(),
            CoreError::Analysis(_) => "ANALYSIS".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
        }
    }
}

impl ErrorExt for ScrapeError {
    fn log_error(&self) -> &Self {
        error!("ScrapeError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ScrapeError (warning): {}", self);
        self
    }

    fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScrapeError::BrowserLaunchFailed { .. } | ScrapeError::NothingScraped { .. }
        )
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::BrowserLaunchFailed { reason } => format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed?",
                reason
            ),
            ScrapeError::NothingScraped { .. } => {
                "Nothing scraped. Either the user has no activity or Reddit changed its layout."
                    .to_string()
            }
            ScrapeError::NavigationFailed { url, .. } => {
                format!("Could not load {}. Continuing with what was collected.", url)
            }
            ScrapeError::SelectorTimeout { .. } => {
                "Expected content did not appear. The user may have no activity here or the page structure changed.".to_string()
            }
            ScrapeError::ClickFailed { text } => {
                format!("No '{}' button found; continuing without it.", text)
            }
            _ => "Browser automation error occurred. Continuing with partial data.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ScrapeError::BrowserLaunchFailed { .. } => "SCRAPE_BROWSER_LAUNCH".to_string(),
            ScrapeError::NothingScraped { .. } => "SCRAPE_NOTHING_SCRAPED".to_string(),
            ScrapeError::NavigationFailed { .. } => "SCRAPE_NAVIGATION".to_string(),
            ScrapeError::SelectorTimeout { .. } => "SCRAPE_SELECTOR_TIMEOUT".to_string(),
            ScrapeError::ClickFailed { .. } => "SCRAPE_CLICK_FAILED".to_string(),
            ScrapeError::EvaluationFailed { .. } => "SCRAPE_EVALUATION".to_string(),
            ScrapeError::Driver { .. } => "SCRAPE_DRIVER".to_string(),
        }
    }
}

impl ErrorExt for AnalysisError {
    fn log_error(&self) -> &Self {
        error!("AnalysisError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("AnalysisError (warning): {}", self);
        self
    }

    fn is_fatal(&self) -> bool {
        true
    }

    fn user_friendly_message(&self) -> String {
        match self {
            AnalysisError::StopwordsUnavailable { language } => format!(
                "The {} stopword list could not be loaded, keyword extraction is unavailable.",
                language
            ),
        }
    }

    fn error_code(&self) -> String {
        match self {
            AnalysisError::StopwordsUnavailable { .. } => "ANALYSIS_STOPWORDS".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn is_fatal(&self) -> bool {
        true // a bad config needs the user to fix it
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::Parse(_) => {
                "Configuration file could not be parsed. Please check the TOML syntax.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }

    /// Routes an error to the error or warning channel by severity.
    pub fn report(&self, error: &CoreError) {
        if error.is_fatal() {
            self.report_error(error);
        } else {
            self.report_warning(error);
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
