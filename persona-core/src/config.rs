use crate::{ConfigError, CoreError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "persona.toml";
pub const CONFIG_PATH_ENV: &str = "REDDITPERSONA_CONFIG";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub max_posts: usize,
    pub max_comments: usize,
    pub max_scrolls: u32,
    /// Pixels scrolled per iteration; large enough to hit the bottom of the list.
    pub scroll_step_px: i64,
    pub settle_delay_ms: u64,
    pub navigation_timeout_ms: u64,
    pub selector_timeout_ms: u64,
    pub consent_timeout_ms: u64,
    /// Browser binary to launch instead of the auto-detected Chrome/Chromium.
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com/".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_posts: 200,
            max_comments: 200,
            max_scrolls: 80,
            scroll_step_px: 3000,
            settle_delay_ms: 3000,
            navigation_timeout_ms: 60_000,
            selector_timeout_ms: 15_000,
            consent_timeout_ms: 4_000,
            chrome_executable: None,
        }
    }
}

impl ScraperConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_millis(self.consent_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl OutputConfig {
    pub fn persona_path(&self, username: &str) -> PathBuf {
        self.directory.join(format!("{}_persona.txt", username))
    }
}

impl AppConfig {
    /// Loads config from `REDDITPERSONA_CONFIG` if set, otherwise from
    /// `persona.toml` in the working directory when present, otherwise defaults.
    pub fn load() -> Result<Self, CoreError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    debug!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CoreError> {
        let config: AppConfig = toml::from_str(raw).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scraper = &self.scraper;
        let checks: [(&str, u64); 6] = [
            ("scraper.max_posts", scraper.max_posts as u64),
            ("scraper.max_comments", scraper.max_comments as u64),
            ("scraper.max_scrolls", scraper.max_scrolls as u64),
            ("scraper.navigation_timeout_ms", scraper.navigation_timeout_ms),
            ("scraper.selector_timeout_ms", scraper.selector_timeout_ms),
            ("scraper.consent_timeout_ms", scraper.consent_timeout_ms),
        ];

        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if scraper.scroll_step_px <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraper.scroll_step_px".to_string(),
                value: scraper.scroll_step_px.to_string(),
            });
        }

        if !scraper.base_url.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "scraper.base_url".to_string(),
                value: scraper.base_url.clone(),
            });
        }

        Ok(())
    }
}
