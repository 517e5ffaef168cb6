use crate::browser::{BrowserLauncher, BrowserSession, NodeIdentity, PageDriver};
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use persona_core::{ScrapeError, ScraperConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl NodeIdentity for Element {
    fn node_id(&self) -> i64 {
        *self.backend_node_id.inner()
    }
}

/// Launches a local headless Chrome/Chromium over CDP.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    request_timeout: Duration,
    executable: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            executable: None,
        }
    }

    /// Navigation timeout as the CDP request timeout, plus any configured binary.
    pub fn from_config(config: &ScraperConfig) -> Self {
        let launcher = Self::new(config.navigation_timeout());
        match &config.chrome_executable {
            Some(path) => launcher.with_executable(path.clone()),
            None => launcher,
        }
    }

    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }
}

impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self, user_agent: &str) -> Result<ChromiumSession, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.request_timeout)
            .arg(format!("--user-agent={}", user_agent));
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|reason| ScrapeError::BrowserLaunchFailed { reason })?;

        let (mut browser, mut handler) =
            Browser::launch(config)
                .await
                .map_err(|e| ScrapeError::BrowserLaunchFailed {
                    reason: e.to_string(),
                })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler_task.abort();
                return Err(ScrapeError::BrowserLaunchFailed {
                    reason: format!("could not open page: {}", e),
                });
            }
        };

        info!("Headless browser launched");
        Ok(ChromiumSession {
            browser,
            page: ChromiumPage { page },
            handler_task,
        })
    }
}

pub struct ChromiumSession {
    browser: Browser,
    page: ChromiumPage,
    handler_task: JoinHandle<()>,
}

impl BrowserSession for ChromiumSession {
    type Page = ChromiumPage;

    fn page(&self) -> &ChromiumPage {
        &self.page
    }

    async fn close(mut self) -> Result<(), ScrapeError> {
        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ScrapeError::Driver {
                reason: format!("browser close failed: {}", e),
            });
        if let Err(e) = self.browser.wait().await {
            warn!("Waiting for browser exit failed: {}", e);
        }
        self.handler_task.abort();
        info!("Headless browser closed");
        result
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        // Browser's own Drop kills the child process.
        self.handler_task.abort();
    }
}

pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> Result<T, ScrapeError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| ScrapeError::EvaluationFailed {
                reason: e.to_string(),
            })?
            .into_value::<T>()
            .map_err(|e| ScrapeError::EvaluationFailed {
                reason: e.to_string(),
            })
    }
}

impl PageDriver for ChromiumPage {
    type Element = Element;

    async fn goto(&self, url: &str, limit: Duration) -> Result<(), ScrapeError> {
        match timeout(limit, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ScrapeError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ScrapeError::NavigationFailed {
                url: url.to_string(),
                reason: format!("timed out after {}ms", limit.as_millis()),
            }),
        }
    }

    async fn click_text(&self, tag: &str, text: &str, limit: Duration) -> Result<(), ScrapeError> {
        let tag_js = serde_json::to_string(tag).map_err(|e| ScrapeError::Driver {
            reason: e.to_string(),
        })?;
        let text_js = serde_json::to_string(text).map_err(|e| ScrapeError::Driver {
            reason: e.to_string(),
        })?;
        let script = format!(
            r#"(() => {{
                const target = Array.from(document.querySelectorAll({tag_js}))
                    .find(el => (el.textContent || "").includes({text_js}));
                if (!target) {{ return false; }}
                target.click();
                return true;
            }})()"#
        );

        let deadline = Instant::now() + limit;
        loop {
            if self.eval::<bool>(script.clone()).await.unwrap_or(false) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::ClickFailed {
                    text: text.to_string(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Element>, ScrapeError> {
        self.page
            .find_elements(selector)
            .await
            .map_err(|e| ScrapeError::Driver {
                reason: format!("query '{}' failed: {}", selector, e),
            })
    }

    async fn wait_for_selector(&self, selector: &str, limit: Duration) -> Result<(), ScrapeError> {
        let deadline = Instant::now() + limit;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::SelectorTimeout {
                    selector: selector.to_string(),
                    timeout_ms: limit.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn inner_text(&self, element: &Element) -> Result<Option<String>, ScrapeError> {
        element.inner_text().await.map_err(|e| ScrapeError::Driver {
            reason: format!("reading text failed: {}", e),
        })
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>, ScrapeError> {
        element
            .attribute(name)
            .await
            .map_err(|e| ScrapeError::Driver {
                reason: format!("reading attribute '{}' failed: {}", name, e),
            })
    }

    async fn scroll_height(&self) -> Result<i64, ScrapeError> {
        self.eval("document.body.scrollHeight".to_string()).await
    }

    async fn scroll_by(&self, delta_y: i64) -> Result<(), ScrapeError> {
        self.eval::<bool>(format!("window.scrollBy(0, {}); true", delta_y))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_from_config() {
        let launcher = ChromiumLauncher::from_config(&ScraperConfig::default());
        assert_eq!(launcher.request_timeout, Duration::from_secs(60));
        assert!(launcher.executable.is_none());

        let config = ScraperConfig {
            navigation_timeout_ms: 5_000,
            chrome_executable: Some(PathBuf::from("/opt/chromium/chrome")),
            ..Default::default()
        };
        let launcher = ChromiumLauncher::from_config(&config);
        assert_eq!(launcher.request_timeout, Duration::from_secs(5));
        assert_eq!(
            launcher.executable,
            Some(PathBuf::from("/opt/chromium/chrome"))
        );
    }
}
