use anyhow::{Context, Result};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Name of the WebDriver binary for this browser
    pub fn driver_command(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// Standard port the driver listens on when started externally
    pub fn standard_port(&self) -> u16 {
        match self {
            BrowserType::Firefox => 4444,
            BrowserType::Chrome => 9515,
        }
    }
}

/// Browser instance for WebDriver automation
pub struct Browser {
    pub(crate) client: Client,
}

impl Browser {
    /// Create a new browser instance
    ///
    /// # Arguments
    /// * `browser_type` - Firefox or Chrome
    /// * `headless` - Whether to run in headless mode
    pub async fn new(browser_type: BrowserType, headless: bool) -> Result<Self> {
        info!("Connecting to {:?} WebDriver", browser_type);

        // Ensure a WebDriver is running (will auto-start if needed)
        let webdriver_url = GLOBAL_WEBDRIVER_MANAGER
            .ensure_driver(&browser_type)
            .await?;

        let caps = Self::build_capabilities(browser_type, headless)?;

        debug!("Connecting to WebDriver at {}", webdriver_url);

        let client = match ClientBuilder::rustls()
            .capabilities(caps.clone())
            .connect(&webdriver_url)
            .await
        {
            Ok(client) => client,
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("Session is already started")
                    || error_str.contains("session not created")
                {
                    // The driver is stuck with a stale session; restart it once
                    info!("WebDriver appears to be in a bad state, attempting recovery...");

                    GLOBAL_WEBDRIVER_MANAGER.kill_driver(&browser_type);
                    tokio::time::sleep(Duration::from_millis(500)).await;

                    let new_url = GLOBAL_WEBDRIVER_MANAGER
                        .ensure_driver(&browser_type)
                        .await
                        .context("Failed to restart WebDriver after recovery")?;

                    ClientBuilder::rustls()
                        .capabilities(caps)
                        .connect(&new_url)
                        .await
                        .context("Failed to connect to WebDriver after restart")?
                } else {
                    return Err(e).context("Failed to connect to WebDriver");
                }
            }
        };

        Ok(Browser { client })
    }

    /// Build W3C capabilities for the given browser
    fn build_capabilities(
        browser_type: BrowserType,
        headless: bool,
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut caps = serde_json::Map::new();

        match browser_type {
            BrowserType::Firefox => {
                let mut args = Vec::new();
                if headless {
                    args.push("--headless".to_string());
                }

                let mut firefox_opts = serde_json::Map::new();
                firefox_opts.insert("args".to_string(), json!(args));
                caps.insert("moz:firefoxOptions".to_string(), json!(firefox_opts));
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox".to_string()];
                if headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }

                // Chrome refuses to share a user-data-dir between instances
                let profile_dir = tempfile::Builder::new()
                    .prefix("dpc3848v-chrome-")
                    .tempdir()?;
                #[allow(deprecated)]
                let profile_path = profile_dir.into_path();
                args.push(format!("--user-data-dir={}", profile_path.display()));

                let mut chrome_opts = serde_json::Map::new();
                chrome_opts.insert("args".to_string(), json!(args));
                caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
            }
        }

        Ok(caps)
    }

    /// Navigate to a URL and wait for the document to finish loading
    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);

        self.client.goto(url).await?;

        let wait_script = "return document.readyState === 'complete';";

        // Max 2 seconds; element waits downstream cover slow pages
        for _ in 0..20 {
            match self.client.execute(wait_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => break,
                _ => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }

        Ok(())
    }

    /// Wait until an element matching the selector is present in the DOM
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Element> {
        debug!("Waiting for element: {}", selector);

        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(element) => Ok(element),
            Err(CmdError::WaitTimeout) => anyhow::bail!(
                "timed out after {}s waiting for element matching '{}'",
                timeout.as_secs(),
                selector
            ),
            Err(e) => {
                Err(e).context(format!("no element found matching selector: {}", selector))
            }
        }
    }

    /// Wait for an element, then click it
    pub async fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for(selector, timeout).await?;

        debug!("Clicking element: {}", selector);
        element
            .click()
            .await
            .context(format!("failed to click element: {}", selector))?;

        Ok(())
    }

    /// Wait for an element, then type text into it
    pub async fn type_into(&self, selector: &str, text: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for(selector, timeout).await?;

        debug!("Typing into element: {}", selector);
        element
            .send_keys(text)
            .await
            .context(format!("failed to type into element: {}", selector))?;

        Ok(())
    }

    /// Wait for a checkbox or radio input, then read its checked state
    pub async fn is_checked(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let element = self.wait_for(selector, timeout).await?;

        let checked = element
            .prop("checked")
            .await
            .context(format!("failed to read checked state of: {}", selector))?;

        Ok(matches!(checked.as_deref(), Some("true")))
    }

    /// Close the browser session
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("Failed to close browser session")
    }
}
