use anyhow::Result;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::gateway::Gateway;
use crate::types::{BandSelection, Credentials, OutputFormat};
use crate::webdriver::{Browser, BrowserType};

/// Log in and report the current state of the managed radios
pub async fn handle_status(
    url: Url,
    credentials: Credentials,
    bands: BandSelection,
    browser_type: BrowserType,
    headless: bool,
    wait: Duration,
    format: OutputFormat,
) -> Result<()> {
    let browser = Browser::new(browser_type, headless).await?;
    let gateway = Gateway::login(browser, url, &credentials, wait).await?;

    let status = gateway.wifi_status(bands).await;

    if let Err(e) = gateway.close().await {
        debug!("Failed to close browser session: {}", e);
    }
    let status = status?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Simple => {
            if let Some(enabled) = status.ghz24 {
                println!(
                    "2.4 GHz WiFi: {}",
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            if let Some(enabled) = status.ghz5 {
                println!(
                    "5 GHz WiFi: {}",
                    if enabled { "enabled" } else { "disabled" }
                );
            }
        }
    }

    Ok(())
}
