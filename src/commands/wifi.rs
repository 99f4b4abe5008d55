use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::gateway::Gateway;
use crate::types::{BandSelection, Credentials};
use crate::webdriver::{Browser, BrowserType};

/// Log in and set the managed radios to the requested state
pub async fn handle_set(
    enable: bool,
    url: Url,
    credentials: Credentials,
    bands: BandSelection,
    browser_type: BrowserType,
    headless: bool,
    wait: Duration,
) -> Result<()> {
    info!("2.4 GHz WiFi managed: {}", bands.ghz24);
    info!("5 GHz WiFi managed: {}", bands.ghz5);

    let browser = Browser::new(browser_type, headless).await?;
    let gateway = Gateway::login(browser, url, &credentials, wait).await?;

    let outcome = gateway.set_wifi_status(enable, bands).await;

    if let Err(e) = gateway.close().await {
        debug!("Failed to close browser session: {}", e);
    }
    outcome?;

    if enable {
        println!("[SUCCESS] WiFi enabled.");
    } else {
        println!("[SUCCESS] WiFi disabled.");
    }

    Ok(())
}
