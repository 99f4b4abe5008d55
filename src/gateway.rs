use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::types::{BandSelection, Credentials, WifiStatus};
use crate::webdriver::Browser;

// Element ids and selectors exposed by the DPC3848V firmware.
const USERNAME_FIELD: &str = "#username_login";
const PASSWORD_FIELD: &str = "#password_login";
const LOGIN_BUTTON: &str = "input[type='submit'][value='Log In']";
const WPS_LINK: &str = "a[href='WPS.php']";
const RADIO_SETTINGS_LINK: &str = "a[href='WRadioSettings.php']";
const RADIO_FORM_MARKER: &str = "#wifi_enable_dis";
const SAVE_BUTTON: &str = "#save";

const ENABLE_24GHZ: &str = "wifi_enable_en";
const DISABLE_24GHZ: &str = "wifi_enable_dis";
const ENABLE_5GHZ: &str = "wifi_enable_en_5g";
const DISABLE_5GHZ: &str = "wifi_enable_dis_5g";

/// Logged-in session against the 'Technicolor DPC3848V DOCSIS 3.0 Gateway'
/// web administration UI
pub struct Gateway {
    browser: Browser,
    url: Url,
    wait: Duration,
}

impl Gateway {
    /// Log in to the router web interface
    pub async fn login(
        browser: Browser,
        url: Url,
        credentials: &Credentials,
        wait: Duration,
    ) -> Result<Self> {
        let gateway = Gateway { browser, url, wait };

        info!("Logging in at {}", gateway.url);
        gateway.browser.goto(gateway.url.as_str()).await?;

        gateway
            .browser
            .type_into(USERNAME_FIELD, &credentials.username, wait)
            .await?;
        gateway
            .browser
            .type_into(PASSWORD_FIELD, &credentials.password, wait)
            .await?;
        gateway.browser.click(LOGIN_BUTTON, wait).await?;

        Ok(gateway)
    }

    /// Enable or disable the managed radios, then save the form
    pub async fn set_wifi_status(&self, enable: bool, bands: BandSelection) -> Result<()> {
        self.open_radio_settings().await?;

        let plan = checkbox_plan(enable, bands);
        for id in &plan {
            self.browser.click(&format!("#{}", id), self.wait).await?;
        }

        // The save button only matters when something was toggled
        if !plan.is_empty() {
            self.browser.click(SAVE_BUTTON, self.wait).await?;
        }

        info!("Toggled {} radio checkbox(es)", plan.len());
        Ok(())
    }

    /// Read back the per-band radio state from the settings form
    pub async fn wifi_status(&self, bands: BandSelection) -> Result<WifiStatus> {
        self.open_radio_settings().await?;

        let ghz24 = if bands.ghz24 {
            Some(
                self.browser
                    .is_checked(&format!("#{}", ENABLE_24GHZ), self.wait)
                    .await?,
            )
        } else {
            None
        };

        let ghz5 = if bands.ghz5 {
            Some(
                self.browser
                    .is_checked(&format!("#{}", ENABLE_5GHZ), self.wait)
                    .await?,
            )
        } else {
            None
        };

        Ok(WifiStatus { ghz24, ghz5 })
    }

    /// Navigate from the landing page to the wireless radio settings form
    async fn open_radio_settings(&self) -> Result<()> {
        debug!("Opening radio settings");

        self.browser.goto(self.url.as_str()).await?;
        self.browser.click(WPS_LINK, self.wait).await?;
        self.browser.click(RADIO_SETTINGS_LINK, self.wait).await?;

        // Presence only; the firmware renders the whole form at once
        self.browser.wait_for(RADIO_FORM_MARKER, self.wait).await?;

        Ok(())
    }

    /// Tear down the browser session
    pub async fn close(self) -> Result<()> {
        self.browser.close().await
    }
}

/// Checkbox ids to click for the desired radio state, in form order
pub fn checkbox_plan(enable: bool, bands: BandSelection) -> Vec<&'static str> {
    let mut ids = Vec::new();

    if bands.ghz24 {
        ids.push(if enable { ENABLE_24GHZ } else { DISABLE_24GHZ });
    }

    if bands.ghz5 {
        ids.push(if enable { ENABLE_5GHZ } else { DISABLE_5GHZ });
    }

    ids
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;
