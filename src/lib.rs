//! # dpc3848v
#![allow(clippy::uninlined_format_args)]
//!
//! CLI tool that toggles the WiFi radios of a 'Technicolor DPC3848V DOCSIS 3.0
//! Gateway' by driving a headless browser through the router's web
//! administration UI: log in via the login form, navigate to the wireless
//! radio settings page, click the radio-state checkboxes for the selected
//! bands, and press the save button.
//!
//! The router exposes no API, so the "protocol" is the DOM its firmware
//! happens to render; every interaction is gated by an explicit wait for
//! element presence (30 seconds by default).
//!
//! ## CLI Usage
//!
//! ```bash
//! # Prompt for everything, like the interactive flow
//! dpc3848v
//!
//! # Fully non-interactive
//! dpc3848v off --url http://192.168.0.1 -u admin -p secret
//!
//! # Manage both radios instead of just 2.4 GHz
//! dpc3848v on --url http://192.168.0.1 -u admin -p secret --bands both
//!
//! # Read the current radio state as JSON
//! dpc3848v status --url http://192.168.0.1 -u admin -p secret --format json
//!
//! # Watch the browser do its thing
//! dpc3848v off --url http://192.168.0.1 -u admin -p secret --no-headless
//! ```
//!
//! A geckodriver (or chromedriver, with `--browser chrome`) is started
//! automatically when none is reachable on its standard port.
//!
//! ## Library Usage
//!
//! ```no_run
//! use dpc3848v::{BandSelection, Browser, BrowserType, Credentials, Gateway};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let browser = Browser::new(BrowserType::Firefox, true).await?;
//! let url = dpc3848v::parse_gateway_url("http://192.168.0.1")?;
//! let credentials = Credentials {
//!     username: "admin".to_string(),
//!     password: "secret".to_string(),
//! };
//!
//! let gateway = Gateway::login(browser, url, &credentials, Duration::from_secs(30)).await?;
//! gateway
//!     .set_wifi_status(false, BandSelection { ghz24: true, ghz5: false })
//!     .await?;
//! gateway.close().await?;
//! # Ok(())
//! # }
//! ```

/// The DPC3848V login and radio-settings flow
pub mod gateway;

/// Type definitions for actions, bands and credentials
pub mod types;

/// WebDriver browser control and automation
pub mod webdriver;

/// Automatic WebDriver process management
pub mod webdriver_manager;

pub use gateway::{Gateway, checkbox_plan};
pub use types::{
    Action, BandSelection, Bands, Credentials, OutputFormat, WifiStatus, parse_gateway_url,
};
pub use webdriver::{Browser, BrowserType};
