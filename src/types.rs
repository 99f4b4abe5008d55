use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// What to do with the gateway's radios
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Enable the managed radios
    On,
    /// Disable the managed radios
    Off,
    /// Report the current radio state
    Status,
}

impl std::str::FromStr for Action {
    type Err = anyhow::Error;

    /// Parse an action from user input (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "on" => Ok(Action::On),
            "off" => Ok(Action::Off),
            "status" => Ok(Action::Status),
            _ => anyhow::bail!("action should be 'on', 'off' or 'status', got '{}'", s.trim()),
        }
    }
}

/// Radio bands selectable from the CLI
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Bands {
    /// The 2.4 GHz radio only
    #[value(name = "2.4ghz")]
    Ghz24,
    /// The 5 GHz radio only
    #[value(name = "5ghz")]
    Ghz5,
    /// Both radios
    Both,
}

impl Bands {
    /// Expand the CLI value into per-band flags
    pub fn selection(self) -> BandSelection {
        match self {
            Bands::Ghz24 => BandSelection {
                ghz24: true,
                ghz5: false,
            },
            Bands::Ghz5 => BandSelection {
                ghz24: false,
                ghz5: true,
            },
            Bands::Both => BandSelection {
                ghz24: true,
                ghz5: true,
            },
        }
    }
}

/// Which radios an operation touches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandSelection {
    /// Manage the 2.4 GHz radio
    pub ghz24: bool,
    /// Manage the 5 GHz radio
    pub ghz5: bool,
}

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Admin credentials for the gateway login form
#[derive(Clone)]
pub struct Credentials {
    /// Login form username
    pub username: String,
    /// Login form password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    /// Keep the password out of logs and panic messages
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Per-band radio state read back from the settings form
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiStatus {
    /// 2.4 GHz radio enabled, when that band is managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghz24: Option<bool>,
    /// 5 GHz radio enabled, when that band is managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghz5: Option<bool>,
}

/// Parse and validate the router admin UI URL
pub fn parse_gateway_url(s: &str) -> Result<Url> {
    let trimmed = s.trim();
    let url =
        Url::parse(trimmed).map_err(|e| anyhow::anyhow!("invalid URL '{}': {}", trimmed, e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("unsupported URL scheme '{}'; use http or https", other),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
