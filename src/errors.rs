use thiserror::Error;

/// Custom error type that includes exit codes
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Element not found (exit code 2)
    #[error("no element found matching selector: {0}")]
    ElementNotFound(String),
    /// WebDriver connection failed (exit code 4)
    #[error("WebDriver connection failed: {0}")]
    WebDriverFailed(String),
    /// Operation timeout (exit code 5)
    #[error("operation timed out: {0}")]
    Timeout(String),
    /// Generic error (exit code 1)
    #[error(transparent)]
    Other(anyhow::Error),
}

impl GatewayError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GatewayError::ElementNotFound(_) => 2,
            GatewayError::WebDriverFailed(_) => 4,
            GatewayError::Timeout(_) => 5,
            GatewayError::Other(_) => 1,
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    /// Classify an error from the automation flow by its message
    fn from(err: anyhow::Error) -> Self {
        let msg = err.to_string();

        if msg.contains("no element found matching selector") {
            GatewayError::ElementNotFound(msg)
        } else if msg.contains("WebDriver")
            || msg.contains("geckodriver")
            || msg.contains("chromedriver")
        {
            GatewayError::WebDriverFailed(msg)
        } else if msg.contains("timed out") || msg.contains("timeout") {
            GatewayError::Timeout(msg)
        } else {
            GatewayError::Other(err)
        }
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
