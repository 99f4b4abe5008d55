use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::webdriver::BrowserType;

/// Manages WebDriver processes (geckodriver, chromedriver)
pub struct WebDriverManager {
    processes: Arc<Mutex<Vec<WebDriverProcess>>>,
}

struct WebDriverProcess {
    browser_type: BrowserType,
    child: Child,
    port: u16,
    url: String,
    #[cfg(unix)]
    process_group_id: Option<i32>,
}

impl Default for WebDriverManager {
    fn default() -> Self {
        Self {
            processes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl WebDriverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a WebDriver is running for the given browser type
    /// Returns the URL to connect to
    pub async fn ensure_driver(&self, browser_type: &BrowserType) -> Result<String> {
        // Reuse a driver this process already started, if it still answers
        let managed_urls: Vec<String> = {
            let processes = self.processes.lock().unwrap();
            processes
                .iter()
                .filter(|p| p.browser_type == *browser_type)
                .map(|p| p.url.clone())
                .collect()
        };

        for url in managed_urls {
            if Self::verify_driver_working(&url).await {
                debug!("Using existing managed WebDriver at {}", url);
                return Ok(url);
            }
        }

        // Check the standard port for an externally managed driver
        let standard_url = format!("http://localhost:{}", browser_type.standard_port());
        if Self::is_driver_running(&standard_url).await
            && Self::verify_driver_working(&standard_url).await
        {
            debug!("Found external WebDriver at {}", standard_url);
            return Ok(standard_url);
        }

        info!("WebDriver not detected, attempting to start automatically...");
        self.start_driver(browser_type).await
    }

    /// Start a WebDriver process on a free port
    async fn start_driver(&self, browser_type: &BrowserType) -> Result<String> {
        let command = browser_type.driver_command();
        let port = Self::find_free_port_for_browser(browser_type)?;

        if !Self::command_exists(command) {
            anyhow::bail!(
                "{} not found in PATH. Please install it:\n\
                  macOS: brew install {}\n\
                  Linux: Download from official releases\n\
                  Or see: https://www.selenium.dev/documentation/webdriver/getting_started/install_drivers/",
                command,
                command
            );
        }

        info!("Starting {} on port {}", command, port);

        let args = match browser_type {
            BrowserType::Firefox => vec!["--port".to_string(), port.to_string()],
            BrowserType::Chrome => vec![format!("--port={}", port)],
        };

        let mut cmd = Command::new(command);
        cmd.args(&args).stdout(Stdio::piped()).stderr(Stdio::piped());

        // On Unix, create a new process group so the whole tree can be killed
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd
            .spawn()
            .context(format!("Failed to start {}", command))?;

        #[cfg(unix)]
        let process_group_id = Some(child.id() as i32);

        let url = format!("http://localhost:{}", port);

        {
            let mut processes = self.processes.lock().unwrap();
            processes.push(WebDriverProcess {
                browser_type: *browser_type,
                child,
                port,
                url: url.clone(),
                #[cfg(unix)]
                process_group_id,
            });
        }

        // Wait up to 3 seconds for the driver to answer
        let max_attempts = 30;
        for attempt in 1..=max_attempts {
            if Self::is_driver_running(&url).await {
                info!("WebDriver started successfully on port {}", port);
                return Ok(url);
            }
            if attempt < max_attempts {
                sleep(Duration::from_millis(100)).await;
            }
        }

        self.cleanup_failed_process(port);
        anyhow::bail!("WebDriver failed to start within timeout")
    }

    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        #[cfg(unix)]
        {
            Command::new("which")
                .arg(command)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }

        #[cfg(windows)]
        {
            Command::new("where")
                .arg(command)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }
    }

    /// Find a free port to use, preferring the browser's standard one
    pub fn find_free_port_for_browser(browser_type: &BrowserType) -> Result<u16> {
        let standard = browser_type.standard_port();

        for port in standard..standard + 3 {
            if !Self::is_port_in_use(port) {
                debug!("Found free port {} for {:?}", port, browser_type);
                return Ok(port);
            }
            debug!("Port {} is in use for {:?}", port, browser_type);
        }

        // Fall back to letting the OS assign a port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }

    /// Check if a port is in use
    pub fn is_port_in_use(port: u16) -> bool {
        std::net::TcpListener::bind(("127.0.0.1", port)).is_err()
    }

    /// Check if WebDriver is running at the given URL
    pub async fn is_driver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::Client::new()
            .get(&status_url)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Verify that WebDriver is actually ready to take a session
    async fn verify_driver_working(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::Client::new()
            .get(&status_url)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) => {
                if let Ok(body) = response.json::<serde_json::Value>().await {
                    body.get("value")
                        .and_then(|v| v.get("ready"))
                        .and_then(|r| r.as_bool())
                        .unwrap_or(false)
                } else {
                    false
                }
            }
            Err(_) => false,
        }
    }

    /// Kill managed WebDriver processes for a browser type
    pub fn kill_driver(&self, browser_type: &BrowserType) {
        let mut processes = self.processes.lock().unwrap();
        let mut kept = Vec::new();

        for mut process in processes.drain(..) {
            if process.browser_type != *browser_type {
                kept.push(process);
                continue;
            }

            info!(
                "Killing managed {} on port {}",
                browser_type.driver_command(),
                process.port
            );

            #[cfg(unix)]
            if let Some(pgid) = process.process_group_id {
                Self::kill_process_group(pgid);
            }

            let _ = process.child.kill();
        }

        *processes = kept;
    }

    /// Kill a process group on Unix systems
    #[cfg(unix)]
    fn kill_process_group(pgid: i32) {
        // SIGTERM first for a graceful shutdown
        if let Err(e) = Command::new("kill")
            .args(["-TERM", &format!("-{}", pgid)])
            .output()
        {
            debug!("Failed to send SIGTERM to process group {}: {}", pgid, e);
        }

        std::thread::sleep(Duration::from_millis(100));

        if let Err(e) = Command::new("kill")
            .args(["-KILL", &format!("-{}", pgid)])
            .output()
        {
            debug!("Failed to send SIGKILL to process group {}: {}", pgid, e);
        }
    }

    /// Clean up a process that never became ready
    fn cleanup_failed_process(&self, port: u16) {
        let mut processes = self.processes.lock().unwrap();
        if let Some(index) = processes.iter().position(|p| p.port == port) {
            let mut process = processes.remove(index);

            #[cfg(unix)]
            if let Some(pgid) = process.process_group_id {
                info!(
                    "Killing process group {} for failed WebDriver on port {}",
                    pgid, port
                );
                Self::kill_process_group(pgid);
            }

            let _ = process.child.kill();
        }
    }

    /// Stop every WebDriver process this manager started
    pub fn stop_all(&self) {
        let mut processes = self.processes.lock().unwrap();

        for mut process in processes.drain(..) {
            debug!(
                "Stopping {} on port {}",
                process.browser_type.driver_command(),
                process.port
            );

            #[cfg(unix)]
            if let Some(pgid) = process.process_group_id {
                Self::kill_process_group(pgid);
            }

            let _ = process.child.kill();
        }
    }
}

impl Drop for WebDriverManager {
    fn drop(&mut self) {
        self.stop_all();
    }
}

lazy_static::lazy_static! {
    /// Process-wide manager so spawned drivers are cleaned up on exit
    pub static ref GLOBAL_WEBDRIVER_MANAGER: WebDriverManager = WebDriverManager::new();
}

#[cfg(test)]
#[path = "webdriver_manager_test.rs"]
mod webdriver_manager_test;
