#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod errors;
pub mod gateway;
pub mod types;
pub mod webdriver;
mod webdriver_manager;

use types::{Action, Bands, OutputFormat};
use webdriver::BrowserType;

const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "dpc3848v")]
#[command(about = "Toggle the WiFi radios of a Technicolor DPC3848V gateway", long_about = None)]
struct Cli {
    /// Action to perform: on, off or status (prompted for when omitted)
    action: Option<String>,

    /// Router admin UI URL, e.g. http://192.168.0.1 (prompted for when omitted)
    #[arg(long)]
    url: Option<String>,

    /// Admin username (prompted for when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Admin password (prompted for when omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// Radio bands to manage
    #[arg(long, default_value = "2.4ghz")]
    bands: Bands,

    /// Browser to use
    #[arg(short, long, default_value = "firefox")]
    browser: String,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless")]
    no_headless: bool,

    /// Seconds to wait for each element before giving up
    #[arg(long, default_value = "30")]
    wait: u64,

    /// Output format for the status action
    #[arg(short, long, default_value = "simple")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Always clean up WebDriver processes before exiting
    webdriver_manager::GLOBAL_WEBDRIVER_MANAGER.stop_all();

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            let gateway_err: errors::GatewayError = err.into();

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": gateway_err.to_string(),
                "exit_code": gateway_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", gateway_err);
            std::process::exit(gateway_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so output on stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dpc3848v=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    // The action is validated before anything else is asked for
    let action: Action = commands::utils::resolve(cli.action, "Action [on, off, status]: ")?
        .parse()?;

    let url = types::parse_gateway_url(&commands::utils::resolve(
        cli.url,
        "URL (e.g. http://192.168.0.1): ",
    )?)?;
    let credentials = commands::utils::resolve_credentials(cli.username, cli.password)?;

    let browser_type: BrowserType = cli.browser.parse()?;
    let bands = cli.bands.selection();
    let wait = Duration::from_secs(cli.wait);
    let headless = !cli.no_headless;

    match action {
        Action::On => {
            commands::wifi::handle_set(
                true,
                url,
                credentials,
                bands,
                browser_type,
                headless,
                wait,
            )
            .await?
        }
        Action::Off => {
            commands::wifi::handle_set(
                false,
                url,
                credentials,
                bands,
                browser_type,
                headless,
                wait,
            )
            .await?
        }
        Action::Status => {
            commands::status::handle_status(
                url,
                credentials,
                bands,
                browser_type,
                headless,
                wait,
                cli.format,
            )
            .await?
        }
    }

    Ok(())
}
