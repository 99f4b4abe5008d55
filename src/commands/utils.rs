use anyhow::{Context, Result};
use std::io::Write;

use crate::types::Credentials;

/// Prompt on stderr and read one line from stdin
///
/// Prompts go to stderr so stdout stays clean for status output.
pub fn prompt(label: &str) -> Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    let read = std::io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;

    if read == 0 {
        anyhow::bail!("stdin closed while waiting for input");
    }

    Ok(line.trim().to_string())
}

/// Resolve a value from a CLI argument or an interactive prompt
pub fn resolve(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}

/// Resolve credentials from CLI arguments, prompting for whichever is missing
pub fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<Credentials> {
    Ok(Credentials {
        username: resolve(username, "User: ")?,
        password: resolve(password, "Password: ")?,
    })
}
