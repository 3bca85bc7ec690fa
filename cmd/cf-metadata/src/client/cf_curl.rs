use anyhow::{Context, Result};
use metadata_core::Transport;
use serde::Deserialize;
use std::process::Command;

/// API access through the host CLI's `curl` command. The host CLI owns the
/// session and token refresh.
pub struct CfCurl {
    binary: String,
}

/// v3 error envelope. `cf curl` exits 0 on HTTP errors and prints this.
#[derive(Debug, Default, Deserialize)]
struct ApiErrors {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

impl CfCurl {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn get_args(path: &str) -> Vec<String> {
        vec!["curl".to_string(), path.to_string()]
    }

    fn patch_args(path: &str, body: &str) -> Vec<String> {
        vec![
            "curl".to_string(),
            path.to_string(),
            "-X".to_string(),
            "PATCH".to_string(),
            "-d".to_string(),
            body.to_string(),
        ]
    }

    fn run(&self, args: &[String]) -> Result<String> {
        tracing::debug!(binary = %self.binary, ?args, "Running host CLI");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run '{}'", self.binary))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            anyhow::bail!("{} curl failed ({}): {}", self.binary, output.status, message);
        }

        let body = String::from_utf8(output.stdout).context("Response was not valid UTF-8")?;
        check_api_errors(&body)?;
        Ok(body)
    }
}

/// Turn a v3 error envelope into an error. Anything else passes through.
fn check_api_errors(body: &str) -> Result<()> {
    let parsed: ApiErrors = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(()),
    };

    if parsed.errors.is_empty() {
        return Ok(());
    }

    let details = parsed
        .errors
        .iter()
        .map(|e| format!("{} ({}): {}", e.title, e.code, e.detail))
        .collect::<Vec<_>>()
        .join("; ");

    anyhow::bail!("API error: {}", details)
}

impl Transport for CfCurl {
    fn get(&self, path: &str) -> Result<String> {
        self.run(&Self::get_args(path))
    }

    fn patch(&self, path: &str, body: &str) -> Result<String> {
        self.run(&Self::patch_args(path, body))
    }
}
