//! Library module for hf_model_check
//!
//! Checks that a Hugging Face API key can reach a hosted inference model,
//! and probes a few fallback models when it cannot.

pub mod config;
pub mod probe;
pub mod report;
pub mod test_image;
pub mod verify;

pub use config::Config;
pub use probe::{probe_alternatives, probe_model, ProbeOutcome, ProbeResult, ALTERNATIVE_MODELS};
pub use verify::{check_model_access, verify_access, AccessOutcome};

use anyhow::{Context, Result};
use reqwest::Client;
use std::io::Write;

/// HTTP client shared by the check and the probes; timeouts are set per request
pub fn http_client() -> Result<Client> {
    Client::builder()
        .build()
        .context("Failed to build HTTP client")
}

/// The whole script: banner, access check, then next steps on success or
/// the fallback probes on failure, then the footer.
///
/// Returns whether the access check passed.
pub async fn run(client: &Client, config: &Config, out: &mut impl Write) -> Result<bool> {
    report::banner(out)?;

    let ok = check_model_access(client, config, out).await?;
    if ok {
        report::next_steps(out)?;
    } else {
        report::fix_hint(out)?;
        probe_alternatives(client, config, &ALTERNATIVE_MODELS, out).await?;
    }

    report::footer(out)?;
    Ok(ok)
}
