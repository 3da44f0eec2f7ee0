//! Primary access check: POST the test image to the configured model.
//!
//! Every result, including transport failures, is folded into an
//! [`AccessOutcome`]. A model that is still loading (503 "loading" or a
//! timeout) counts as a pass, with advice to re-run later.

use colored::Colorize;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::io::{self, Write};

use crate::config::Config;
use crate::report::key_preview;
use crate::test_image::TEST_PNG;

#[derive(Debug, Clone, PartialEq)]
pub enum AccessOutcome {
    /// No `HUGGINGFACE_API_KEY`; nothing was sent
    MissingKey,
    /// 200 with a JSON body
    Ready(Value),
    /// 503 whose `error` mentions loading
    Loading,
    TimedOut,
    /// 503 for any other reason
    ServiceError(Value),
    HttpError { status: u16, body: String },
    /// Transport error or unparseable body
    Failed(String),
}

impl AccessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Loading | Self::TimedOut)
    }

    pub fn report(&self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::MissingKey => {
                writeln!(
                    out,
                    "{}",
                    "❌ HUGGINGFACE_API_KEY not found in .env file".bright_red()
                )?;
                writeln!(out, "Please add your Hugging Face API key to the .env file")?;
                writeln!(out, "Get one free at: https://huggingface.co/settings/tokens")
            }
            Self::Ready(body) => {
                writeln!(out, "{}", "✅ Model is accessible and working!".bright_green())?;
                writeln!(out, "📊 Response: {}", body)
            }
            Self::Loading => {
                writeln!(
                    out,
                    "{}",
                    "⏳ Model is loading... This is normal for the first request.".bright_yellow()
                )?;
                writeln!(out, "💡 Try again in 30-60 seconds.")
            }
            Self::TimedOut => {
                writeln!(
                    out,
                    "{}",
                    "⏳ Request timed out - model might be loading".bright_yellow()
                )?;
                writeln!(
                    out,
                    "💡 This is normal for the first request. Try again in a minute."
                )
            }
            Self::ServiceError(body) => {
                writeln!(out, "{}", format!("❌ Service error: {}", body).bright_red())
            }
            Self::HttpError { status, body } => writeln!(
                out,
                "{}",
                format!("❌ HTTP Error {}: {}", status, body).bright_red()
            ),
            Self::Failed(message) => {
                writeln!(out, "{}", format!("❌ Error: {}", message).bright_red())
            }
        }
    }
}

/// Whether a 503 body says the model is still being loaded
fn is_loading(body: &Value) -> bool {
    body.get("error")
        .and_then(Value::as_str)
        .map(|e| e.to_lowercase().contains("loading"))
        .unwrap_or(false)
}

/// Render a transport error with its source chain
pub(crate) fn describe_error(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

fn transport_outcome(err: reqwest::Error) -> AccessOutcome {
    if err.is_timeout() {
        AccessOutcome::TimedOut
    } else {
        AccessOutcome::Failed(describe_error(err))
    }
}

async fn classify(response: Response) -> AccessOutcome {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return transport_outcome(e),
    };

    match status {
        StatusCode::OK => match serde_json::from_str(&text) {
            Ok(body) => AccessOutcome::Ready(body),
            Err(e) => AccessOutcome::Failed(format!("invalid JSON in response: {}", e)),
        },
        StatusCode::SERVICE_UNAVAILABLE => match serde_json::from_str::<Value>(&text) {
            Ok(body) if is_loading(&body) => AccessOutcome::Loading,
            Ok(body) => AccessOutcome::ServiceError(body),
            Err(e) => AccessOutcome::Failed(format!("invalid JSON in 503 response: {}", e)),
        },
        other => AccessOutcome::HttpError {
            status: other.as_u16(),
            body: text,
        },
    }
}

/// Send the test image to the configured model and classify the reply
pub async fn verify_access(client: &Client, config: &Config) -> AccessOutcome {
    let Some(bearer) = config.bearer() else {
        return AccessOutcome::MissingKey;
    };

    let sent = client
        .post(config.model_url(&config.model))
        .header(AUTHORIZATION, bearer)
        .body(TEST_PNG)
        .timeout(config.check_timeout)
        .send()
        .await;

    match sent {
        Ok(response) => classify(response).await,
        Err(e) => transport_outcome(e),
    }
}

/// Run the check with console output, returning whether setup can proceed
pub async fn check_model_access(
    client: &Client,
    config: &Config,
    out: &mut impl Write,
) -> io::Result<bool> {
    if let Some(key) = &config.api_key {
        writeln!(
            out,
            "{}",
            format!("✅ API Key found: {}", key_preview(key)).bright_green()
        )?;
        writeln!(out, "🤖 Testing model: {}", config.model.bright_blue())?;
        writeln!(out, "🔄 Sending test request...")?;
    }

    let outcome = verify_access(client, config).await;
    outcome.report(out)?;
    Ok(outcome.is_success())
}
