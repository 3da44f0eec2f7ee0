//! Reachability probes for fallback models, run when the primary check fails.

use colored::Colorize;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use std::io::{self, Write};

use crate::config::Config;
use crate::verify::describe_error;

/// General-purpose image classifiers tried when the configured model is unreachable
pub const ALTERNATIVE_MODELS: [&str; 3] = [
    "microsoft/resnet-50",
    "google/vit-base-patch16-224",
    "facebook/deit-base-distilled-patch16-224",
];

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Accessible,
    /// Any status other than 200
    Status(u16),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub model: String,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    pub fn report(&self, out: &mut impl Write) -> io::Result<()> {
        let line = match &self.outcome {
            ProbeOutcome::Accessible => format!("✅ {} is accessible", self.model).bright_green(),
            ProbeOutcome::Status(status) => {
                format!("❌ {} returned {}", self.model, status).bright_red()
            }
            ProbeOutcome::Error(message) => {
                format!("❌ {} error: {}", self.model, message).bright_red()
            }
        };
        writeln!(out, "{}", line)
    }
}

/// GET the model endpoint once; no body, shorter timeout than the main check
pub async fn probe_model(client: &Client, config: &Config, model: &str) -> ProbeResult {
    let mut request = client.get(config.model_url(model)).timeout(config.probe_timeout);
    if let Some(bearer) = config.bearer() {
        request = request.header(AUTHORIZATION, bearer);
    }

    let outcome = match request.send().await {
        Ok(response) if response.status() == StatusCode::OK => ProbeOutcome::Accessible,
        Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
        Err(e) => ProbeOutcome::Error(describe_error(e)),
    };

    ProbeResult {
        model: model.to_string(),
        outcome,
    }
}

/// Probe each model in order, printing as it goes
pub async fn probe_alternatives(
    client: &Client,
    config: &Config,
    models: &[&str],
    out: &mut impl Write,
) -> io::Result<Vec<ProbeResult>> {
    writeln!(out, "\n{}", "🔍 Testing alternative models...".bright_cyan())?;

    let mut results = Vec::with_capacity(models.len());
    for model in models {
        writeln!(out, "\n📋 Testing: {}", model)?;
        let result = probe_model(client, config, model).await;
        result.report(out)?;
        results.push(result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &ProbeResult) -> String {
        let mut buf = Vec::new();
        result.report(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn result(outcome: ProbeOutcome) -> ProbeResult {
        ProbeResult {
            model: "google/vit-base-patch16-224".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_alternative_models_list() {
        assert_eq!(ALTERNATIVE_MODELS.len(), 3);
        assert_eq!(ALTERNATIVE_MODELS[0], "microsoft/resnet-50");
    }

    #[test]
    fn test_report_accessible() {
        let r = result(ProbeOutcome::Accessible);
        assert!(render(&r).contains("google/vit-base-patch16-224 is accessible"));
    }

    #[test]
    fn test_report_status() {
        let r = result(ProbeOutcome::Status(401));
        assert!(render(&r).contains("google/vit-base-patch16-224 returned 401"));
    }

    #[test]
    fn test_report_error() {
        let r = result(ProbeOutcome::Error("connection refused".into()));
        assert!(render(&r).contains("google/vit-base-patch16-224 error: connection refused"));
    }
}
