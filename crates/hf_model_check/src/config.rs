//! Settings read once from the environment (and `.env`, if present).

use std::env;
use std::time::Duration;

/// Model checked when `HF_MODEL` is not set
pub const DEFAULT_MODEL: &str = "linkanjarad/mobilenet_v2_1.0_224-plant-disease-identification";

/// Hosted inference endpoint used when `HF_API_BASE` is not set
pub const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co";

/// Timeout for the primary POST check
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for each alternative-model GET probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub check_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Config {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            check_timeout: CHECK_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    /// Load `.env`, then read `HUGGINGFACE_API_KEY`, `HF_MODEL` and `HF_API_BASE`.
    /// Missing values never fail here; an absent key is reported by the verifier.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build from any variable lookup, applying the defaults for unset values
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let model = get("HF_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let mut config = Self::new(get("HUGGINGFACE_API_KEY"), model);
        if let Some(base) = get("HF_API_BASE") {
            if !base.trim().is_empty() {
                config = config.with_api_base(base);
            }
        }
        config
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn with_timeouts(mut self, check: Duration, probe: Duration) -> Self {
        self.check_timeout = check;
        self.probe_timeout = probe;
        self
    }

    /// `{api_base}/models/{model}`
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.api_base.trim_end_matches('/'), model)
    }

    /// Value for the `Authorization` header, if a key is configured
    pub fn bearer(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Bearer {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = from_map(&[]);

        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.check_timeout, Duration::from_secs(30));
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_vars_blank_api_base_ignored() {
        assert_eq!(from_map(&[("HF_API_BASE", "")]).api_base, DEFAULT_API_BASE);
        assert_eq!(from_map(&[("HF_API_BASE", "   ")]).api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_from_vars_custom_values() {
        let config = from_map(&[
            ("HUGGINGFACE_API_KEY", "hf_custom_key"),
            ("HF_MODEL", "microsoft/resnet-50"),
            ("HF_API_BASE", "http://localhost:9999/"),
        ]);

        assert_eq!(config.api_key.as_deref(), Some("hf_custom_key"));
        assert_eq!(config.model, "microsoft/resnet-50");
        assert_eq!(
            config.model_url(&config.model),
            "http://localhost:9999/models/microsoft/resnet-50"
        );
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("HUGGINGFACE_API_KEY", "hf_from_env");
        env::set_var("HF_MODEL", "google/vit-base-patch16-224");

        let config = Config::from_env();

        assert_eq!(config.api_key.as_deref(), Some("hf_from_env"));
        assert_eq!(config.model, "google/vit-base-patch16-224");

        env::remove_var("HUGGINGFACE_API_KEY");
        env::remove_var("HF_MODEL");
    }

    #[test]
    fn test_empty_key_is_absent() {
        let config = from_map(&[("HUGGINGFACE_API_KEY", "")]);
        assert!(config.api_key.is_none());
        assert_eq!(config.bearer(), None);
    }

    #[test]
    fn test_model_url_default_base() {
        let config = Config::new(Some("hf_x".into()), DEFAULT_MODEL);
        assert_eq!(
            config.model_url(DEFAULT_MODEL),
            "https://api-inference.huggingface.co/models/linkanjarad/mobilenet_v2_1.0_224-plant-disease-identification"
        );
        assert_eq!(config.bearer().as_deref(), Some("Bearer hf_x"));
    }
}
