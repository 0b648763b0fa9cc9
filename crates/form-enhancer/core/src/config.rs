// File: src/config.rs
// Purpose: Enhancer configuration (defaults, TOML, JS objects)

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feedback::ToastLifetime;
use crate::validation::Rules;

/// Settings shared by every form an enhancer instance manages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancerConfig {
    /// CSS selector for forms opted into enhancement
    #[serde(default = "default_form_selector", alias = "form_selector")]
    pub form_selector: String,

    /// CSS selector for the submit control inside a managed form
    #[serde(default = "default_submit_selector", alias = "submit_selector")]
    pub submit_selector: String,

    /// Minimum length for password fields without `data-min-length`
    #[serde(default = "default_min_password_length", alias = "min_password_length")]
    pub min_password_length: usize,

    /// Default toast lifetime in milliseconds; zero or negative never expires
    #[serde(default = "default_toast_duration_ms", alias = "toast_duration_ms")]
    pub toast_duration_ms: i64,

    /// Submit-control label while a request is in flight
    #[serde(default = "default_loading_text", alias = "loading_text")]
    pub loading_text: String,

    /// Success toast text when the response carries no message
    #[serde(default = "default_success_message", alias = "success_message")]
    pub success_message: String,

    /// Error toast text when the response carries no message
    #[serde(default = "default_error_message", alias = "error_message")]
    pub error_message: String,

    /// Allow-list for file inputs without `data-allowed-extensions` (empty = any)
    #[serde(default, alias = "allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_form_selector() -> String {
    "form[data-enhance]".to_string()
}

fn default_submit_selector() -> String {
    r#"button[type="submit"]"#.to_string()
}

fn default_min_password_length() -> usize {
    8
}

fn default_toast_duration_ms() -> i64 {
    5000
}

fn default_loading_text() -> String {
    "Processing...".to_string()
}

fn default_success_message() -> String {
    "Form submitted successfully.".to_string()
}

fn default_error_message() -> String {
    "Something went wrong. Please try again.".to_string()
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            form_selector: default_form_selector(),
            submit_selector: default_submit_selector(),
            min_password_length: default_min_password_length(),
            toast_duration_ms: default_toast_duration_ms(),
            loading_text: default_loading_text(),
            success_message: default_success_message(),
            error_message: default_error_message(),
            allowed_extensions: Vec::new(),
        }
    }
}

impl EnhancerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse form enhancer configuration")
    }

    /// Load from a specific path.
    /// Returns default config if the file is missing or invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        Self::from_toml_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("failed to load {}: {:#}", path.display(), e);
            Self::default()
        })
    }

    /// Lifetime applied to toasts raised by submissions
    pub fn toast_lifetime(&self) -> ToastLifetime {
        ToastLifetime::from_millis(self.toast_duration_ms)
    }

    /// Validation rules derived from this configuration
    pub fn rules(&self) -> Rules {
        Rules {
            min_password_length: self.min_password_length,
            allowed_extensions: self
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = EnhancerConfig::default();
        assert_eq!(config.form_selector, "form[data-enhance]");
        assert_eq!(config.submit_selector, r#"button[type="submit"]"#);
        assert_eq!(config.min_password_length, 8);
        assert_eq!(
            config.toast_lifetime(),
            ToastLifetime::Timed(Duration::from_millis(5000))
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EnhancerConfig::from_toml_str(
            r#"
            form_selector = "form.ajax"
            toast_duration_ms = 0
            allowed_extensions = [".PDF", "png"]
            "#,
        )
        .unwrap();

        assert_eq!(config.form_selector, "form.ajax");
        assert_eq!(config.toast_lifetime(), ToastLifetime::Sticky);
        assert_eq!(config.min_password_length, 8);
        assert_eq!(config.rules().allowed_extensions, vec!["pdf", "png"]);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: EnhancerConfig =
            serde_json::from_str(r#"{"minPasswordLength": 12, "loadingText": "Saving"}"#).unwrap();
        assert_eq!(config.min_password_length, 12);
        assert_eq!(config.loading_text, "Saving");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = EnhancerConfig::from_toml_str("min_password_length = \"eight\"").unwrap_err();
        assert!(err.to_string().contains("form enhancer configuration"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `load_from` and return the config together with its log output
    fn load_logged(path: &str) -> (EnhancerConfig, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || EnhancerConfig::load_from(path));
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (config, logs)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let (config, logs) = load_logged("does-not-exist/form-enhancer.toml");
        assert_eq!(config, EnhancerConfig::default());
        assert!(logs.contains("DEBUG"), "{logs}");
        assert!(logs.contains("no config at does-not-exist/form-enhancer.toml"), "{logs}");
    }

    #[test]
    fn test_unreadable_path_warns() {
        // a directory exists but cannot be read as a file
        let (config, logs) = load_logged(env!("CARGO_MANIFEST_DIR"));
        assert_eq!(config, EnhancerConfig::default());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("failed to read"), "{logs}");
    }
}
