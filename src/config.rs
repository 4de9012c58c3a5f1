//! [`Config`] loaded from environment variables.
//!
//! | Variable          | Required | Default                                             |
//! |-------------------|----------|-----------------------------------------------------|
//! | `GEMINI_API_KEY`  | yes      |                                                     |
//! | `GEMINI_MODEL`    | no       | `gemini-pro`                                        |
//! | `GEMINI_BASE_URL` | no       | `https://generativelanguage.googleapis.com/v1/models` |
//!
//! A `.env` file in the working directory is read first if present. There is
//! no default for the API key.

use serde::Deserialize;

use crate::{key::InvalidKey, Key, Model};

/// Default base URL. The model name and `:generateContent` are appended.
pub const DEFAULT_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1/models";

/// Configuration error. Returned when the environment is incomplete.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required variable is missing or a value could not be parsed.
    #[error("Failed to load config: {0}")]
    Env(#[from] envy::Error),
    /// The API key is present but unusable.
    #[error("Invalid GEMINI_API_KEY: {0}")]
    Key(#[from] InvalidKey),
}

/// Raw environment, before validation.
#[derive(Deserialize)]
struct Env {
    gemini_api_key: String,
    #[serde(default)]
    gemini_model: Model,
    #[serde(default = "default_base_url")]
    gemini_base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Client configuration.
#[derive(Debug)]
pub struct Config {
    /// API key sent with every request.
    pub key: Key,
    /// [`Model`] used for inference.
    pub model: Model,
    /// Base URL of the models collection, without a trailing slash.
    pub base_url: String,
}

impl Config {
    /// Load configuration from the process environment, after loading an
    /// optional `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from an iterator of key-value pairs. Names are
    /// matched case-insensitively, like environment variables.
    pub fn from_iter<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: Env = envy::from_iter(vars)?;

        Ok(Self {
            key: Key::try_from(env.gemini_api_key)?,
            model: env.gemini_model,
            base_url: env.gemini_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_iter(vars(&[("GEMINI_API_KEY", "test-key")]))
                .unwrap();
        assert_eq!(config.key.read(), "test-key");
        assert_eq!(config.model, Model::GeminiPro);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_iter(vars(&[
            ("GEMINI_API_KEY", "test-key"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1beta/models/"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.model, Model::Gemini15Flash);
        // Trailing slash is trimmed.
        assert_eq!(config.base_url, "http://localhost:8080/v1beta/models");
    }

    #[test]
    fn test_missing_key() {
        let err = Config::from_iter(vars(&[("GEMINI_MODEL", "gemini-pro")]))
            .unwrap_err();
        assert!(matches!(err, Error::Env(_)));
        assert!(err
            .to_string()
            .to_lowercase()
            .contains("gemini_api_key"));
    }

    #[test]
    fn test_empty_key() {
        let err =
            Config::from_iter(vars(&[("GEMINI_API_KEY", "")])).unwrap_err();
        assert!(matches!(err, Error::Key(InvalidKey::Empty)));
    }
}
