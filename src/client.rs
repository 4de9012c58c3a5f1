//! [`Client`] for the Gemini `generateContent` endpoint and the [`Generate`]
//! trait the rest of the crate talks to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{config, key, Config, Key, Model, Prompt, Response};

/// Result type for the client. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can turn a [`Prompt`] into a [`Response`]. [`Client`] is
/// the real implementation. Tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Generate: Send + Sync {
    /// Submit one prompt and wait for one complete response.
    async fn generate(&self, prompt: &Prompt) -> Result<Response>;
}

/// Client for the Gemini `generateContent` endpoint.
///
/// See [`Self::new`] and [`Self::from_config`] for creating a new client and
/// [`Generate::generate`] to send a [`Prompt`].
#[derive(Clone)]
pub struct Client {
    /// Inner [`reqwest::Client`]. It is **not necessary** to set the API key
    /// on a custom client. The key is added to every request as the `key`
    /// query parameter.
    pub inner: reqwest::Client,
    /// API [`Key`]. It can be set to a new [`Key`] to change the key used for
    /// requests.
    pub key: Arc<Key>,
    /// [`Model`] used for requests.
    pub model: Model,
    /// Base URL of the models collection, without a trailing slash.
    pub base_url: String,
}

impl Client {
    /// Our user agent.
    pub const USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

    /// Create a new client from any type that can be converted into a [`Key`],
    /// using the default [`Model`] and URL.
    ///
    /// ## Note:
    /// - It's safest to use a [`String`]. If you use a [`&str`] you must
    ///   zeroize it after creating the client.
    pub fn new<K>(key: K) -> Result<Self>
    where
        K: TryInto<Key, Error = key::InvalidKey>,
    {
        Self::from_key(key.try_into()?)
    }

    /// Create a new client with the given key, the default [`Model`] and the
    /// default URL.
    pub fn from_key(key: Key) -> Result<Self> {
        Self::build(key, Model::default(), config::DEFAULT_BASE_URL.into())
    }

    /// Create a new client from a [`Config`].
    pub fn from_config(config: Config) -> Result<Self> {
        Self::build(config.key, config.model, config.base_url)
    }

    fn build(key: Key, model: Model, base_url: String) -> Result<Self> {
        #[cfg(feature = "log")]
        {
            log::info!(concat!(
                "Creating ",
                env!("CARGO_PKG_NAME"),
                " client..."
            ));
            log::debug!(concat!("Crate version: ", env!("CARGO_PKG_VERSION")));
            log::debug!("Model: {}", model);
        }

        let inner = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()?;

        Ok(Self {
            inner,
            key: Arc::new(key),
            model,
            base_url,
        })
    }

    /// Set the [`Model`].
    pub fn model<M>(mut self, model: M) -> Self
    where
        M: Into<Model>,
    {
        self.model = model.into();
        self
    }

    /// Set the base URL. This is useful for testing or for using a different
    /// `generateContent` compatible endpoint.
    pub fn base_url<U>(mut self, base_url: U) -> Self
    where
        U: Into<String>,
    {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full `generateContent` URL for the current model. The key is not
    /// included.
    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    /// Post a request to the `generateContent` endpoint.
    ///
    /// `prompt` can be a [`Prompt`] or anything that serializes to the same
    /// shape. The body is read in full and parsed as a [`Response`]. A
    /// non-success status is returned as [`Error::Gemini`] if the body
    /// carries an API error, or [`Error::Status`] otherwise.
    pub async fn request<P>(&self, prompt: &P) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoint();

        #[cfg(feature = "log")]
        {
            log::debug!("POST request to {}", url);
            if let Ok(json) = serde_json::to_string_pretty(prompt) {
                log::debug!("Sending body:\n{}", json);
            }
        }

        let response = self
            .inner
            .post(&url)
            .query(&[("key", self.key.read())])
            .json(prompt)
            .send()
            .await
            // The URL carries the key, so it must not end up in the error.
            .map_err(|e| Error::HTTP(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::HTTP(e.without_url()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_slice::<GeminiErrorWrapper>(&body)
            {
                // Error was successfully parsed from the API.
                return Err(error.error.into());
            }

            return Err(Error::Status {
                code: status.as_u16(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl Generate for Client {
    async fn generate(&self, prompt: &Prompt) -> Result<Response> {
        self.request(prompt).await
    }
}

/// [`Client`] error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API key is unusable.
    #[error("Key error: {0}")]
    Key(#[from] key::InvalidKey),
    /// HTTP error. Connection, DNS, TLS or body read failure.
    #[error("HTTP error: {0}")]
    HTTP(#[from] reqwest::Error),
    /// Response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Error reported by the API.
    #[error("Gemini error: {0}")]
    Gemini(#[from] GeminiError),
    /// Non-success status without a recognizable error body.
    #[error("Unexpected status: {code}")]
    #[allow(missing_docs)]
    Status { code: u16 },
}

/// Error body returned by the API on a non-success status.
#[derive(Debug, thiserror::Error, Clone, Serialize, Deserialize, PartialEq)]
#[error("{status} ({code}): {message}")]
pub struct GeminiError {
    /// HTTP status code.
    pub code: u16,
    /// Human readable message.
    pub message: String,
    /// Canonical status name, for example `INVALID_ARGUMENT`.
    #[serde(default)]
    pub status: String,
}

// The API wraps the error in an `error` field.
#[derive(Deserialize)]
pub(crate) struct GeminiErrorWrapper {
    pub(crate) error: GeminiError,
}
