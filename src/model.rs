//! [`Model`] to use for inference.
use serde::{Deserialize, Serialize};

/// Gemini model to use for inference. The model name becomes part of the
/// `generateContent` URL path.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Model {
    /// Gemini 1.0 Pro. This is the default model.
    #[default]
    GeminiPro,
    /// Gemini 1.5 Flash (latest)
    Gemini15Flash,
    /// Gemini 1.5 Pro (latest)
    Gemini15Pro,
    /// Any other model name the endpoint accepts.
    Custom(String),
}

impl Model {
    /// Name of the model as used in the API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::GeminiPro => "gemini-pro",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        // The API accepts both `gemini-pro` and `models/gemini-pro`.
        let trimmed = name.trim();
        let bare = trimmed.strip_prefix("models/").unwrap_or(trimmed);
        match bare {
            "gemini-pro" => Self::GeminiPro,
            "gemini-1.5-flash" => Self::Gemini15Flash,
            "gemini-1.5-pro" => Self::Gemini15Pro,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        name.to_string().into()
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        match model {
            Model::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}
