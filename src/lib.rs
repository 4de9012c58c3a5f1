#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! `bookmood` asks the [Gemini API] for book recommendations that fit a
//! genre, a mood and a reading level.
//!
//! To get started, load a [`Config`] from the environment, create a
//! [`Client`] and hand it to a [`Session`]. Dispatch [`selection::Event`]s as
//! the user picks options, then call [`Session::recommend`].
//!
//! [Gemini API]: <https://ai.google.dev/api/generate-content>
//!
//! See `demos/recommend.rs` for a command-line example.

pub mod key;
pub use key::Key;

pub mod config;
pub use config::Config;

pub mod client;
pub use client::Client;

pub mod model;
pub use model::Model;

pub mod prompt;
pub use prompt::Prompt;

pub mod response;
pub use response::Response;

pub mod catalog;
pub use catalog::Catalog;

pub mod selection;
pub use selection::{Level, Selection, State};

pub mod fetcher;
pub use fetcher::Fetcher;

pub mod session;
pub use session::Session;

pub mod render;

#[cfg(feature = "html")]
/// Renders recommendations to HTML.
pub mod html;

/// Re-exports of commonly used crates to avoid version conflicts and reduce
/// dependency bloat.
pub mod exports {
    #[cfg(feature = "log")]
    pub use log;
    #[cfg(feature = "html")]
    pub use pulldown_cmark;
    pub use reqwest;
    pub use serde;
    pub use serde_json;
}
