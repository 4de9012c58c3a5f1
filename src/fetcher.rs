//! [`Fetcher`] turns a complete [`Selection`] into one request and classifies
//! the response as an [`Outcome`].

use crate::{
    client::{self, Generate},
    selection::{Complete, Selection},
    Prompt,
};

/// Prompt text for a complete selection.
///
/// ```
/// use bookmood::{fetcher::prompt_text, selection::{Complete, Level}};
///
/// let text = prompt_text(Complete {
///     genre: "Fantasy",
///     mood: "Hopeful",
///     level: Level::Beginner,
/// });
/// assert_eq!(
///     text,
///     "Recommend 6 books for a Beginner Fantasy reader feeling Hopeful. Explain why."
/// );
/// ```
pub fn prompt_text(complete: Complete<'_>) -> String {
    let Complete {
        genre,
        mood,
        level,
    } = complete;
    format!(
        "Recommend 6 books for a {level} {genre} reader feeling {mood}. Explain why."
    )
}

/// Classified result of one request.
#[derive(Debug, derive_more::IsVariant)]
pub enum Outcome {
    /// One or more texts, in the order the API returned them.
    Texts(Vec<String>),
    /// The request succeeded but no candidate had usable text.
    Empty,
    /// Transport failure, API error or unparseable body.
    Failure(client::Error),
}

impl Outcome {
    /// Texts if this is [`Outcome::Texts`], otherwise empty.
    pub fn texts(&self) -> &[String] {
        match self {
            Self::Texts(texts) => texts,
            _ => &[],
        }
    }
}

impl From<client::Result<crate::Response>> for Outcome {
    fn from(result: client::Result<crate::Response>) -> Self {
        match result {
            Ok(response) => {
                let texts = response.into_texts();
                if texts.is_empty() {
                    Self::Empty
                } else {
                    Self::Texts(texts)
                }
            }
            Err(error) => Self::Failure(error),
        }
    }
}

/// An [`Outcome`] together with the [`Selection`] it was requested for.
#[derive(Debug)]
pub struct Fetched {
    /// Snapshot of the selection at the time of the request.
    pub selection: Selection,
    /// What came back.
    pub outcome: Outcome,
}

/// Builds the prompt for a selection and sends it. Holds no state of its own
/// besides the [`Generate`] implementation.
#[derive(Debug, Clone)]
pub struct Fetcher<G> {
    generator: G,
}

impl<G> Fetcher<G>
where
    G: Generate,
{
    /// Create a fetcher backed by `generator`, usually a [`Client`].
    ///
    /// [`Client`]: crate::Client
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The [`Generate`] implementation.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Fetch recommendations for `selection`.
    ///
    /// Returns `None` without making a request if any field is empty.
    /// Otherwise makes exactly one request. Never fails: errors become
    /// [`Outcome::Failure`].
    pub async fn fetch(&self, selection: &Selection) -> Option<Fetched> {
        let complete = selection.complete()?;
        let prompt = Prompt::text(prompt_text(complete));

        #[cfg(feature = "log")]
        log::debug!("Requesting recommendations: {:?}", prompt.first_text());

        let result = self.generator.generate(&prompt).await;

        #[cfg(feature = "log")]
        {
            if let Ok(response) = &result {
                let dropped = response.dropped();
                if dropped > 0 {
                    log::debug!(
                        "Dropped {} candidates without usable text",
                        dropped
                    );
                }
            }
        }

        let outcome = Outcome::from(result);

        #[cfg(feature = "log")]
        {
            match &outcome {
                Outcome::Texts(texts) => {
                    log::info!("Received {} recommendations", texts.len())
                }
                Outcome::Empty => {
                    log::warn!("No usable candidates in response")
                }
                Outcome::Failure(error) => {
                    log::error!("Error fetching recommendations: {}", error)
                }
            }
        }

        Some(Fetched {
            selection: selection.clone(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::MockGenerate, response::tests::response_json,
        selection::Level, Response,
    };
    use serde_json::json;

    fn selection(
        genre: Option<&str>,
        mood: Option<&str>,
        level: Option<Level>,
    ) -> Selection {
        Selection {
            genre: genre.map(Into::into),
            mood: mood.map(Into::into),
            level,
        }
    }

    fn fantasy() -> Selection {
        selection(Some("Fantasy"), Some("Hopeful"), Some(Level::Beginner))
    }

    fn response(value: serde_json::Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    const SIX: [&str; 6] = ["one", "two", "three", "four", "five", "six"];

    /// Global logger that keeps every record so tests can look for theirs.
    /// Tests run in parallel, so look for something unique to the test.
    #[cfg(feature = "log")]
    mod capture {
        use std::sync::{Mutex, Once};

        static RECORDS: Mutex<Vec<(log::Level, String)>> =
            Mutex::new(Vec::new());
        static INIT: Once = Once::new();
        static LOGGER: Capture = Capture;

        struct Capture;

        impl log::Log for Capture {
            fn enabled(&self, _: &log::Metadata) -> bool {
                true
            }

            fn log(&self, record: &log::Record) {
                RECORDS
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }

            fn flush(&self) {}
        }

        pub fn init() {
            INIT.call_once(|| {
                log::set_logger(&LOGGER).unwrap();
                log::set_max_level(log::LevelFilter::Trace);
            });
        }

        pub fn logged(level: log::Level, needle: &str) -> bool {
            RECORDS
                .lock()
                .unwrap()
                .iter()
                .any(|(l, message)| *l == level && message.contains(needle))
        }
    }

    #[test]
    fn test_prompt_text() {
        let selection = fantasy();
        assert_eq!(
            prompt_text(selection.complete().unwrap()),
            "Recommend 6 books for a Beginner Fantasy reader feeling Hopeful. Explain why."
        );
    }

    #[tokio::test]
    async fn test_incomplete_selection_makes_no_request() {
        let mut mock = MockGenerate::new();
        mock.expect_generate().never();
        let fetcher = Fetcher::new(mock);

        let incomplete = [
            selection(None, None, None),
            selection(Some("Fantasy"), None, None),
            selection(Some("Fantasy"), Some("Hopeful"), None),
            selection(Some("Fantasy"), None, Some(Level::Expert)),
            selection(None, Some("Hopeful"), Some(Level::Expert)),
        ];
        for selection in &incomplete {
            assert!(fetcher.fetch(selection).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_sends_prompt_once() {
        let mut mock = MockGenerate::new();
        mock.expect_generate()
            .withf(|prompt| {
                prompt.contents.len() == 1
                    && prompt.first_text()
                        == Some("Recommend 6 books for a Beginner Fantasy reader feeling Hopeful. Explain why.")
            })
            .times(1)
            .returning(|_| Ok(response(response_json(SIX))));
        let fetcher = Fetcher::new(mock);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert_eq!(fetched.selection, fantasy());
        assert_eq!(fetched.outcome.texts(), SIX);
    }

    #[tokio::test]
    async fn test_malformed_candidates_dropped() {
        let mut mock = MockGenerate::new();
        mock.expect_generate().times(1).returning(|_| {
            Ok(response(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "one" }] } },
                    { "content": { "parts": [{ "inlineData": {} }] } },
                    { "content": { "parts": [{ "text": "two" }] } },
                    { "content": { "parts": [{ "text": "three" }] } },
                    { "finishReason": "SAFETY" },
                    { "content": { "parts": [{ "text": "four" }] } },
                ]
            })))
        });
        let fetcher = Fetcher::new(mock);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert_eq!(fetched.outcome.texts(), ["one", "two", "three", "four"]);
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty() {
        let mut mock = MockGenerate::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(response(json!({}))));
        let fetcher = Fetcher::new(mock);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert!(fetched.outcome.is_empty());
    }

    #[tokio::test]
    async fn test_error_is_failure() {
        let mut mock = MockGenerate::new();
        mock.expect_generate().times(1).returning(|_| {
            Err(client::GeminiError {
                code: 503,
                message: "The model is overloaded.".into(),
                status: "UNAVAILABLE".into(),
            }
            .into())
        });
        let fetcher = Fetcher::new(mock);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert!(matches!(
            fetched.outcome,
            Outcome::Failure(client::Error::Gemini(_))
        ));
        assert!(fetched.outcome.texts().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // A real client pointed at a closed local port.
        let client = crate::Client::new(String::from("test-key"))
            .unwrap()
            .base_url("http://127.0.0.1:9");
        let fetcher = Fetcher::new(client);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert!(matches!(
            fetched.outcome,
            Outcome::Failure(client::Error::HTTP(_))
        ));
    }

    #[tokio::test]
    #[cfg(feature = "log")]
    async fn test_failure_is_logged() {
        capture::init();

        let mut mock = MockGenerate::new();
        mock.expect_generate().times(1).returning(|_| {
            Err(client::GeminiError {
                code: 500,
                message: "backend exploded while shelving".into(),
                status: "INTERNAL".into(),
            }
            .into())
        });
        let fetcher = Fetcher::new(mock);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert!(fetched.outcome.is_failure());
        assert!(capture::logged(
            log::Level::Error,
            "Error fetching recommendations: Gemini error: INTERNAL (500): backend exploded while shelving"
        ));
    }

    #[tokio::test]
    #[cfg(feature = "log")]
    async fn test_dropped_candidates_are_logged() {
        capture::init();

        let mut mock = MockGenerate::new();
        mock.expect_generate().times(1).returning(|_| {
            Ok(response(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "kept" }] } },
                    { "content": { "parts": [] } },
                    { "content": {} },
                    { "content": { "parts": [{ "text": null }] } },
                    { "content": { "parts": [{ "text": "" }] } },
                    { "index": 5 },
                    { "content": { "parts": [{ "text": 7 }] } },
                ]
            })))
        });
        let fetcher = Fetcher::new(mock);

        let fetched = fetcher.fetch(&fantasy()).await.unwrap();
        assert_eq!(fetched.outcome.texts(), ["kept"]);
        assert!(capture::logged(
            log::Level::Debug,
            "Dropped 6 candidates without usable text"
        ));
    }
}
