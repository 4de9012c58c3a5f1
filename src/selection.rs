//! [`Selection`] of genre, mood and [`Level`], and the [`State`] that owns it
//! together with the accumulated recommendations.
//!
//! [`State`] changes only through [`State::dispatch`] (and [`State::apply`]
//! for fetch results). Any change to the selection clears recommendations,
//! since they were produced for the previous triple.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Moods,
    client,
    fetcher::{Fetched, Outcome},
};

/// Reading level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Level {
    #[allow(missing_docs)]
    Beginner,
    #[allow(missing_docs)]
    Intermediate,
    #[allow(missing_docs)]
    Expert,
}

impl Level {
    /// All levels in display order.
    pub const ALL: [Level; 3] =
        [Level::Beginner, Level::Intermediate, Level::Expert];
}

/// Error parsing a [`Level`].
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown level `{0}` (expected Beginner, Intermediate or Expert)")]
pub struct UnknownLevel(pub String);

impl std::str::FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

/// The user's current choices. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected genre.
    pub genre: Option<String>,
    /// Selected mood. Must be valid for [`genre`](Self::genre).
    pub mood: Option<String>,
    /// Selected reading level.
    pub level: Option<Level>,
}

/// A [`Selection`] with every field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complete<'a> {
    #[allow(missing_docs)]
    pub genre: &'a str,
    #[allow(missing_docs)]
    pub mood: &'a str,
    #[allow(missing_docs)]
    pub level: Level,
}

impl Selection {
    /// Borrow the fields if all are set.
    pub fn complete(&self) -> Option<Complete<'_>> {
        Some(Complete {
            genre: self.genre.as_deref()?,
            mood: self.mood.as_deref()?,
            level: self.level?,
        })
    }

    /// Whether genre, mood and level are all set.
    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Event {
    /// A genre was picked. Resets the mood.
    SetGenre(String),
    /// A mood was picked. The caller is responsible for picking a mood valid
    /// for the current genre. See [`State::set_mood_checked`].
    SetMood(String),
    /// A level was picked.
    SetLevel(Level),
    /// Recommendations arrived for the current selection.
    AppendRecommendations(Vec<String>),
}

/// A mood that is not offered for the current genre.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Mood `{mood}` is not offered for genre {genre:?}")]
pub struct InvalidMood {
    /// The rejected mood.
    pub mood: String,
    /// The genre at the time, if any.
    pub genre: Option<String>,
}

/// What [`State::apply`] did with a [`Fetched`] result.
#[derive(Debug, derive_more::IsVariant)]
pub enum Applied {
    /// This many recommendations were appended.
    Appended(usize),
    /// The API returned no usable text. Nothing changed.
    Empty,
    /// The request failed. Nothing changed.
    Failed(client::Error),
    /// The selection changed while the request was in flight. The result was
    /// discarded.
    Stale,
}

/// Selection plus the recommendations fetched for it.
#[derive(Debug, Clone, Default)]
pub struct State {
    selection: Selection,
    recommendations: Vec<String>,
}

impl State {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current [`Selection`].
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Recommendations in the order they arrived.
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// Moods that may currently be picked. Empty until a genre is set. This is
    /// derived from the genre every time and never stored.
    pub fn moods<'c, M>(&self, catalog: &'c M) -> &'c [String]
    where
        M: Moods + ?Sized,
    {
        match self.selection.genre.as_deref() {
            Some(genre) => catalog.moods(genre),
            None => &[],
        }
    }

    /// Apply an [`Event`].
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::SetGenre(genre) => {
                self.selection.genre = Some(genre);
                self.selection.mood = None;
                self.recommendations.clear();
            }
            Event::SetMood(mood) => {
                self.selection.mood = Some(mood);
                self.recommendations.clear();
            }
            Event::SetLevel(level) => {
                self.selection.level = Some(level);
                self.recommendations.clear();
            }
            Event::AppendRecommendations(texts) => {
                self.recommendations.extend(texts);
            }
        }
    }

    /// Dispatch [`Event::SetMood`] only if `mood` is offered for the current
    /// genre according to `catalog`. State is untouched on error.
    pub fn set_mood_checked<M>(
        &mut self,
        mood: String,
        catalog: &M,
    ) -> Result<(), InvalidMood>
    where
        M: Moods + ?Sized,
    {
        if !self.moods(catalog).contains(&mood) {
            return Err(InvalidMood {
                mood,
                genre: self.selection.genre.clone(),
            });
        }
        self.dispatch(Event::SetMood(mood));
        Ok(())
    }

    /// Apply the result of a fetch. Texts are appended only if the selection
    /// still matches the one the request was made for.
    pub fn apply(&mut self, fetched: Fetched) -> Applied {
        if fetched.selection != self.selection {
            #[cfg(feature = "log")]
            log::debug!(
                "Discarding result for {:?}, selection is now {:?}",
                fetched.selection,
                self.selection
            );
            return Applied::Stale;
        }

        match fetched.outcome {
            Outcome::Texts(texts) => {
                let count = texts.len();
                self.dispatch(Event::AppendRecommendations(texts));
                Applied::Appended(count)
            }
            Outcome::Empty => Applied::Empty,
            Outcome::Failure(error) => Applied::Failed(error),
        }
    }
}
