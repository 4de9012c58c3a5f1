//! Static option data: the list of genres and the moods valid for each.
//!
//! The lookup the rest of the crate needs is the [`Moods`] trait. [`Catalog`]
//! implements it and can be loaded from JSON or taken from the built-in set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Error loading a [`Catalog`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A genre has moods but is not in the genre list.
    #[error("Genre `{genre}` has moods but is not a listed genre")]
    UnlistedGenre {
        /// The offending genre.
        genre: String,
    },
}

/// Given a genre, the moods that may be picked with it.
pub trait Moods {
    /// Valid moods for `genre`, empty if the genre is unknown.
    fn moods(&self, genre: &str) -> &[String];

    /// Whether `mood` may be picked with `genre`.
    fn is_valid(&self, genre: &str, mood: &str) -> bool {
        self.moods(genre).iter().any(|m| m == mood)
    }
}

/// Genre list plus genre to mood mapping.
///
/// ```json
/// {
///   "genres": ["Fantasy", "Mystery"],
///   "moods": { "Fantasy": ["Hopeful"], "Mystery": ["Curious"] }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct Catalog {
    genres: Vec<String>,
    #[serde(default)]
    moods: HashMap<String, Vec<String>>,
}

/// Built-in data, in display order.
const BUILTIN: &[(&str, &[&str])] = &[
    ("Fantasy", &["Hopeful", "Adventurous", "Whimsical", "Dark"]),
    (
        "Science Fiction",
        &["Curious", "Thoughtful", "Adventurous", "Unsettled"],
    ),
    ("Mystery", &["Curious", "Tense", "Cozy", "Puzzled"]),
    ("Romance", &["Romantic", "Hopeful", "Heartbroken", "Playful"]),
    ("Horror", &["Scared", "Thrill-seeking", "Unsettled", "Dark"]),
    (
        "Historical Fiction",
        &["Nostalgic", "Thoughtful", "Melancholic", "Inspired"],
    ),
    ("Thriller", &["Tense", "Restless", "Thrill-seeking", "Suspicious"]),
    ("Non-fiction", &["Curious", "Motivated", "Reflective", "Inspired"]),
];

impl Catalog {
    /// The catalog that ships with the crate.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN.iter().map(|(genre, moods)| {
            (genre.to_string(), moods.iter().map(|m| m.to_string()))
        }))
    }

    /// Build a catalog from `(genre, moods)` pairs. Genre order is kept.
    pub fn from_pairs<G, M, Ms>(pairs: impl IntoIterator<Item = (G, Ms)>) -> Self
    where
        G: Into<String>,
        M: Into<String>,
        Ms: IntoIterator<Item = M>,
    {
        let mut catalog = Self::default();
        for (genre, moods) in pairs {
            let genre = genre.into();
            catalog.moods.insert(
                genre.clone(),
                moods.into_iter().map(Into::into).collect(),
            );
            catalog.genres.push(genre);
        }
        catalog
    }

    /// Load a catalog from a single JSON document (see the type docs).
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()
    }

    /// Load a catalog from separate genre list and genre to mood mapping
    /// documents, as they are commonly stored.
    pub fn from_json_parts(genres: &str, moods: &str) -> Result<Self, Error> {
        Self {
            genres: serde_json::from_str(genres)?,
            moods: serde_json::from_str(moods)?,
        }
        .validate()
    }

    fn validate(self) -> Result<Self, Error> {
        if let Some(genre) =
            self.moods.keys().find(|g| !self.genres.contains(*g))
        {
            return Err(Error::UnlistedGenre {
                genre: genre.clone(),
            });
        }
        Ok(self)
    }

    /// All genres in display order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

impl Moods for Catalog {
    fn moods(&self, genre: &str) -> &[String] {
        self.moods.get(genre).map(Vec::as_slice).unwrap_or(&[])
    }
}
