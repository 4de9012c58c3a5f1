//! [`Session`] wires a [`State`] to a [`Fetcher`]: the piece a UI holds on to
//! for its whole lifetime.

use crate::{
    catalog::Moods,
    client::Generate,
    fetcher::Fetcher,
    render::Entry,
    selection::{Applied, Event, InvalidMood, State},
};

/// One user's selections and recommendations plus the means to fetch more.
///
/// [`Session::recommend`] takes `&mut self`, so a second request cannot start
/// while one is awaited.
#[derive(Debug)]
pub struct Session<G> {
    state: State,
    fetcher: Fetcher<G>,
}

impl<G> Session<G>
where
    G: Generate,
{
    /// Empty session backed by `generator`, usually a [`Client`].
    ///
    /// [`Client`]: crate::Client
    pub fn new(generator: G) -> Self {
        Self {
            state: State::new(),
            fetcher: Fetcher::new(generator),
        }
    }

    /// Current [`State`].
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Apply an [`Event`] to the state.
    pub fn dispatch(&mut self, event: Event) {
        self.state.dispatch(event)
    }

    /// Set the mood if `catalog` offers it for the current genre. See
    /// [`State::set_mood_checked`].
    pub fn set_mood_checked<M>(
        &mut self,
        mood: String,
        catalog: &M,
    ) -> Result<(), InvalidMood>
    where
        M: Moods + ?Sized,
    {
        self.state.set_mood_checked(mood, catalog)
    }

    /// Whether [`Self::recommend`] would make a request.
    pub fn can_recommend(&self) -> bool {
        self.state.selection().is_complete()
    }

    /// Fetch recommendations for the current selection and apply them.
    ///
    /// Returns `None` (and makes no request) if the selection is incomplete.
    pub async fn recommend(&mut self) -> Option<Applied> {
        let fetched = self.fetcher.fetch(self.state.selection()).await?;
        Some(self.state.apply(fetched))
    }

    /// Recommendations as numbered entries.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.state.entries()
    }
}
