//! Shapes returned by [`crate::RankingFacade`].

use rankboard_core::RankedPlayer;

/// Which listing a [`crate::RankingFacade::page`] call is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind<'a> {
    /// The full leaderboard, unfiltered.
    Leaderboard,
    /// A username substring search.
    Search(&'a str),
}

/// A page of ranked players plus the pagination state the request layer
/// needs (§6): the page and limit actually served (after normalization),
/// and whether another page exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The ranked players on this page, in store order (rating descending,
    /// username ascending).
    pub data: Vec<RankedPlayer>,
    /// The page number actually served, after normalization.
    pub page: u32,
    /// The page size actually served, after normalization.
    pub limit: u32,
    /// `true` if another page follows this one.
    pub has_more: bool,
}

impl Page {
    /// Number of entries on this page (`data.len()`).
    pub fn count(&self) -> usize {
        self.data.len()
    }
}
