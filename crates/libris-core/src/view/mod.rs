//! View models for the public pages.

pub mod carousel;
pub mod pages;

pub use carousel::Carousel;
pub use pages::{alumni, new_arrivals, team, TeamData};

/// What a data-driven section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    /// Message to show in place of the content.
    Failed(String),
    /// The fetch succeeded but there is nothing to show; carries the notice.
    Empty(&'static str),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loading => LoadState::Loading,
            Self::Failed(message) => LoadState::Failed(message),
            Self::Empty(notice) => LoadState::Empty(notice),
            Self::Ready(value) => LoadState::Ready(f(value)),
        }
    }
}
