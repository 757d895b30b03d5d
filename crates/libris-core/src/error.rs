//! Error types shared by the store client and the screens.

use thiserror::Error;

/// Failure reported by a [`BookStore`](crate::store::BookStore) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transport failure or non-success status without a usable server message.
    #[error("network error: {0}")]
    Network(String),

    /// The store rejected the request and said why.
    #[error("{0}")]
    Validation(String),
}

impl StoreError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The message without the error-kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Network(message) | Self::Validation(message) => message,
        }
    }

    /// Returns `true` when the store supplied its own explanation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// An error recovered at the screen boundary.
///
/// Each variant keeps the structured [`StoreError`] so the cause can be
/// logged; operators only ever see [`ScreenError::display_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// Fetching the book list failed.
    #[error("failed to load books: {0}")]
    LoadFailure(StoreError),

    /// Creating or updating a book failed.
    #[error("failed to save book: {0}")]
    Save(StoreError),

    /// Deleting a book failed.
    #[error("failed to delete book: {0}")]
    Delete(StoreError),
}

impl ScreenError {
    /// Text shown to the operator.
    ///
    /// Server-provided validation messages are passed through verbatim for
    /// saves; everything else becomes a fixed, generic sentence.
    pub fn display_message(&self) -> String {
        match self {
            Self::LoadFailure(_) => "Failed to load books".to_string(),
            Self::Save(StoreError::Validation(message)) => message.clone(),
            Self::Save(StoreError::Network(_)) => "Failed to save book".to_string(),
            Self::Delete(_) => "Failed to delete book".to_string(),
        }
    }

    pub fn cause(&self) -> &StoreError {
        match self {
            Self::LoadFailure(cause) | Self::Save(cause) | Self::Delete(cause) => cause,
        }
    }
}

/// Errors raised while preparing data locally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported cover image type: {0}")]
    UnsupportedImage(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
