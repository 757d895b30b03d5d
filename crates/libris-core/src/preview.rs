//! Preview URLs for cover images shown in the book form.
//!
//! A locally selected file gets a transient `blob:` URL from an
//! [`ObjectUrls`] registry. The registry keeps the file alive until the URL
//! is revoked. [`TransientUrl`] is deliberately not `Clone`: whoever holds it
//! is the single owner and must hand it back to [`ObjectUrls::revoke`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::model::CoverFile;

const BLOB_PREFIX: &str = "blob:libris/";

/// An owned transient URL referring to bytes held by an [`ObjectUrls`].
#[derive(Debug, PartialEq, Eq)]
pub struct TransientUrl(String);

impl TransientUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransientUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The image URL currently shown by the form.
#[derive(Debug, PartialEq, Eq)]
pub enum Preview {
    /// Locally owned; must be revoked when replaced or when the form closes.
    Transient(TransientUrl),
    /// Hosted by the store; nothing to release.
    Hosted(String),
}

impl Preview {
    pub fn url(&self) -> &str {
        match self {
            Self::Transient(url) => url.as_str(),
            Self::Hosted(url) => url,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Registry of live transient URLs.
///
/// Cloning shares the registry, so views can look up the file behind a
/// preview while the form controller owns the URL.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrls {
    live: Arc<Mutex<HashMap<String, Arc<CoverFile>>>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self) -> MutexGuard<'_, HashMap<String, Arc<CoverFile>>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a fresh URL for `file`.
    pub fn create(&self, file: Arc<CoverFile>) -> TransientUrl {
        let url = format!("{}{}", BLOB_PREFIX, Uuid::new_v4());
        log::debug!("Created preview {} for {}", url, file.file_name);
        self.live().insert(url.clone(), file);
        TransientUrl(url)
    }

    /// Release a URL. Consumes it, so a URL can only be revoked once.
    pub fn revoke(&self, url: TransientUrl) {
        if self.live().remove(&url.0).is_some() {
            log::debug!("Revoked preview {}", url.0);
        } else {
            log::warn!("Preview {} was not issued by this registry", url.0);
        }
    }

    /// The file behind a live URL.
    pub fn lookup(&self, url: &str) -> Option<Arc<CoverFile>> {
        self.live().get(url).cloned()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live().contains_key(url)
    }

    pub fn live_count(&self) -> usize {
        self.live().len()
    }
}
