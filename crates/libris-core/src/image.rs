//! Mapping store-relative image paths to display URLs.

use std::fmt;

/// Site placeholder shown in place of a people photo that failed to load.
pub const PEOPLE_PLACEHOLDER: &str = "/api/placeholder/128/128";

/// Result of resolving an image path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Absolute URL of an image hosted by the store.
    Hosted(String),
    /// No image was recorded; render a textual placeholder instead.
    Missing,
}

impl ImageRef {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Hosted(url) => Some(url),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hosted(url) => f.write_str(url),
            Self::Missing => f.write_str("[no image]"),
        }
    }
}

/// Resolves relative image paths against the store's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    origin: String,
}

impl ImageResolver {
    /// `origin` is the store's scheme and authority, e.g. `http://localhost:3001`.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolve an optional relative path.
    ///
    /// Empty or absent paths resolve to [`ImageRef::Missing`]. Paths that are
    /// already absolute URLs are passed through unchanged.
    pub fn resolve(&self, path: Option<&str>) -> ImageRef {
        let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
            return ImageRef::Missing;
        };

        if path.starts_with("http://") || path.starts_with("https://") {
            return ImageRef::Hosted(path.to_string());
        }

        let url = if path.starts_with('/') {
            format!("{}{}", self.origin, path)
        } else {
            format!("{}/{}", self.origin, path)
        };
        ImageRef::Hosted(url)
    }

    /// Resolve a people photo, substituting the site placeholder when the
    /// path is empty or the image already failed to load.
    pub fn resolve_person(&self, path: &str, failed: bool) -> String {
        let resolved = if failed {
            ImageRef::Missing
        } else {
            self.resolve(Some(path))
        };
        match resolved {
            ImageRef::Hosted(url) => url,
            ImageRef::Missing => format!("{}{}", self.origin, PEOPLE_PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolver = ImageResolver::new("http://localhost:3001");
        assert_eq!(
            resolver.resolve(Some("/uploads/x.jpg")),
            ImageRef::Hosted("http://localhost:3001/uploads/x.jpg".to_string())
        );
    }

    #[test]
    fn test_resolve_trims_origin_slash_and_adds_path_slash() {
        let resolver = ImageResolver::new("http://library.test/");
        assert_eq!(resolver.origin(), "http://library.test");
        assert_eq!(
            resolver.resolve(Some("uploads/y.png")).url(),
            Some("http://library.test/uploads/y.png")
        );
    }

    #[test]
    fn test_resolve_missing() {
        let resolver = ImageResolver::new("http://localhost:3001");
        assert!(resolver.resolve(None).is_missing());
        assert!(resolver.resolve(Some("")).is_missing());
        assert!(resolver.resolve(Some("   ")).is_missing());
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let resolver = ImageResolver::new("http://localhost:3001");
        assert_eq!(
            resolver.resolve(Some("https://cdn.test/a.jpg")).url(),
            Some("https://cdn.test/a.jpg")
        );
    }

    #[test]
    fn test_resolve_person_placeholder() {
        let resolver = ImageResolver::new("http://localhost:3001");
        assert_eq!(
            resolver.resolve_person("/uploads/p.jpg", false),
            "http://localhost:3001/uploads/p.jpg"
        );
        assert_eq!(
            resolver.resolve_person("/uploads/p.jpg", true),
            "http://localhost:3001/api/placeholder/128/128"
        );
        assert_eq!(
            resolver.resolve_person("", false),
            "http://localhost:3001/api/placeholder/128/128"
        );
    }
}
