use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::BookId;

/// A book record as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,

    /// Relative path of the stored cover image (e.g. `/uploads/x.jpg`).
    ///
    /// The backend sends an empty string or omits the field when no cover
    /// was uploaded; both become `None`.
    #[serde(default, deserialize_with = "non_empty")]
    pub cover: Option<String>,
}

impl Book {
    #[must_use]
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            description: String::new(),
            cover: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        let cover = cover.into();
        self.cover = (!cover.is_empty()).then_some(cover);
        self
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_deserialize_store_payload() {
        let json = r#"{
            "_id": "1",
            "title": "Moby Dick",
            "author": "Melville",
            "description": "A whale of a tale",
            "cover": "/uploads/moby.jpg",
            "__v": 0
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, BookId::new("1"));
        assert_eq!(book.title, "Moby Dick");
        assert_eq!(book.cover.as_deref(), Some("/uploads/moby.jpg"));
    }

    #[test]
    fn test_book_empty_cover_is_none() {
        let json = r#"{"_id": "2", "title": "T", "author": "A", "description": "", "cover": ""}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.cover.is_none());
    }

    #[test]
    fn test_book_missing_optional_fields() {
        let json = r#"{"_id": "3", "title": "T", "author": "A"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.description.is_empty());
        assert!(book.cover.is_none());
    }

    #[test]
    fn test_book_builder() {
        let book = Book::new("4", "Emma", "Austen")
            .with_description("Matchmaking")
            .with_cover("");
        assert_eq!(book.description, "Matchmaking");
        assert!(book.cover.is_none());
    }
}
