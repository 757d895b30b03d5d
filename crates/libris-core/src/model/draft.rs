use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::book::Book;

/// The editable text fields of a book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    Description,
}

impl DraftField {
    pub const ALL: [Self; 3] = [Self::Title, Self::Author, Self::Description];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Description => "Description",
        }
    }

    /// Multipart field name expected by the store.
    pub fn form_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Description => "description",
        }
    }
}

/// A not-yet-persisted book being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl BookDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }

    /// Pre-fill a draft from a persisted record.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self::new(&*book.title, &*book.author, &*book.description)
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Author => &self.author,
            DraftField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Author => &mut self.author,
            DraftField::Description => &mut self.description,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Title and author must be non-blank; description is free text.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [DraftField::Title, DraftField::Author]
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .map(DraftField::label)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidData(format!(
                "{} required",
                missing.join(" and ")
            )))
        }
    }

    /// Text fields in multipart order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        DraftField::ALL
            .into_iter()
            .map(move |field| (field.form_name(), self.get(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_from_book() {
        let book = Book::new("1", "Moby Dick", "Melville").with_description("Whales");
        let draft = BookDraft::from_book(&book);
        assert_eq!(draft, BookDraft::new("Moby Dick", "Melville", "Whales"));
    }

    #[test]
    fn test_draft_set_field() {
        let mut draft = BookDraft::default();
        draft.set(DraftField::Author, "Austen");
        draft.field_mut(DraftField::Title).push_str("Emma");
        assert_eq!(draft.author, "Austen");
        assert_eq!(draft.get(DraftField::Title), "Emma");
    }

    #[test]
    fn test_validate_requires_title_and_author() {
        let err = BookDraft::new("  ", "", "desc").validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid data: Title and Author required");

        let err = BookDraft::new("Emma", "", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid data: Author required");

        assert!(BookDraft::new("Emma", "Austen", "").validate().is_ok());
    }

    #[test]
    fn test_fields_in_multipart_order() {
        let draft = BookDraft::new("T", "A", "D");
        let names: Vec<_> = draft.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["title", "author", "description"]);
    }
}
