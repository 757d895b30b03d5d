pub mod book;
pub mod cover;
pub mod draft;
pub mod ids;
pub mod people;

pub use book::Book;
pub use cover::CoverFile;
pub use draft::{BookDraft, DraftField};
pub use ids::{AlumniId, BookId};
pub use people::{AdvisoryMember, AlumniMember, TeamMember};
