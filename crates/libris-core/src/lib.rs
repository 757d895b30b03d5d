//! Core domain model for libris.
//!
//! This crate defines the book and people records served by the library's
//! REST backend, the error taxonomy surfaced to operators, the image
//! resolver, the books admin screen state (form controller, preview URL
//! ownership, delete confirmation), and the read-only view models used by
//! the public pages.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod admin;
pub mod error;
pub mod form;
pub mod image;
pub mod model;
pub mod preview;
pub mod store;
pub mod view;

pub use admin::AdminScreen;
pub use error::{Error, Result, ScreenError, StoreError};
pub use form::{FormController, FormMode};
pub use image::{ImageRef, ImageResolver};
pub use model::{Book, BookDraft, BookId, CoverFile};
pub use store::{BookStore, MemoryStore};
