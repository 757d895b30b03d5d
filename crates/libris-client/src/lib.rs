//! HTTP access to the library backend.
//!
//! [`LibraryClient`] implements [`libris_core::BookStore`] over the REST API
//! and fetches the data behind the public pages. [`Config`] carries the
//! backend origin and logging settings.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;

pub use client::LibraryClient;
pub use config::{Config, LoggingConfig};
