//! REST client for the library backend.
//!
//! Endpoints live under `<origin>/api`. Book create/update take multipart
//! bodies with `title`, `author`, `description` and an optional `cover`
//! file part; rejections come back as `4xx {"error": "..."}`.


use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use libris_core::model::{AdvisoryMember, AlumniMember, TeamMember};
use libris_core::store::StoreResult;
use libris_core::view::TeamData;
use libris_core::{Book, BookDraft, BookId, BookStore, CoverFile, ImageResolver, StoreError};

use crate::config::Config;

const USER_AGENT: &str = concat!("libris/", env!("CARGO_PKG_VERSION"));

/// Error body returned by the backend on rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the library REST API.
#[derive(Debug, Clone)]
pub struct LibraryClient {
    http: Client,
    origin: String,
}

impl LibraryClient {
    /// Create a client for the backend at `origin` (e.g. `http://localhost:3001`).
    pub fn new(origin: impl Into<String>) -> StoreResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StoreError::network(format!("failed to build HTTP client: {e}")))?;
        let origin = origin.into().trim_end_matches('/').to_string();
        Ok(Self { http, origin })
    }

    pub fn from_config(config: &Config) -> StoreResult<Self> {
        Self::new(config.origin())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolver for image paths served by this backend.
    pub fn resolver(&self) -> ImageResolver {
        ImageResolver::new(self.origin.as_str())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.origin, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> StoreResult<T> {
        let url = self.api_url(path);
        log::debug!("GET {}", url);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let response = require_success(response, what)?;
        decode(response).await
    }

    /// Fetch the team page data. Both lists are requested concurrently and
    /// either failure fails the whole fetch.
    pub async fn fetch_team(&self) -> StoreResult<TeamData> {
        let (advisory, team) = tokio::try_join!(
            self.get_json::<Vec<AdvisoryMember>>("/advisoryCommittee", "Failed to fetch data"),
            self.get_json::<Vec<TeamMember>>("/libraryTeam", "Failed to fetch data"),
        )?;
        Ok(TeamData { advisory, team })
    }

    pub async fn list_alumni(&self) -> StoreResult<Vec<AlumniMember>> {
        self.get_json("/alumni", "Failed to fetch alumni data").await
    }

    /// Whether an image URL loads. Any transport error or non-success status
    /// counts as a failure.
    pub async fn probe_image(&self, url: &str) -> bool {
        match self.http.get(url).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    log::debug!("Image {} returned {}", url, response.status());
                }
                ok
            }
            Err(e) => {
                log::debug!("Image {} failed to load: {}", url, e);
                false
            }
        }
    }

    async fn send_book(
        &self,
        request: reqwest::RequestBuilder,
        draft: &BookDraft,
        cover: Option<&CoverFile>,
    ) -> StoreResult<Book> {
        let form = book_form(draft, cover)?;
        let response = request.multipart(form).send().await.map_err(transport)?;
        let response = require_accepted(response, "Failed to save book").await?;
        decode(response).await
    }
}

#[async_trait::async_trait]
impl BookStore for LibraryClient {
    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        self.get_json("/books", "Failed to fetch books").await
    }

    async fn create_book(&self, draft: &BookDraft, cover: Option<&CoverFile>) -> StoreResult<Book> {
        let url = self.api_url("/books");
        log::debug!("POST {}", url);
        let book = self.send_book(self.http.post(&url), draft, cover).await?;
        log::info!("Created book {} ({})", book.id, book.title);
        Ok(book)
    }

    async fn update_book(
        &self,
        id: &BookId,
        draft: &BookDraft,
        cover: Option<&CoverFile>,
    ) -> StoreResult<Book> {
        let url = self.api_url(&format!("/books/{}", id));
        log::debug!("PUT {}", url);
        let book = self.send_book(self.http.put(&url), draft, cover).await?;
        log::info!("Updated book {} ({})", book.id, book.title);
        Ok(book)
    }

    async fn delete_book(&self, id: &BookId) -> StoreResult<()> {
        let url = self.api_url(&format!("/books/{}", id));
        log::debug!("DELETE {}", url);
        let response = self.http.delete(&url).send().await.map_err(transport)?;
        require_success(response, "Failed to delete book")?;
        log::info!("Deleted book {}", id);
        Ok(())
    }
}

/// Build the multipart body for create/update. Without a file no `cover`
/// part is sent, so an update keeps the stored cover.
fn book_form(draft: &BookDraft, cover: Option<&CoverFile>) -> StoreResult<Form> {
    let mut form = Form::new();
    for (name, value) in draft.fields() {
        form = form.text(name, value.to_string());
    }
    if let Some(cover) = cover {
        let part = Part::bytes(cover.bytes.clone())
            .file_name(cover.file_name.clone())
            .mime_str(cover.mime)
            .map_err(|e| StoreError::network(format!("invalid cover type {}: {e}", cover.mime)))?;
        form = form.part("cover", part);
    }
    Ok(form)
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::network(err.to_string())
}

fn status_message(what: &str, status: StatusCode) -> String {
    format!("{} ({})", what, status)
}

/// Any non-success status is a network error; server detail is dropped.
fn require_success(response: Response, what: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::network(status_message(what, status)))
    }
}

/// Like [`require_success`], but a 4xx carrying `{"error": "..."}` becomes a
/// validation error with the server's message.
async fn require_accepted(response: Response, what: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status.is_client_error() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = message {
            return Err(StoreError::validation(message));
        }
    }

    Err(StoreError::network(status_message(what, status)))
}

async fn decode<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| StoreError::network(format!("invalid response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_origin() {
        let client = LibraryClient::new("http://localhost:3001/").unwrap();
        assert_eq!(client.origin(), "http://localhost:3001");
        assert_eq!(client.api_url("/books"), "http://localhost:3001/api/books");
    }

    #[test]
    fn test_client_from_config() {
        let client = LibraryClient::from_config(&Config::default()).unwrap();
        assert_eq!(
            client.resolver().resolve(Some("/uploads/a.jpg")).url(),
            Some("http://localhost:3001/uploads/a.jpg")
        );
    }

    #[test]
    fn test_book_form_builds_with_and_without_cover() {
        let cover = CoverFile::from_bytes("a.jpg", vec![1, 2]).unwrap();
        assert!(book_form(&BookDraft::new("T", "A", ""), Some(&cover)).is_ok());
        assert!(book_form(&BookDraft::default(), None).is_ok());
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            status_message("Failed to fetch books", StatusCode::INTERNAL_SERVER_ERROR),
            "Failed to fetch books (500 Internal Server Error)"
        );
    }

    #[test]
    fn test_error_body_deserialize() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "Title is required"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("Title is required"));
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
