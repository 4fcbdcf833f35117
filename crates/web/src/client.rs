//! Typed HTTP client for the NoteMaster REST API.
//!
//! Mutations return the API's [`OperationResult`] whatever the status code.
//! Reads return the decoded view model, or the failure envelope. When the
//! API cannot be reached or answers with something that is not JSON, the
//! client logs the cause and synthesizes `Error: Internal server error`
//! so callers only ever handle envelopes.

use notemaster_core::models::{CategoryModel, NoteModel, TagModel};
use notemaster_core::result::OperationResult;
use notemaster_core::types::DbId;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiClientConfig;

const CATEGORY_PATH: &str = "v1/notes/categories";
const TAGS_PATH: &str = "v1/notes/tags";
const SINGLE_TAG_PATH: &str = "v1/notes/tag";
const SINGLE_NOTE_PATH: &str = "v1/notes/note";
const MULTIPLE_NOTE_PATH: &str = "v1/notes/notes";

/// Message placed in the synthesized envelope on transport failure.
pub const TRANSPORT_FAILURE: &str = "Internal server error";

/// Errors talking to the REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("Unexpected response ({status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Proxy over the REST API. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct NoteApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl NoteApiClient {
    pub fn new(config: &ApiClientConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- categories ----

    pub async fn create_category(&self, model: &CategoryModel) -> OperationResult {
        self.mutate("create_category", self.json(Method::POST, CATEGORY_PATH, model))
            .await
    }

    pub async fn get_categories(&self) -> Result<Vec<CategoryModel>, OperationResult> {
        self.read("get_categories", self.request(Method::GET, CATEGORY_PATH))
            .await
    }

    pub async fn get_category(&self, id: DbId) -> Result<CategoryModel, OperationResult> {
        let path = format!("{CATEGORY_PATH}/{id}");
        self.read("get_category", self.request(Method::GET, &path))
            .await
    }

    pub async fn update_category(&self, model: &CategoryModel) -> OperationResult {
        self.mutate("update_category", self.json(Method::PUT, CATEGORY_PATH, model))
            .await
    }

    pub async fn delete_category(&self, id: DbId) -> OperationResult {
        let path = format!("{CATEGORY_PATH}/{id}");
        self.mutate("delete_category", self.request(Method::DELETE, &path))
            .await
    }

    // ---- tags ----

    pub async fn create_tag(&self, model: &TagModel) -> OperationResult {
        self.mutate("create_tag", self.json(Method::POST, SINGLE_TAG_PATH, model))
            .await
    }

    pub async fn get_tags_by_category(
        &self,
        category_id: DbId,
    ) -> Result<Vec<TagModel>, OperationResult> {
        let path = format!("{TAGS_PATH}/{category_id}");
        self.read("get_tags_by_category", self.request(Method::GET, &path))
            .await
    }

    pub async fn update_tag(&self, model: &TagModel) -> OperationResult {
        self.mutate("update_tag", self.json(Method::PUT, SINGLE_TAG_PATH, model))
            .await
    }

    pub async fn delete_tag(&self, id: DbId) -> OperationResult {
        let path = format!("{SINGLE_TAG_PATH}/{id}");
        self.mutate("delete_tag", self.request(Method::DELETE, &path))
            .await
    }

    // ---- notes ----

    pub async fn create_note(&self, model: &NoteModel) -> OperationResult {
        self.mutate("create_note", self.json(Method::POST, SINGLE_NOTE_PATH, model))
            .await
    }

    pub async fn get_note_by_id(&self, id: DbId) -> Result<NoteModel, OperationResult> {
        let path = format!("{SINGLE_NOTE_PATH}/{id}");
        self.read("get_note_by_id", self.request(Method::GET, &path))
            .await
    }

    pub async fn get_notes_by_category(
        &self,
        category_id: DbId,
    ) -> Result<Vec<NoteModel>, OperationResult> {
        let path = format!("{MULTIPLE_NOTE_PATH}/{category_id}");
        self.read("get_notes_by_category", self.request(Method::GET, &path))
            .await
    }

    pub async fn get_notes_by_tag(&self, tag_id: DbId) -> Result<Vec<NoteModel>, OperationResult> {
        let path = format!("{MULTIPLE_NOTE_PATH}/tag/{tag_id}");
        self.read("get_notes_by_tag", self.request(Method::GET, &path))
            .await
    }

    pub async fn update_note(&self, model: &NoteModel) -> OperationResult {
        self.mutate("update_note", self.json(Method::PUT, SINGLE_NOTE_PATH, model))
            .await
    }

    pub async fn delete_note(&self, id: DbId) -> OperationResult {
        let path = format!("{SINGLE_NOTE_PATH}/{id}");
        self.mutate("delete_note", self.request(Method::DELETE, &path))
            .await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{path}", self.base_url))
    }

    fn json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    async fn mutate(&self, operation: &'static str, request: RequestBuilder) -> OperationResult {
        match Self::send::<OperationResult>(request).await {
            Ok(Ok(result) | Err(result)) => result,
            Err(err) => transport_failure(operation, &err),
        }
    }

    async fn read<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, OperationResult> {
        Self::send::<T>(request)
            .await
            .unwrap_or_else(|err| Err(transport_failure(operation, &err)))
    }

    /// Send the request and decode a 2xx body as `T`, anything else as an
    /// envelope.
    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<Result<T, OperationResult>, ApiClientError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let decode_error = |source| ApiClientError::Decode {
            status: status.as_u16(),
            source,
        };
        if status.is_success() {
            serde_json::from_slice::<T>(&bytes)
                .map(Ok)
                .map_err(decode_error)
        } else {
            serde_json::from_slice::<OperationResult>(&bytes)
                .map(Err)
                .map_err(decode_error)
        }
    }
}

fn transport_failure(operation: &'static str, err: &ApiClientError) -> OperationResult {
    tracing::warn!(operation, error = %err, "Note API call failed");
    OperationResult::error(TRANSPORT_FAILURE)
}
