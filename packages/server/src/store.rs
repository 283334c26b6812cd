use crate::config::RemoteConfig;
use crate::remote::{send, send_json, RemoteError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docsync_compiler_docs::BatchUpdate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Document";
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";

const LIST_FIELDS: &str = "files(id, name, webViewLink, createdTime, modifiedTime)";
const LIST_ORDER: &str = "modifiedTime desc";

/// Credential for one request against the document store.
///
/// Built per incoming request and passed down explicitly; the store client
/// itself never holds a user's credential.
#[derive(Debug, Clone)]
pub struct ClientContext {
    access_token: String,
}

impl ClientContext {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDocument {
    pub document_id: String,
    pub document_url: String,
}

/// Listing entry for an existing document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    pub mime_type: String,
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self {
            mime_type: DOCUMENT_MIME_TYPE.to_string(),
        }
    }
}

impl DocumentFilter {
    fn query(&self) -> String {
        format!("mimeType='{}'", self.mime_type.replace('\'', "\\'"))
    }
}

/// Remote service holding the destination documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create an empty document
    async fn create_document(
        &self,
        ctx: &ClientContext,
        title: &str,
    ) -> Result<CreatedDocument, RemoteError>;

    /// Apply a batch of edits atomically, in order
    async fn batch_update(
        &self,
        ctx: &ClientContext,
        document_id: &str,
        batch: &BatchUpdate,
    ) -> Result<(), RemoteError>;

    async fn list_documents(
        &self,
        ctx: &ClientContext,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentMeta>, RemoteError>;
}

/// Browser URL for editing a document
pub fn document_url(document_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}/edit", document_id)
}

/// Most recently modified first; entries without a timestamp go last
pub fn sort_by_recent(documents: &mut [DocumentMeta]) {
    documents.sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
}

pub struct GoogleDocumentStore {
    http: reqwest::Client,
    docs_base_url: String,
    drive_base_url: String,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    document_id: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DocumentMeta>,
}

impl GoogleDocumentStore {
    pub fn new(http: reqwest::Client, remote: &RemoteConfig) -> Self {
        Self {
            http,
            docs_base_url: remote.docs_base_url.trim_end_matches('/').to_string(),
            drive_base_url: remote.drive_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for GoogleDocumentStore {
    async fn create_document(
        &self,
        ctx: &ClientContext,
        title: &str,
    ) -> Result<CreatedDocument, RemoteError> {
        let request = self
            .http
            .post(format!("{}/v1/documents", self.docs_base_url))
            .bearer_auth(ctx.access_token())
            .json(&CreateRequest { title });
        let created: CreateResponse = send_json(request).await?;

        tracing::info!(document_id = %created.document_id, "created document");
        Ok(CreatedDocument {
            document_url: document_url(&created.document_id),
            document_id: created.document_id,
        })
    }

    async fn batch_update(
        &self,
        ctx: &ClientContext,
        document_id: &str,
        batch: &BatchUpdate,
    ) -> Result<(), RemoteError> {
        let request = self
            .http
            .post(format!(
                "{}/v1/documents/{}:batchUpdate",
                self.docs_base_url, document_id
            ))
            .bearer_auth(ctx.access_token())
            .json(batch);

        send(request).await
    }

    async fn list_documents(
        &self,
        ctx: &ClientContext,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentMeta>, RemoteError> {
        let query = filter.query();
        let request = self
            .http
            .get(format!("{}/drive/v3/files", self.drive_base_url))
            .bearer_auth(ctx.access_token())
            .query(&[
                ("q", query.as_str()),
                ("fields", LIST_FIELDS),
                ("orderBy", LIST_ORDER),
            ]);
        let list: FileList = send_json(request).await?;

        let mut documents = list.files;
        sort_by_recent(&mut documents);
        Ok(documents)
    }
}
