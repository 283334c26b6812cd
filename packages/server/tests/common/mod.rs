//! In-memory collaborators for exercising the service and routes
#![allow(dead_code)]

use async_trait::async_trait;
use docsync_compiler_docs::BatchUpdate;
use docsync_server::auth::Claims;
use docsync_server::store::document_url;
use docsync_server::{
    AppState, ClientContext, CreatedDocument, DocumentFilter, DocumentMeta, DocumentStore,
    HmacAuthenticator, IdentityProvider, RemoteError, RetryPolicy, ServerConfig,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SECRET: &str = "test-secret";
pub const GOOD_GOOGLE_TOKEN: &str = "google-token";

pub fn user() -> Claims {
    Claims {
        google_id: "g-1".to_string(),
        email: "ada@example.com".to_string(),
        name: Some("Ada".to_string()),
        picture: None,
    }
}

pub struct FakeIdentity;

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn fetch_profile(&self, access_token: &str) -> Result<Claims, RemoteError> {
        if access_token == GOOD_GOOGLE_TOKEN {
            Ok(user())
        } else {
            Err(RemoteError::Status {
                status: 401,
                body: "invalid token".to_string(),
            })
        }
    }

    fn authorization_url(&self) -> String {
        "https://accounts.example.com/auth?client_id=test".to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, RemoteError> {
        if code == "good-code" {
            Ok("exchanged token".to_string())
        } else {
            Err(RemoteError::Status {
                status: 400,
                body: "invalid_grant".to_string(),
            })
        }
    }
}

/// Call recorded by the fake store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create { token: String, title: String },
    BatchUpdate { token: String, document_id: String, batch: BatchUpdate },
    List { token: String, mime_type: String },
}

#[derive(Default)]
pub struct FakeStore {
    pub calls: Mutex<Vec<StoreCall>>,
    /// Number of upcoming batch updates that fail with 503
    pub failing_updates: Mutex<u32>,
    pub fail_create: bool,
    pub documents: Vec<DocumentMeta>,
}

impl FakeStore {
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn with_failing_updates(self, count: u32) -> Self {
        *self.failing_updates.lock().unwrap() = count;
        self
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn create_document(
        &self,
        ctx: &ClientContext,
        title: &str,
    ) -> Result<CreatedDocument, RemoteError> {
        self.calls.lock().unwrap().push(StoreCall::Create {
            token: ctx.access_token().to_string(),
            title: title.to_string(),
        });

        if self.fail_create {
            return Err(RemoteError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }

        Ok(CreatedDocument {
            document_id: "doc-1".to_string(),
            document_url: document_url("doc-1"),
        })
    }

    async fn batch_update(
        &self,
        ctx: &ClientContext,
        document_id: &str,
        batch: &BatchUpdate,
    ) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(StoreCall::BatchUpdate {
            token: ctx.access_token().to_string(),
            document_id: document_id.to_string(),
            batch: batch.clone(),
        });

        let mut failing = self.failing_updates.lock().unwrap();
        if *failing > 0 {
            *failing -= 1;
            return Err(RemoteError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        ctx: &ClientContext,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentMeta>, RemoteError> {
        self.calls.lock().unwrap().push(StoreCall::List {
            token: ctx.access_token().to_string(),
            mime_type: filter.mime_type.clone(),
        });
        Ok(self.documents.clone())
    }
}

pub fn quick_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(2),
    }
}

pub fn app_state(store: Arc<FakeStore>) -> AppState {
    let config = ServerConfig {
        jwt_secret: SECRET.to_string(),
        frontend_url: "http://frontend.test".to_string(),
        ..ServerConfig::default()
    };

    AppState {
        authenticator: Arc::new(HmacAuthenticator::new(SECRET, config.token_ttl_secs)),
        identity: Arc::new(FakeIdentity),
        store,
        retry: quick_retry(3),
        config: Arc::new(config),
    }
}
