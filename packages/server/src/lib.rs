pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod remote;
pub mod retry;
pub mod routes;
pub mod service;
pub mod store;

pub use auth::{bearer_token, AuthError, Authenticator, Claims, HmacAuthenticator, TokenClaims};
pub use config::{ConfigError, ServerConfig};
pub use error::ServerError;
pub use identity::{GoogleIdentity, IdentityProvider};
pub use remote::RemoteError;
pub use retry::{retry, RetryPolicy};
pub use routes::{router, AppState};
pub use store::{
    ClientContext, CreatedDocument, DocumentFilter, DocumentMeta, DocumentStore,
    GoogleDocumentStore,
};
