use crate::auth::{bearer_token, AuthError, Authenticator, Claims};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::identity::IdentityProvider;
use crate::retry::RetryPolicy;
use crate::service;
use crate::store::{ClientContext, CreatedDocument, DocumentFilter, DocumentMeta, DocumentStore};
use axum::extract::{DefaultBodyLimit, FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Everything a handler needs; cloned per request, holds no per-user state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub authenticator: Arc<dyn Authenticator>,
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub retry: RetryPolicy,
}

/// A caller holding a valid bearer credential
pub struct AuthUser {
    pub claims: Claims,
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::Missing)?;
        let claims = state.authenticator.verify(token)?;

        Ok(AuthUser {
            claims,
            token: token.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Claims,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    #[serde(flatten)]
    pub document: CreatedDocument,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsQuery {
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub success: bool,
    pub documents: Vec<DocumentMeta>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: Claims,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// Response headers added unless a handler already set them.
///
/// Opener policy allows popups so the OAuth window can report back; no
/// embedder policy is sent.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("cross-origin-opener-policy", "same-origin-allow-popups"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
];

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    let cors = cors_layer(&state.config.cors_origin);

    let routes = Router::new()
        .route("/api/auth/google", post(google_login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/save-to-drive", post(save_to_drive))
        .route("/api/get-documents", get(get_documents))
        .route("/api/user/profile", get(profile))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/google/url", get(google_url))
        .route("/auth/google/callback", get(google_callback))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit));

    with_security_headers(routes).layer(cors)
}

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            layer
        }
    }
}

async fn google_login(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let access_token = request
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Google access token is required".to_string()))?;

    let user = state
        .identity
        .fetch_profile(&access_token)
        .await
        .map_err(ServerError::Identity)?;
    let token = state.authenticator.issue(&user)?;

    tracing::info!(google_id = %user.google_id, "user signed in");
    Ok(Json(LoginResponse { token, user }))
}

async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TokenResponse>, ServerError> {
    let token = state.authenticator.refresh(&auth.token)?;
    Ok(Json(TokenResponse { token }))
}

async fn save_to_drive(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ServerError> {
    let ctx = client_context(request.access_token)?;

    let document = service::save_markup(
        state.store.as_ref(),
        &state.retry,
        &ctx,
        request.title.as_deref(),
        &request.content,
    )
    .await
    .map_err(ServerError::remote("Failed to save document to Google Drive"))?;

    tracing::info!(
        google_id = %auth.claims.google_id,
        document_id = %document.document_id,
        "saved document"
    );
    Ok(Json(SaveResponse {
        success: true,
        document,
    }))
}

async fn get_documents(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<DocumentsQuery>,
) -> Result<Json<DocumentsResponse>, ServerError> {
    let ctx = client_context(query.access_token)?;

    let documents = service::list_documents(
        state.store.as_ref(),
        &state.retry,
        &ctx,
        &DocumentFilter::default(),
    )
    .await
    .map_err(ServerError::remote("Failed to fetch documents from Google Drive"))?;

    Ok(Json(DocumentsResponse {
        success: true,
        documents,
    }))
}

async fn profile(auth: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: auth.claims })
}

/// Credentials are stateless, so logging out only acknowledges the request
async fn logout(_auth: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

async fn google_url(State(state): State<AppState>) -> Json<UrlResponse> {
    Json(UrlResponse {
        url: state.identity.authorization_url(),
    })
}

async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let frontend = state.config.frontend_url.trim_end_matches('/');
    let error_url = format!("{}/auth-error", frontend);

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("OAuth callback without a code");
        return Redirect::to(&error_url);
    };

    match state.identity.exchange_code(&code).await {
        Ok(access_token) => {
            let target = format!("{}/auth-callback", frontend);
            match reqwest::Url::parse_with_params(&target, &[("token", access_token.as_str())]) {
                Ok(url) => Redirect::to(url.as_str()),
                Err(e) => {
                    tracing::error!("Invalid frontend URL {:?}: {}", target, e);
                    Redirect::to(&error_url)
                }
            }
        }
        Err(e) => {
            tracing::error!("OAuth callback error: {}", e);
            Redirect::to(&error_url)
        }
    }
}

/// Fresh per-request store credential
fn client_context(access_token: Option<String>) -> Result<ClientContext, ServerError> {
    access_token
        .filter(|t| !t.is_empty())
        .map(ClientContext::new)
        .ok_or_else(|| ServerError::Unauthorized("No Google access token provided".to_string()))
}
