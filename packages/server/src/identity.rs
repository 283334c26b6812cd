use crate::auth::Claims;
use crate::config::{GoogleConfig, RemoteConfig};
use crate::remote::{send_json, RemoteError};
use async_trait::async_trait;
use serde::Deserialize;

/// Scopes requested on the consent screen
pub const OAUTH_SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/documents",
];

/// External identity provider that vouches for end users
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up the user behind a provider access token
    async fn fetch_profile(&self, access_token: &str) -> Result<Claims, RemoteError>;

    /// URL of the provider consent screen
    fn authorization_url(&self) -> String;

    /// Trade an authorization code for a provider access token
    async fn exchange_code(&self, code: &str) -> Result<String, RemoteError>;
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    #[serde(default)]
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

impl From<UserInfo> for Claims {
    fn from(info: UserInfo) -> Self {
        Claims {
            google_id: info.sub,
            email: info.email,
            name: info.name,
            picture: info.picture,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleIdentity {
    http: reqwest::Client,
    google: GoogleConfig,
    remote: RemoteConfig,
}

impl GoogleIdentity {
    pub fn new(http: reqwest::Client, google: GoogleConfig, remote: RemoteConfig) -> Self {
        Self {
            http,
            google,
            remote,
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentity {
    async fn fetch_profile(&self, access_token: &str) -> Result<Claims, RemoteError> {
        let request = self.http.get(&self.remote.userinfo_url).bearer_auth(access_token);
        let info: UserInfo = send_json(request).await?;

        tracing::debug!(google_id = %info.sub, "fetched user profile");
        Ok(info.into())
    }

    fn authorization_url(&self) -> String {
        authorization_url(&self.remote.oauth_auth_url, &self.google)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, RemoteError> {
        let form = [
            ("code", code),
            ("client_id", self.google.client_id.as_str()),
            ("client_secret", self.google.client_secret.as_str()),
            ("redirect_uri", self.google.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let request = self.http.post(&self.remote.oauth_token_url).form(&form);
        let tokens: TokenResponse = send_json(request).await?;

        Ok(tokens.access_token)
    }
}

/// Consent URL asking for offline access to profile, email, drive files and documents
pub fn authorization_url(base: &str, google: &GoogleConfig) -> String {
    let scope = OAUTH_SCOPES.join(" ");
    let params = [
        ("access_type", "offline"),
        ("scope", scope.as_str()),
        ("prompt", "consent"),
        ("response_type", "code"),
        ("client_id", google.client_id.as_str()),
        ("redirect_uri", google.redirect_uri.as_str()),
    ];

    match reqwest::Url::parse_with_params(base, &params) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::error!("Invalid OAuth authorization URL {:?}: {}", base, e);
            base.to_string()
        }
    }
}
