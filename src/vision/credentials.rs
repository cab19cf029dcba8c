//! Credentials for the label detection API

use std::path::Path;

use gcp_auth::TokenProvider;
use serde::Deserialize;

use crate::{Error, Result};

/// OAuth2 scope covering the Vision API
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// How requests to the Vision API are authorized
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `key` query parameter
    ApiKey(String),
    /// Pre-issued OAuth2 access token, sent as a bearer token
    AccessToken(String),
    /// `authorized_user` file; a fresh access token is minted from the refresh token
    AuthorizedUser(AuthorizedUser),
    /// Service account key file contents, exchanged for a token per run
    ServiceAccount(String),
    /// Whatever the environment provides (gcloud login, metadata server)
    ApplicationDefault,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizedUser {
    client_id: String,
    client_secret: Option<String>,
    refresh_token: String,
    token_uri: String,
}

/// Accepted credential file layouts.
///
/// Token files written by different tools store the token as either `token`
/// or `access_token`; both are read independently.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CredentialsFile {
    api_key: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    token: Option<String>,
    access_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    token_uri: Option<String>,
    client_email: Option<String>,
    private_key: Option<String>,
}

impl Credentials {
    pub fn api_key(key: impl Into<String>) -> Self {
        Credentials::ApiKey(key.into())
    }

    pub fn access_token(token: impl Into<String>) -> Self {
        Credentials::AccessToken(token.into())
    }

    /// Read credentials from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| match e {
            Error::InvalidCredentials(msg) => {
                Error::InvalidCredentials(format!("{}: {}", path.display(), msg))
            }
            other => Error::InvalidCredentials(format!("{}: {}", path.display(), other)),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CredentialsFile = serde_json::from_str(json)?;

        if let Some(key) = non_empty(file.api_key) {
            return Ok(Credentials::ApiKey(key));
        }

        if file.kind.as_deref() == Some("service_account") {
            if non_empty(file.client_email).is_none() || non_empty(file.private_key).is_none() {
                return Err(Error::InvalidCredentials(
                    "service account key needs `client_email` and `private_key`".to_string(),
                ));
            }
            return Ok(Credentials::ServiceAccount(json.to_string()));
        }

        if let (Some(client_id), Some(refresh_token)) =
            (non_empty(file.client_id), non_empty(file.refresh_token))
        {
            return Ok(Credentials::AuthorizedUser(AuthorizedUser {
                client_id,
                client_secret: non_empty(file.client_secret),
                refresh_token,
                token_uri: non_empty(file.token_uri)
                    .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            }));
        }

        if let Some(token) = non_empty(file.access_token).or_else(|| non_empty(file.token)) {
            return Ok(Credentials::AccessToken(token));
        }

        Err(Error::InvalidCredentials(
            "expected an `api_key`, a service account key, an authorized user, or a `token`"
                .to_string(),
        ))
    }

    /// Attach credentials to `request`, fetching a token first when needed
    pub(crate) async fn authorize(
        &self,
        http: &reqwest::Client,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        let token = match self {
            Credentials::ApiKey(key) => return Ok(request.query(&[("key", key.as_str())])),
            Credentials::AccessToken(token) => token.clone(),
            Credentials::AuthorizedUser(user) => user.refresh(http).await?,
            Credentials::ServiceAccount(key) => {
                let account = gcp_auth::CustomServiceAccount::from_json(key).map_err(auth_error)?;
                let token = account
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(auth_error)?;
                token.as_str().to_string()
            }
            Credentials::ApplicationDefault => {
                let provider = gcp_auth::provider().await.map_err(auth_error)?;
                let token = provider
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(auth_error)?;
                token.as_str().to_string()
            }
        };

        Ok(request.bearer_auth(token))
    }
}

impl AuthorizedUser {
    /// Exchange the refresh token for an access token
    async fn refresh(&self, http: &reqwest::Client) -> Result<String> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        if let Some(secret) = self.client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        let resp = http.post(&self.token_uri).form(&form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Auth(format!("token refresh HTTP {}: {}", status.as_u16(), body)));
        }

        let body: serde_json::Value = resp.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Auth("no access_token in refresh response".to_string()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
            Credentials::AuthorizedUser(user) => f
                .debug_struct("AuthorizedUser")
                .field("client_id", &user.client_id)
                .field("token_uri", &user.token_uri)
                .finish_non_exhaustive(),
            Credentials::ServiceAccount(_) => f.write_str("ServiceAccount(***)"),
            Credentials::ApplicationDefault => f.write_str("ApplicationDefault"),
        }
    }
}

fn auth_error(err: gcp_auth::Error) -> Error {
    Error::Auth(err.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
