/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::config::Config;
use crate::v2::errors::RexError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

pub const TOKEN_PATH: &str = "/oauth/token";

/// Client ID/secret pair created in the REX portal.
#[derive(Default, Clone)]
pub struct Creds {
    client_id: String,
    client_secret: String,
}

impl Creds {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    // Value for the basic authorization header of the token request
    fn basic_auth(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(pair))
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("client_id", &self.client_id)
            .field("client_secret", &"xxx")
            .finish()
    }
}

/// Bearer token handed out by the token endpoint.
///
/// The token is not refreshed when it expires, [`AccessToken::is_expired`] only reports it.
#[derive(Clone)]
pub struct AccessToken {
    access_token: String,
    pub token_type: String,
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Wraps a previously obtained bearer token without expiry information
    pub fn new(access_token: &str) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".into(),
            scope: None,
            expires_at: None,
        }
    }

    /// The raw token value as sent in the authorization header
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"xxx")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// Body returned by the token endpoint
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,

    #[serde(default)]
    token_type: String,

    #[serde(default)]
    expires_in: Option<i64>,

    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    fn into_token(self, issued_at: DateTime<Utc>) -> AccessToken {
        AccessToken {
            access_token: self.access_token,
            token_type: self.token_type,
            scope: self.scope,
            expires_at: self.expires_in.map(|secs| issued_at + Duration::seconds(secs)),
        }
    }
}

/// Exchanges the client credentials for a bearer token (OAuth2 client-credentials grant).
///
/// Anything but a `200` from the token endpoint is an [`RexError::Auth`]. There is no retry.
pub async fn authenticate(
    https_client: &reqwest::Client,
    config: &Config,
    creds: &Creds,
) -> Result<AccessToken, RexError> {
    let req_url = config.endpoint(TOKEN_PATH)?;
    log::debug!("POST {req_url}");

    let resp = https_client
        .post(req_url)
        .header(AUTHORIZATION, creds.basic_auth())
        .header(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=ISO-8859-1",
        )
        .header(ACCEPT, "application/json")
        .body("grant_type=client_credentials")
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if status != StatusCode::OK {
        return Err(RexError::Auth(format!(
            "token endpoint responded with {}: {}",
            status.as_u16(),
            body
        )));
    }

    let token = serde_json::from_str::<TokenResponse>(&body)?;
    Ok(token.into_token(Utc::now()))
}
