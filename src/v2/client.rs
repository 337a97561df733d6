/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::Executor;
use crate::v2::auth::{AccessToken, Creds, authenticate};
use crate::v2::config::Config;
use crate::v2::errors::RexError;
use crate::v2::user::User;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use url::Url;

/// Holds the authentication token and the connection to REX.
///
/// ```rust,no_run
/// # async fn run() -> Result<(), rex::v2::RexError> {
/// use rex::v2::{Client, Config};
///
/// let mut client = Client::new(Config::default());
/// let user = client.login("<ClientId>", "<ClientSecret>").await?;
/// println!("{user}");
/// # Ok(())
/// # }
/// ```
///
/// The token is plain state of the client. Refreshing it while other tasks use the same
/// client is up to the caller; one client per worker avoids the question.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    https_client: reqwest::Client,
    token: Option<AccessToken>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Uses a preconfigured transport (timeouts, proxies, ...)
    pub fn with_http_client(config: Config, https_client: reqwest::Client) -> Self {
        Self {
            config,
            https_client,
            token: None,
        }
    }

    /// Resumes with a token obtained earlier. No request is made.
    pub fn with_token(config: Config, token: AccessToken) -> Self {
        let mut client = Self::new(config);
        client.token = Some(token);
        client
    }

    /// Fetches a new token for the client credentials and returns the user it belongs to
    pub async fn login(&mut self, client_id: &str, client_secret: &str) -> Result<User, RexError> {
        let creds = Creds::new(client_id, client_secret);
        self.token = Some(authenticate(&self.https_client, &self.config, &creds).await?);
        User::current(self).await
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Executor for Client {
    fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.https_client.request(method, url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, RexError> {
        let token = self.token.as_ref().ok_or(RexError::NotAuthenticated())?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token.secret()))
            .map_err(|e| RexError::Auth(format!("token is not a valid header value: {e}")))?;

        let mut request = request.build()?;
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);

        log::debug!("{} {}", request.method(), request.url());
        Ok(self.https_client.execute(request).await?)
    }
}
