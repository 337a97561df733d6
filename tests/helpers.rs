/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use reqwest::{Method, RequestBuilder, Response};
use rex::v2::{AccessToken, Client, Config, Executor, RexError};
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;
use wiremock::MockServer;

#[allow(dead_code)]
pub(crate) const TOKEN: &str = "test-token";

#[allow(dead_code)]
pub(crate) const BEARER: &str = "Bearer test-token";

/// Client already holding a token, talking to the mock server
#[allow(dead_code)]
pub(crate) fn mock_client(server: &MockServer) -> Client {
    Client::with_token(mock_config(server), AccessToken::new(TOKEN))
}

#[allow(dead_code)]
pub(crate) fn mock_config(server: &MockServer) -> Config {
    Config::new(&server.uri()).unwrap()
}

/// Absolute link on the mock server, as REX embeds them in responses
#[allow(dead_code)]
pub(crate) fn link(server: &MockServer, path: &str) -> String {
    format!("{}{}", server.uri(), path)
}

/// Bodies of all requests the mock server received for the path, decoded as JSON
#[allow(dead_code)]
pub(crate) async fn json_bodies(server: &MockServer, path: &str) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|req| req.url.path() == path)
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .collect()
}

/// Executor counting the requests it sends
#[allow(dead_code)]
pub(crate) struct CountingExecutor {
    inner: Client,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingExecutor {
    pub(crate) fn new(inner: Client) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Executor for CountingExecutor {
    fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner.request(method, url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, RexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(request).await
    }
}

/// Credentials for the live REX tests, read from the environment (or `.env`)
#[allow(dead_code)]
pub(crate) fn get_live_creds() -> anyhow::Result<(Config, String, String)> {
    let client_id = std::env::var("REX_CLIENT_ID")?;
    let client_secret = std::env::var("REX_CLIENT_SECRET")?;
    Ok((Config::from_env()?, client_id, client_secret))
}
