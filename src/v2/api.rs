/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::config::resolve_path;
use crate::v2::errors::RexError;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub const CURRENT_USER_PATH: &str = "/api/v2/users/current";
pub const USERS_PATH: &str = "/api/v2/users";
pub const FIND_USER_ID_BY_EMAIL_PATH: &str = "/api/v2/users/search/findUserIdByEmail";
pub const FIND_USER_BY_ID_PATH: &str = "/api/v2/users/search/findByUserId";
pub const PROJECTS_PATH: &str = "/api/v2/projects";
pub const PROJECTS_BY_OWNER_PATH: &str = "/api/v2/projects/search/findAllByOwner";
pub const REX_REFERENCES_PATH: &str = "/api/v2/rexReferences";
pub const PROJECT_FILES_PATH: &str = "/api/v2/projectFiles/";

/// Performs the actual REX requests.
///
/// Every resource operation goes through this trait, so anything that can attach the
/// credentials and send a request (the [`crate::v2::Client`], a test double, a wrapper that
/// records calls) can drive them.
pub trait Executor: Send + Sync {
    /// Host the API paths are resolved against
    fn base_url(&self) -> &Url;

    /// Starts a request on the underlying transport
    fn request(&self, method: Method, url: Url) -> RequestBuilder;

    /// Sends the request with the bearer token and `accept: application/json` attached.
    ///
    /// The response body belongs to the caller, who must read it to the end.
    fn execute(
        &self,
        request: RequestBuilder,
    ) -> impl Future<Output = Result<Response, RexError>> + Send;
}

/// Resolves an API path against the executor's host
pub(crate) fn endpoint<E: Executor>(client: &E, path: &str) -> Result<Url, RexError> {
    resolve_path(client.base_url(), path)
}

/// Resolves the url of a single resource of a collection (e.g. a project by id).
///
/// The id is appended as one percent-encoded path segment, so `/`, `?` or `..` inside it
/// cannot reach another endpoint.
pub(crate) fn resource_endpoint<E: Executor>(
    client: &E,
    collection_path: &str,
    id: &str,
) -> Result<Url, RexError> {
    let mut req_url = endpoint(client, collection_path)?;
    req_url
        .path_segments_mut()
        .map_err(|_| RexError::UrlParsing(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push(id);
    Ok(req_url)
}

/// Drains the body and fails with [`RexError::ApiResponse`] unless the status matches.
pub(crate) async fn read_body(resp: Response, expected: StatusCode) -> Result<String, RexError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status != expected {
        return Err(RexError::ApiResponse(status.as_u16(), body));
    }
    Ok(body)
}

/// GETs the url expecting a `200` with a JSON body
pub(crate) async fn get_json<T, E>(client: &E, url: Url) -> Result<T, RexError>
where
    T: DeserializeOwned,
    E: Executor,
{
    let resp = client.execute(client.request(Method::GET, url)).await?;
    let body = read_body(resp, StatusCode::OK).await?;
    Ok(serde_json::from_str(&body)?)
}

/// POSTs the payload as JSON expecting a `201` with the created resource as body
pub(crate) async fn post_json<T, P, E>(client: &E, url: Url, payload: &P) -> Result<T, RexError>
where
    T: DeserializeOwned,
    P: Serialize + ?Sized,
    E: Executor,
{
    let req = client.request(Method::POST, url).json(payload);
    let resp = client.execute(req).await?;
    let body = read_body(resp, StatusCode::CREATED).await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v2::{AccessToken, Client, Config};

    fn client() -> Client {
        Client::with_token(
            Config::new("http://localhost:8080").unwrap(),
            AccessToken::new("t"),
        )
    }

    #[test]
    fn resource_id_is_a_single_segment() {
        let url = resource_endpoint(&client(), PROJECTS_PATH, "1020").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/projects/1020");
    }

    #[test]
    fn resource_id_cannot_leave_the_collection() {
        let url = resource_endpoint(&client(), PROJECTS_PATH, "1020/../../users").unwrap();
        assert_eq!(url.path(), "/api/v2/projects/1020%2F..%2F..%2Fusers");

        let url = resource_endpoint(&client(), PROJECTS_PATH, "1?x#y").unwrap();
        assert_eq!(url.path(), "/api/v2/projects/1%3Fx%23y");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }
}
