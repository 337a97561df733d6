/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{
    CURRENT_USER_PATH, FIND_USER_BY_ID_PATH, FIND_USER_ID_BY_EMAIL_PATH, USERS_PATH, endpoint,
    get_json, read_body,
};
use crate::v2::errors::RexError;
use crate::v2::links::Link;
use crate::v2::parsers::{from_empty_str_to_none, from_null_to_empty_vec};
use crate::v2::Executor;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

/// Holds information returned from the user API.
///
/// Either the current user or the result of a user query. The `self_link` identifies the
/// user in other calls (e.g. as project owner link).
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub last_login: Option<String>,

    #[serde(default, deserialize_with = "from_null_to_empty_vec")]
    pub roles: Vec<String>,

    #[serde(skip)]
    pub self_link: String,

    #[serde(default, rename = "_links")]
    links: UserLinks,
}

impl User {
    /// Returns the user identified by the access token
    pub async fn current<E: Executor>(client: &E) -> Result<User, RexError> {
        let req_url = endpoint(client, CURRENT_USER_PATH)?;
        get_json::<User, E>(client, req_url)
            .await
            .map(User::with_self_link)
    }

    /// Returns the user with the given user id
    pub async fn from_id<E: Executor>(client: &E, user_id: &str) -> Result<User, RexError> {
        let mut req_url = endpoint(client, FIND_USER_BY_ID_PATH)?;
        req_url.query_pairs_mut().append_pair("userId", user_id);
        get_json::<User, E>(client, req_url)
            .await
            .map(User::with_self_link)
    }

    /// Looks up the user id registered for the email, then fetches that user.
    ///
    /// Fails with [`RexError::NotFound`] without a second request when no user has the email,
    /// including lookups answering with an empty, null or unreadable `userId`.
    pub async fn from_email<E: Executor>(client: &E, email: &str) -> Result<User, RexError> {
        let mut req_url = endpoint(client, FIND_USER_ID_BY_EMAIL_PATH)?;
        req_url.query_pairs_mut().append_pair("email", email);

        let resp = client.execute(client.request(Method::GET, req_url)).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            resp.text().await?;
            return Err(RexError::NotFound(format!("no user with email {email}")));
        }
        let body = read_body(resp, StatusCode::OK).await?;
        let user_id = match serde_json::from_str::<UserIdLookup>(&body) {
            Ok(lookup) => lookup.user_id,
            Err(err) => {
                log::debug!("unreadable user id lookup for {email}: {err}");
                None
            }
        };
        let Some(user_id) = user_id else {
            return Err(RexError::NotFound(format!("no user with email {email}")));
        };

        Self::from_id(client, &user_id).await
    }

    /// Returns the number of registered users.
    ///
    /// Requires admin permissions, other users get an [`RexError::ApiResponse`].
    pub async fn count<E: Executor>(client: &E) -> Result<u64, RexError> {
        let req_url = endpoint(client, USERS_PATH)?;
        let users = get_json::<UsersPage, E>(client, req_url).await?;
        Ok(users.page.total_elements)
    }

    fn with_self_link(mut self) -> Self {
        self.self_link = self
            .links
            .user
            .as_ref()
            .or(self.links.self_link.as_ref())
            .map(|link| link.url().to_string())
            .unwrap_or_default();
        self
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let rule = "-".repeat(79);
        writeln!(f, "|{rule}|")?;
        writeln!(f, "| UserId    | {:<65} |", self.user_id)?;
        writeln!(f, "| Username  | {:<65} |", self.username)?;
        writeln!(f, "| Firstname | {:<65} |", self.first_name.as_deref().unwrap_or_default())?;
        writeln!(f, "| Lastname  | {:<65} |", self.last_name.as_deref().unwrap_or_default())?;
        writeln!(f, "| Email     | {:<65} |", self.email)?;
        writeln!(f, "| LastLogin | {:<65} |", self.last_login.as_deref().unwrap_or_default())?;
        writeln!(f, "| Roles     | {:<65} |", self.roles.join(", "))?;
        writeln!(f, "| Self      | {:<65} |", self.self_link)?;
        writeln!(f, "|{rule}|")
    }
}

// Links returned for a user
#[derive(Deserialize, Debug, Clone, Default)]
struct UserLinks {
    #[serde(rename = "self")]
    self_link: Option<Link>,

    user: Option<Link>,
}

// Expected response from the email lookup
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UserIdLookup {
    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    user_id: Option<String>,
}

// Only the paging information of a user listing is read
#[derive(Deserialize, Debug)]
struct UsersPage {
    page: PageMetadata,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PageMetadata {
    total_elements: u64,
}
