/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{REX_REFERENCES_PATH, endpoint, get_json, post_json};
use crate::v2::errors::RexError;
use crate::v2::links::Link;
use crate::v2::{Executor, FileTransformation, ProjectAddress, ProjectTransformation};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A spatial anchor, attached to a project or to a file within it.
///
/// References form a tree per project. The root reference has `root_reference` set and no
/// parent, every file reference points to a parent that leads back to the root.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub root_reference: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<ProjectAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_transformation: Option<ProjectTransformation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_transformation: Option<ProjectTransformation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_transformation: Option<FileTransformation>,

    #[serde(default, rename = "_links")]
    pub links: ReferenceLinks,
}

impl Reference {
    /// Returns the reference at the provided full url
    pub async fn from_url<E: Executor>(client: &E, url: &str) -> Result<Self, RexError> {
        get_json(client, Url::parse(url)?).await
    }

    /// Creates a new reference record, see [`NewReference`]
    pub async fn create<E: Executor>(client: &E, reference: &NewReference) -> Result<Self, RexError> {
        let req_url = endpoint(client, REX_REFERENCES_PATH)?;
        let created: Reference = post_json(client, req_url, reference).await?;
        log::debug!(
            "created reference {} (root: {})",
            created.key,
            created.root_reference
        );
        Ok(created)
    }

    /// Link identifying this reference, needed as parent of new references
    pub fn self_link(&self) -> Result<&str, RexError> {
        self.links
            .self_link
            .as_ref()
            .map(Link::url)
            .ok_or_else(|| RexError::LinkMissing("rexReference._links.self".to_string()))
    }
}

/// Links returned for a reference
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_reference: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_references: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_files: Option<Link>,
}

/// Payload for creating a reference.
///
/// The server does not check that `root_reference` and `parent_reference` agree, use
/// [`NewReference::root`] or [`NewReference::child`] to get them right.
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewReference {
    pub project: String,

    pub key: String,

    pub root_reference: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<ProjectAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_transformation: Option<ProjectTransformation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_transformation: Option<FileTransformation>,
}

impl NewReference {
    /// Root reference of the project behind `project_link`, keyed by a fresh UUID
    pub fn root(
        project_link: &str,
        address: Option<&ProjectAddress>,
        absolute_transformation: Option<&ProjectTransformation>,
    ) -> Self {
        Self {
            project: project_link.to_string(),
            key: Uuid::new_v4().to_string(),
            root_reference: true,
            parent_reference: None,
            address: address.cloned(),
            absolute_transformation: absolute_transformation.cloned(),
            file_transformation: None,
        }
    }

    /// Non-root reference hanging off `parent_link`, keyed by a fresh UUID
    pub fn child(
        project_link: &str,
        parent_link: &str,
        file_transformation: Option<FileTransformation>,
    ) -> Self {
        Self {
            project: project_link.to_string(),
            key: Uuid::new_v4().to_string(),
            root_reference: false,
            parent_reference: Some(parent_link.to_string()),
            address: None,
            absolute_transformation: None,
            file_transformation,
        }
    }
}
