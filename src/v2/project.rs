/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{
    PROJECTS_BY_OWNER_PATH, PROJECTS_PATH, endpoint, get_json, post_json, resource_endpoint,
};
use crate::v2::errors::RexError;
use crate::v2::links::{Link, resource_id};
use crate::v2::parsers::from_null_to_empty_vec;
use crate::v2::{
    Executor, NewReference, ProjectAddress, ProjectFile, ProjectTransformation, Reference,
};
use serde::{Deserialize, Serialize};

// Collection segment preceding the project id in project links
const PROJECTS_SEGMENT: &str = "projects";

/// Basic project information as returned by project listings.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProjectSummary {
    /// Taken from the self link, the server does not send it
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default, rename = "_links", skip_serializing)]
    pub links: SummaryLinks,
}

impl ProjectSummary {
    fn with_id(mut self) -> Self {
        self.id = self
            .links
            .self_link
            .as_ref()
            .and_then(|link| resource_id(&link.href, PROJECTS_SEGMENT))
            .unwrap_or_default();
        self
    }

    /// Link identifying this project, needed when attaching references and files
    pub fn self_link(&self) -> Result<&str, RexError> {
        self.links
            .self_link
            .as_ref()
            .map(Link::url)
            .ok_or_else(|| RexError::LinkMissing("project._links.self".to_string()))
    }
}

impl std::fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let self_href = self.links.self_link.as_ref().map_or("", |link| link.url());
        write!(
            f,
            "| {:>6} | {:<20} | {:<15} | {:<65} |",
            self.id, self.name, self.owner, self_href
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SummaryLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
}

/// Full structure of a REX project, including its files and references.
///
/// See [`Project::root_reference`] for the address and placement of the project.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Taken from the request or the self link, the server does not send it
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub date_created: Option<String>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub last_updated: Option<String>,

    #[serde(default)]
    pub updated_by: Option<String>,

    #[serde(default)]
    pub tag_line: Option<String>,

    #[serde(default, rename = "type")]
    pub project_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "_embedded")]
    pub embedded: ProjectEmbedded,

    #[serde(default, rename = "_links")]
    pub links: ProjectLinks,
}

/// Resources embedded into a project response
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEmbedded {
    #[serde(default)]
    pub root_rex_reference: Option<Reference>,

    #[serde(default, deserialize_with = "from_null_to_empty_vec")]
    pub project_files: Vec<ProjectFile>,

    #[serde(default, deserialize_with = "from_null_to_empty_vec")]
    pub rex_references: Vec<Reference>,
}

/// Links returned for a project
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,

    pub project: Option<Link>,

    pub root_rex_reference: Option<Link>,

    pub project_files: Option<Link>,

    pub rex_references: Option<Link>,

    pub project_favorite: Option<Link>,

    pub project_acls: Option<Link>,

    #[serde(rename = "thumbnail.upload")]
    pub thumbnail_upload: Option<Link>,

    #[serde(rename = "thumbnail.download")]
    pub thumbnail_download: Option<Link>,
}

impl Project {
    /// Returns the projects of the given owner (user id).
    ///
    /// Only the summaries are fetched, use [`Project::from_id`] for the details.
    pub async fn list_by_owner<E: Executor>(
        client: &E,
        owner_id: &str,
    ) -> Result<Vec<ProjectSummary>, RexError> {
        let mut req_url = endpoint(client, PROJECTS_BY_OWNER_PATH)?;
        req_url.query_pairs_mut().append_pair("owner", owner_id);

        let resp = get_json::<ProjectsResponse, E>(client, req_url).await?;
        Ok(resp
            .embedded
            .projects
            .into_iter()
            .map(ProjectSummary::with_id)
            .collect())
    }

    /// Returns the full project for the id (e.g. `1020`)
    pub async fn from_id<E: Executor>(client: &E, id: &str) -> Result<Project, RexError> {
        let req_url = resource_endpoint(client, PROJECTS_PATH, id)?;
        let mut project = get_json::<Project, E>(client, req_url).await?;
        project.id = id.to_string();
        Ok(project)
    }

    /// Creates a project for the owner together with its root reference.
    ///
    /// The root reference carries the optional address and absolute transformation. When
    /// creating the reference fails the project stays on the server without one.
    pub async fn create<E: Executor>(
        client: &E,
        owner_id: &str,
        name: &str,
        address: Option<&ProjectAddress>,
        absolute_transformation: Option<&ProjectTransformation>,
    ) -> Result<ProjectSummary, RexError> {
        let new_project = ProjectSummary {
            name: name.to_string(),
            owner: owner_id.to_string(),
            ..Default::default()
        };
        let req_url = endpoint(client, PROJECTS_PATH)?;
        let created = post_json::<ProjectSummary, _, E>(client, req_url, &new_project)
            .await?
            .with_id();
        log::debug!("created project {} ({})", created.name, created.id);

        let root = NewReference::root(created.self_link()?, address, absolute_transformation);
        Reference::create(client, &root).await?;
        Ok(created)
    }

    /// Embedded root reference holding the project's address and transformation
    pub fn root_reference(&self) -> Option<&Reference> {
        self.embedded.root_rex_reference.as_ref()
    }

    pub fn total_file_size(&self) -> u64 {
        self.embedded.project_files.iter().map(|f| f.file_size).sum()
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let rule = "-".repeat(90);
        let has_root_ref = self.root_reference().is_some_and(|r| r.root_reference);

        writeln!(f, "|{rule}|")?;
        writeln!(f, "| Name           | {:<71} |", self.name)?;
        writeln!(f, "| Owner          | {:<71} |", self.owner)?;
        writeln!(f, "| Type           | {:<71} |", self.project_type.as_deref().unwrap_or_default())?;
        writeln!(f, "| Has root ref   | {:<71} |", has_root_ref)?;
        writeln!(f, "| Total files    | {:<71} |", self.embedded.project_files.len())?;
        writeln!(f, "| Total refs     | {:<71} |", self.embedded.rex_references.len())?;
        writeln!(f, "| Total size (KB)| {:<71} |", self.total_file_size() / 1024)?;
        writeln!(f, "|{rule}|")?;
        for (i, file) in self.embedded.project_files.iter().enumerate() {
            let name: String = file.name.chars().take(35).collect();
            writeln!(
                f,
                "| {:>3} | {:<35} | {:>8} (kb) | {} |",
                i,
                name,
                file.file_size / 1024,
                file.last_modified.as_deref().unwrap_or_default()
            )?;
        }
        writeln!(f, "|{rule}|")
    }
}

// Expected response from a project listing
#[derive(Deserialize, Debug)]
struct ProjectsResponse {
    #[serde(default, rename = "_embedded")]
    embedded: EmbeddedProjects,
}

#[derive(Deserialize, Debug, Default)]
struct EmbeddedProjects {
    #[serde(default, deserialize_with = "from_null_to_empty_vec")]
    projects: Vec<ProjectSummary>,
}
