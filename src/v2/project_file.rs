/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{
    PROJECT_FILES_PATH, PROJECTS_PATH, endpoint, post_json, read_body, resource_endpoint,
};
use crate::v2::errors::RexError;
use crate::v2::links::Link;
use crate::v2::parsers::file_name_from_content_disposition;
use crate::v2::{Executor, FileTransformation, NewReference, Reference};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use url::Url;

pub use crate::v2::parsers::DEFAULT_FILE_NAME;

/// A file of a project, e.g. a 3D model.
///
/// Every file hangs off its own (non-root) reference.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub file_type: Option<String>,

    #[serde(default)]
    pub file_size: u64,

    #[serde(default)]
    pub last_modified: Option<String>,

    #[serde(default, rename = "_links")]
    pub links: ProjectFileLinks,
}

/// Links returned for a project file
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFileLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,

    pub project: Option<Link>,

    pub rex_reference: Option<Link>,

    #[serde(rename = "file.download")]
    pub file_download: Option<Link>,

    #[serde(rename = "file.upload")]
    pub file_upload: Option<Link>,
}

/// Properties used when uploading a new project file
#[derive(Debug, Clone, Default)]
pub struct UploadProps {
    /// Displayed name of the file
    pub name: String,

    /// Name including the suffix, the server derives the mime type from it
    pub file_name: String,

    /// Placement relative to the project's root reference
    pub file_transformation: Option<FileTransformation>,
}

/// Local result of a download
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes_written: u64,
}

// Payload for creating a project file record
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct NewProjectFile<'a> {
    name: &'a str,
    project: &'a str,
    rex_reference: &'a str,
}

impl ProjectFile {
    /// Uploads a new file into the project with the given id (e.g. `1020`).
    ///
    /// Runs four requests, each only after the previous one succeeded:
    /// 1. fetch the project's root reference ([`RexError::NoProjectReference`] if there is none)
    ///    from `{base}/api/v2/projects/{id}/rootRexReference`, the one url not taken from a
    ///    response link
    /// 2. create a reference for the file below the root reference
    /// 3. create the file record pointing to that reference
    /// 4. stream `content` as `multipart/form-data` to the record's upload link
    ///
    /// Records created before a failing step are not removed.
    pub async fn upload<E, R>(
        client: &E,
        project_id: &str,
        props: UploadProps,
        content: R,
    ) -> Result<ProjectFile, RexError>
    where
        E: Executor,
        R: AsyncRead + Send + Sync + 'static,
    {
        let project_url = resource_endpoint(client, PROJECTS_PATH, project_id)?;
        let project_link = project_url.as_str();

        let root = Self::root_reference(client, project_id, &project_url).await?;
        let reference = NewReference::child(
            project_link,
            root.self_link()?,
            props.file_transformation,
        );
        let reference = Reference::create(client, &reference).await?;

        let new_file = NewProjectFile {
            name: &props.name,
            project: project_link,
            rex_reference: reference.self_link()?,
        };
        let req_url = endpoint(client, PROJECT_FILES_PATH)?;
        let file: ProjectFile = post_json(client, req_url, &new_file).await?;
        log::debug!("created project file record {}", file.name);

        let upload_link = file
            .links
            .file_upload
            .as_ref()
            .ok_or_else(|| RexError::LinkMissing("projectFile._links.file.upload".to_string()))?;
        upload_content(client, upload_link.url(), &props.file_name, content).await?;
        Ok(file)
    }

    /// Downloads this file into `dest_dir`, see [`download_file`]
    pub async fn download<E: Executor>(
        &self,
        client: &E,
        dest_dir: impl AsRef<Path>,
    ) -> Result<DownloadedFile, RexError> {
        let link = self
            .links
            .file_download
            .as_ref()
            .ok_or_else(|| RexError::LinkMissing("projectFile._links.file.download".to_string()))?;
        download_file(client, link.url(), dest_dir).await
    }

    // The root reference is the `rootRexReference` sub resource of the project url. That url
    // is derived from the project id here, not taken from a link of an earlier response.
    async fn root_reference<E: Executor>(
        client: &E,
        project_id: &str,
        project_url: &Url,
    ) -> Result<Reference, RexError> {
        let req_url = Url::parse(&format!("{project_url}/rootRexReference"))?;
        let resp = client.execute(client.request(Method::GET, req_url)).await?;
        if resp.status() != StatusCode::OK {
            resp.text().await?;
            return Err(RexError::NoProjectReference(project_id.to_string()));
        }
        let body = read_body(resp, StatusCode::OK).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// Posts the content as the single `file` field of a multipart form
async fn upload_content<E, R>(
    client: &E,
    upload_link: &str,
    file_name: &str,
    content: R,
) -> Result<(), RexError>
where
    E: Executor,
    R: AsyncRead + Send + Sync + 'static,
{
    let part = Part::stream(Body::wrap_stream(ReaderStream::new(content)))
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")?;
    let form = Form::new().part("file", part);

    let req = client.request(Method::POST, Url::parse(upload_link)?).multipart(form);
    let resp = client.execute(req).await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(RexError::ApiResponse(status.as_u16(), body));
    }
    Ok(())
}

/// Downloads the content behind a file link (e.g. a `file.download` link of a project).
///
/// The file is created in `dest_dir` under the name suggested by the `Content-Disposition`
/// header, or [`DEFAULT_FILE_NAME`] without one. An existing file of that name is replaced.
/// When the transfer breaks off the partially written file is removed again.
pub async fn download_file<E: Executor>(
    client: &E,
    link: &str,
    dest_dir: impl AsRef<Path>,
) -> Result<DownloadedFile, RexError> {
    let mut resp = client
        .execute(client.request(Method::GET, Url::parse(link)?))
        .await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await?;
        return Err(RexError::ApiResponse(status.as_u16(), body));
    }

    let file_name = file_name_from_content_disposition(
        resp.headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok()),
    );
    let path = dest_dir.as_ref().join(file_name);

    let mut output = tokio::fs::File::create(&path).await?;
    let written = write_chunks(&mut resp, &mut output).await;
    drop(output);
    let bytes_written = discard_on_error(&path, written).await?;

    log::debug!("{bytes_written} bytes downloaded and stored in {}", path.display());
    Ok(DownloadedFile {
        path,
        bytes_written,
    })
}

// Copies the response body into the file, returning the number of bytes written
async fn write_chunks(
    resp: &mut reqwest::Response,
    output: &mut tokio::fs::File,
) -> Result<u64, RexError> {
    let mut bytes_written: u64 = 0;
    while let Some(chunk) = resp.chunk().await? {
        output.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    output.flush().await?;
    Ok(bytes_written)
}

// Removes the file at `path` when writing it failed
async fn discard_on_error<T>(path: &Path, written: Result<T, RexError>) -> Result<T, RexError> {
    if written.is_err() {
        if let Err(err) = tokio::fs::remove_file(path).await {
            log::warn!("could not remove partial download {}: {err}", path.display());
        }
    }
    written
}
