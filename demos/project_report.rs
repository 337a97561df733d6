/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate rex;

use anyhow::Result;
use dotenvy::dotenv;
use rex::v2::{Client, Config, Project, User};
use std::path::PathBuf;

// Prints every project of the user and optionally downloads their files.
async fn report_projects(client: &Client, user: &User, download_dir: Option<PathBuf>) -> Result<()> {
    let summaries = Project::list_by_owner(client, &user.user_id).await?;
    println!("{} projects found", summaries.len());

    for summary in summaries {
        println!("{summary}");
        if summary.id.is_empty() {
            continue;
        }

        let project = Project::from_id(client, &summary.id).await?;
        println!("{project}");

        let Some(dir) = download_dir.as_ref() else {
            continue;
        };
        for file in &project.embedded.project_files {
            let downloaded = file.download(client, dir).await?;
            println!(
                "{} bytes downloaded and stored in {}",
                downloaded.bytes_written,
                downloaded.path.display()
            );
        }
    }
    Ok(())
}

// main
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // The client ID/secret is created in the REX portal.
    // REX_BASE_URL switches to another REX installation.
    let client_id = std::env::var("REX_CLIENT_ID")?;
    let client_secret = std::env::var("REX_CLIENT_SECRET")?;
    let download_dir = std::env::var("REX_DOWNLOAD_DIR").ok().map(PathBuf::from);

    let mut client = Client::new(Config::from_env()?);
    let user = client.login(&client_id, &client_secret).await?;
    println!("{user}");

    report_projects(&client, &user, download_dir).await
}
