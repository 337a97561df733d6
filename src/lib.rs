/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # REX
//!
//! This library was created for working with the REX APIv2 interface. REX is a cloud-based
//! platform for building augmented reality applications.
//!
//! ## Features
//!
//! - OAuth2 client-credentials authentication
//! - User information
//!     - Current user, lookup by email or user id
//!     - Total number of registered users (admin only)
//! - Project information
//!     - List the projects of an owner
//!     - Full project details including files and references
//!     - Can create a project together with its root reference
//! - Project files
//!     - Can upload a file (reference, file record and content in one go)
//!     - Can download a file
//! - Lower level interface for handling the raw communication ([`v2::Executor`])
//!
//! *A client ID/secret pair is needed. It is created in the REX portal once your account
//! is activated.*
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rex::v2::{Client, Config, Project, RexError};
//!
//! async fn list_projects(client_id: &str, client_secret: &str) -> Result<(), RexError> {
//!     let mut client = Client::new(Config::default());
//!
//!     // Fetches the token and returns the user it belongs to
//!     let user = client.login(client_id, client_secret).await?;
//!
//!     for summary in Project::list_by_owner(&client, &user.user_id).await? {
//!         let project = Project::from_id(&client, &summary.id).await?;
//!         println!("{project}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Known limitations
//!
//! The multi step operations ([`v2::Project::create`], [`v2::ProjectFile::upload`]) stop at the
//! first failing call. Records created by the earlier calls stay on the server; removing them
//! is left to the caller.
pub mod v2;
