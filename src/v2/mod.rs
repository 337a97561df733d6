/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod links;
mod parsers;
pub mod project;
pub mod project_file;
pub mod properties;
pub mod reference;
pub mod user;

pub use api::*;
pub use auth::*;
pub use client::*;
pub use config::*;
pub use errors::*;
pub use links::Link;
pub use project::*;
pub use project_file::*;
pub use properties::*;
pub use reference::*;
pub use user::*;
