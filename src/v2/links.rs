/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Hyperlinks embedded in REX responses (`_links.<rel>.href`).
//!
//! REX does not hand out ids for most resources. The client has to follow the links of one
//! response to make the next call, and reads ids back out of them where needed.

use serde::{Deserialize, Serialize};
use url::Url;

// Only used to resolve relative hrefs, never requested
const RELATIVE_BASE: &str = "http://localhost/";

/// A single hyperlink of a resource
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub href: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

impl Link {
    /// The href with any URI template suffix removed
    pub fn url(&self) -> &str {
        strip_template(&self.href)
    }
}

/// Removes a URI template suffix such as `{?projection}` from an href.
pub fn strip_template(href: &str) -> &str {
    match href.find('{') {
        Some(idx) => &href[..idx],
        None => href,
    }
}

/// Returns the path segment following `collection` in the href.
///
/// `resource_id("https://rex.robotic-eyes.com/api/v2/projects/1020", "projects")` is `1020`.
/// Query strings, fragments and URI templates are ignored. `None` when the collection
/// segment is absent or not followed by a non-empty segment.
pub fn resource_id(href: &str, collection: &str) -> Option<String> {
    let href = strip_template(href.trim());
    if href.is_empty() || collection.is_empty() {
        return None;
    }

    let url = Url::parse(href)
        .or_else(|_| Url::parse(RELATIVE_BASE).and_then(|base| base.join(href)))
        .ok()?;

    let mut segments = url.path_segments()?;
    segments.position(|segment| segment == collection)?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
