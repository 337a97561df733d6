/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::Deserialize;
use std::path::Path;

// Name used when the server does not suggest one
pub const DEFAULT_FILE_NAME: &str = "default.dat";

// Parses strings that may be "" or null and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

// Null lists are treated as empty
pub fn from_null_to_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let v: Option<Vec<T>> = Deserialize::deserialize(deserializer)?;
    Ok(v.unwrap_or_default())
}

/// Picks the file name out of a `Content-Disposition` header value.
///
/// Only the last path component of the suggested name is kept. Falls back to
/// [`DEFAULT_FILE_NAME`] when the header or its `filename` parameter is missing or empty.
pub fn file_name_from_content_disposition(header: Option<&str>) -> String {
    header
        .into_iter()
        .flat_map(|value| value.split(';'))
        .filter_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("filename")
                .then(|| value.trim().trim_matches('"'))
        })
        .filter_map(|name| Path::new(name).file_name()?.to_str())
        .map(str::to_string)
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}
