/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::RexError;
use url::Url;

// Root REX cloud services
pub const DEFAULT_BASE_URL: &str = "https://rex.robotic-eyes.com";

/// Environment variable consulted by [`Config::from_env`]
pub const BASE_URL_ENV: &str = "REX_BASE_URL";

/// Connection settings shared by every request of a [`crate::v2::Client`].
///
/// Endpoint paths are joined onto `base_url`, so it should only name the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Url,
}

impl Config {
    /// Creates a configuration pointing at the given host
    pub fn new(base_url: &str) -> Result<Self, RexError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Reads the base url from `REX_BASE_URL`, using the REX cloud when unset
    pub fn from_env() -> Result<Self, RexError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => Self::new(&base_url),
            _ => Ok(Self::default()),
        }
    }

    /// Resolves an absolute API path (e.g. `/api/v2/users`) against the base url
    pub fn endpoint(&self, path: &str) -> Result<Url, RexError> {
        resolve_path(&self.base_url, path)
    }
}

// Absolute paths replace whatever path the base url carries
pub(crate) fn resolve_path(base_url: &Url, path: &str) -> Result<Url, RexError> {
    Ok(base_url.join(path)?)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
        }
    }
}
