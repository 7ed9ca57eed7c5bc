//! Jira REST API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which REST
//! API mount the client talks to. The version determines the suffix that is
//! appended to the context path to form the REST base path.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Jira REST API version.
///
/// # Example
///
/// ```rust
/// use jira_api::ApiVersion;
///
/// assert_eq!(ApiVersion::V2.rest_path(), "/rest/api/2");
///
/// let version: ApiVersion = "latest".parse().unwrap();
/// assert_eq!(version, ApiVersion::Latest);
///
/// let agile: ApiVersion = "/rest/agile/1.0".parse().unwrap();
/// assert_eq!(agile.rest_path(), "/rest/agile/1.0");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// REST API version 2 (`/rest/api/2`).
    #[default]
    V2,
    /// REST API version 3 (`/rest/api/3`).
    V3,
    /// Whatever the server considers latest (`/rest/api/latest`).
    Latest,
    /// A custom REST mount such as `/rest/agile/1.0`.
    Custom(String),
}

impl ApiVersion {
    /// Returns the REST base path suffix for this version.
    #[must_use]
    pub fn rest_path(&self) -> &str {
        match self {
            Self::V2 => "/rest/api/2",
            Self::V3 => "/rest/api/3",
            Self::Latest => "/rest/api/latest",
            Self::Custom(path) => path,
        }
    }

    /// Returns `true` for the built-in versions.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => f.write_str("2"),
            Self::V3 => f.write_str("3"),
            Self::Latest => f.write_str("latest"),
            Self::Custom(path) => f.write_str(path),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.to_lowercase().as_str() {
            "2" | "/rest/api/2" => Ok(Self::V2),
            "3" | "/rest/api/3" => Ok(Self::V3),
            "latest" | "/rest/api/latest" => Ok(Self::Latest),
            _ => {
                if Self::is_valid_rest_path(s) {
                    Ok(Self::Custom(s.trim_end_matches('/').to_string()))
                } else {
                    Err(ConfigError::InvalidApiVersion {
                        version: s.to_string(),
                    })
                }
            }
        }
    }
}

impl ApiVersion {
    fn is_valid_rest_path(s: &str) -> bool {
        s.starts_with("/rest/")
            && s.len() > "/rest/".len()
            && !s.chars().any(|c| c.is_whitespace() || matches!(c, '?' | '#'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("3".parse::<ApiVersion>().unwrap(), ApiVersion::V3);
        assert_eq!("LATEST".parse::<ApiVersion>().unwrap(), ApiVersion::Latest);
        assert_eq!(
            "/rest/api/2".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2
        );
    }

    #[test]
    fn test_api_version_parses_custom_rest_paths() {
        let version: ApiVersion = "/rest/agile/1.0/".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("/rest/agile/1.0".to_string()));
        assert!(!version.is_builtin());
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        assert!(matches!(
            "4".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
        assert!("/rest/".parse::<ApiVersion>().is_err());
        assert!("rest/api/2".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_default_is_v2() {
        assert_eq!(ApiVersion::default().rest_path(), "/rest/api/2");
    }

    #[test]
    fn test_display_round_trips() {
        for version in [ApiVersion::V2, ApiVersion::V3, ApiVersion::Latest] {
            let parsed: ApiVersion = version.to_string().parse().unwrap();
            assert_eq!(parsed, version);
        }
    }
}
