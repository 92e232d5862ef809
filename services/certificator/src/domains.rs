//! Domain list resolution.
//!
//! An explicit comma-separated list wins over the domains file; when it is
//! used the file is not read at all.

use crate::error::ConfigError;
use std::path::Path;

/// Where the domain list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSource {
    /// Parsed from `CERTIFICATOR_DOMAINS_LIST`.
    Explicit(Vec<String>),
    /// Loaded from the domains file, entries kept verbatim.
    FromFile(Vec<String>),
}

impl DomainSource {
    /// The domains, whichever source won.
    #[must_use]
    pub fn domains(&self) -> &[String] {
        match self {
            Self::Explicit(domains) | Self::FromFile(domains) => domains,
        }
    }

    /// Whether the explicit list won.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Split into the `(domains, domains_list)` pair stored on the config.
    #[must_use]
    pub fn into_fields(self) -> (Vec<String>, Option<Vec<String>>) {
        match self {
            Self::Explicit(domains) => (domains.clone(), Some(domains)),
            Self::FromFile(domains) => (domains, None),
        }
    }
}

/// Split a comma-separated list, trimming each entry.
///
/// Order and entry count are preserved, so `"a.com,,b.com"` yields an empty
/// middle entry.
#[must_use]
pub fn split_domain_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Load a YAML sequence of domain entries.
///
/// An empty file yields an empty list. Compound entries such as
/// `"a.com,www.a.com"` are returned unchanged.
///
/// # Errors
///
/// [`ConfigError::DomainsFileUnreadable`] on I/O failure,
/// [`ConfigError::DomainsFileMalformed`] when the content is not a list of strings.
pub fn load_domains_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| ConfigError::DomainsFileUnreadable {
            path: path.display().to_string(),
            source,
        })?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::DomainsFileMalformed {
        path: path.display().to_string(),
        source,
    })
}

/// Pick the domain list: `list_override` when non-empty, the file otherwise.
///
/// # Errors
///
/// Propagates [`load_domains_file`] errors when the file is consulted.
pub fn resolve_domains(
    list_override: Option<&str>,
    domains_file: &str,
) -> Result<DomainSource, ConfigError> {
    match list_override.filter(|raw| !raw.is_empty()) {
        Some(raw) => Ok(DomainSource::Explicit(split_domain_list(raw))),
        None => load_domains_file(Path::new(domains_file)).map(DomainSource::FromFile),
    }
}

/// Split a file entry such as `"a.com,www.a.com"` into its names.
///
/// The first name is the one certificates are stored under.
#[must_use]
pub fn domain_group(entry: &str) -> Vec<String> {
    split_domain_list(entry)
}
