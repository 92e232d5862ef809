//! Deployment environment tag.

use std::{convert::Infallible, fmt, str::FromStr};

/// Deployment environment the process runs in.
///
/// Only `dev` changes behaviour. Unknown tags are kept verbatim rather than
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Production
    #[default]
    Prod,
    /// Local development against a dev-mode Vault
    Dev,
    /// Test
    Test,
    /// Any other tag
    Other(String),
}

impl Environment {
    /// The configuration tag for this environment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Prod => "prod",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this is the dev environment.
    #[must_use]
    pub const fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Environment {
    fn from(tag: &str) -> Self {
        match tag {
            "prod" => Self::Prod,
            "dev" => Self::Dev,
            "test" => Self::Test,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for env in [Environment::Prod, Environment::Dev, Environment::Test] {
            assert_eq!(Environment::from(env.as_str()), env);
        }
    }

    #[test]
    fn test_unknown_tags_are_kept() {
        let env = Environment::from("staging");
        assert_eq!(env, Environment::Other("staging".to_string()));
        assert_eq!(env.to_string(), "staging");
        assert!(!env.is_dev());
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(
            "DEV".parse::<Environment>(),
            Ok(Environment::Other("DEV".to_string()))
        );
        assert!(!Environment::from("DEV").is_dev());
    }

    #[test]
    fn test_default_is_prod() {
        assert_eq!(Environment::default(), Environment::Prod);
    }
}
