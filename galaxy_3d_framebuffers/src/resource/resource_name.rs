/// Namespaced resource identifier.
///
/// A `ResourceName` is a `namespace:path` pair used as the key for
/// framebuffer definitions, live framebuffers and static membership.
/// Names are validated once at construction and are immutable afterwards.

use std::fmt;
use std::str::FromStr;
use crate::error::{Error, Result};

/// Namespace used by [`ResourceName::parse`] when the input has no `:`
pub const DEFAULT_NAMESPACE: &str = "galaxy3d";

/// Namespace used by [`ResourceName::parse_framebuffer`] for bare names
pub const TEMP_NAMESPACE: &str = "temp";

/// Namespaced identifier (`namespace:path`)
///
/// Two names are equal iff both namespace and path are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName {
    namespace: String,
    path: String,
}

fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl ResourceName {
    /// Create a name from its two parts
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResourceName` if either part is empty or
    /// contains characters outside `[a-z0-9_.-]` (`/` is also allowed in
    /// the path).
    pub fn new(namespace: &str, path: &str) -> Result<Self> {
        if namespace.is_empty() {
            return Err(Error::InvalidResourceName(format!(
                "empty namespace in '{}:{}'", namespace, path
            )));
        }
        if path.is_empty() {
            return Err(Error::InvalidResourceName(format!(
                "empty path in '{}:{}'", namespace, path
            )));
        }
        if let Some(c) = namespace.chars().find(|c| !valid_namespace_char(*c)) {
            return Err(Error::InvalidResourceName(format!(
                "non [a-z0-9_.-] character '{}' in namespace of '{}:{}'", c, namespace, path
            )));
        }
        if let Some(c) = path.chars().find(|c| !valid_path_char(*c)) {
            return Err(Error::InvalidResourceName(format!(
                "non [a-z0-9/._-] character '{}' in path of '{}:{}'", c, namespace, path
            )));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Name built from compile-time constants known to be valid
    pub(crate) fn from_static(namespace: &'static str, path: &'static str) -> Self {
        debug_assert!(Self::new(namespace, path).is_ok(), "invalid built-in name {}:{}", namespace, path);
        Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        }
    }

    /// Parse `namespace:path`, or a bare `path` in [`DEFAULT_NAMESPACE`]
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_default(text, DEFAULT_NAMESPACE)
    }

    /// Parse a framebuffer reference
    ///
    /// Bare names (no `:`) are scratch framebuffers and land in
    /// [`TEMP_NAMESPACE`]; qualified names parse as usual.
    pub fn parse_framebuffer(text: &str) -> Result<Self> {
        Self::parse_with_default(text, TEMP_NAMESPACE)
    }

    fn parse_with_default(text: &str, default_namespace: &str) -> Result<Self> {
        match text.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(default_namespace, text),
        }
    }

    /// Get the namespace part
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the path part
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Inverse of [`parse_framebuffer`](Self::parse_framebuffer)
    ///
    /// Names in [`TEMP_NAMESPACE`] are written as their bare path.
    pub fn to_framebuffer_string(&self) -> String {
        if self.namespace == TEMP_NAMESPACE {
            self.path.clone()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "resource_name_tests.rs"]
mod tests;
