//! Fully-qualified namespace names.

use crate::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Separator between the segments of a fully-qualified name.
pub const SEPARATOR: &str = "::";

/// A validated, fully-qualified namespace name such as `Admin::Users`.
///
/// Names are made of one or more segments joined by `::`. Every segment is
/// non-empty and contains neither whitespace nor `:`.
///
/// # Examples
///
/// ```rust
/// use namespace_watch::core::NamespaceName;
///
/// let name: NamespaceName = "Admin::Users".parse().unwrap();
/// assert_eq!(name.last_segment(), "Users");
/// assert_eq!(name.parent().unwrap().as_str(), "Admin");
/// assert!("Admin::".parse::<NamespaceName>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespaceName(String);

impl NamespaceName {
    /// Parse and validate a fully-qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidName`] if the name is empty, has an empty
    /// segment, or a segment contains whitespace or a stray `:`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The innermost segment (`Users` for `Admin::Users`).
    pub fn last_segment(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(idx) => &self.0[idx + SEPARATOR.len()..],
            None => &self.0,
        }
    }

    /// Whether the name has a single segment.
    pub fn is_top_level(&self) -> bool {
        !self.0.contains(SEPARATOR)
    }

    /// The enclosing namespace, or `None` for a top-level name.
    pub fn parent(&self) -> Option<NamespaceName> {
        self.0
            .rfind(SEPARATOR)
            .map(|idx| NamespaceName(self.0[..idx].to_string()))
    }

    /// Build the name of a namespace nested directly inside this one.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidName`] if `segment` is not a single
    /// valid segment.
    pub fn child(&self, segment: &str) -> Result<NamespaceName> {
        if segment.contains(SEPARATOR) {
            return Err(WatchError::invalid_name(
                segment,
                "child must be a single segment",
            ));
        }
        NamespaceName::new(format!("{}{}{}", self.0, SEPARATOR, segment))
    }
}

fn validate(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(WatchError::invalid_name(name, "name is empty"));
    }

    for segment in name.split(SEPARATOR) {
        if segment.is_empty() {
            return Err(WatchError::invalid_name(name, "empty segment"));
        }
        if segment.contains(':') {
            return Err(WatchError::invalid_name(name, "stray ':' in segment"));
        }
        if segment.chars().any(char::is_whitespace) {
            return Err(WatchError::invalid_name(name, "whitespace in segment"));
        }
    }

    Ok(())
}

impl FromStr for NamespaceName {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for NamespaceName {
    type Error = WatchError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NamespaceName {
    type Error = WatchError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NamespaceName> for String {
    fn from(name: NamespaceName) -> Self {
        name.0
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the registry look entries up by `&str` without allocating.
impl Borrow<str> for NamespaceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
