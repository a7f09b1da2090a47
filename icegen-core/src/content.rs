//! Content types and registration positions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export categories the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ContentType {
    /// Runtime exports of the framework entry (`framework`).
    #[serde(rename = "framework")]
    Framework,
    /// Type-only exports of the framework entry (`frameworkTypes`).
    #[serde(rename = "frameworkTypes")]
    FrameworkTypes,
    /// Type-only exports merged into the app config type (`configTypes`).
    #[serde(rename = "configTypes")]
    ConfigTypes,
}

impl ContentType {
    /// Every content type, in render order.
    pub const ALL: [ContentType; 3] = [
        ContentType::Framework,
        ContentType::FrameworkTypes,
        ContentType::ConfigTypes,
    ];

    /// Returns the content type identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Framework => "framework",
            ContentType::FrameworkTypes => "frameworkTypes",
            ContentType::ConfigTypes => "configTypes",
        }
    }

    /// Whether exports of this type render into a type-only context.
    pub fn is_types(&self) -> bool {
        self.as_str().ends_with("Types")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown content type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid content type '{0}', expected one of: framework, frameworkTypes, configTypes")]
pub struct InvalidContentType(pub String);

impl FromStr for ContentType {
    type Err = InvalidContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| InvalidContentType(s.to_string()))
    }
}

/// Placement of a registration relative to the base entries of a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Before => "before",
            Position::After => "after",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid position '{0}', use before|after")]
pub struct InvalidPosition(pub String);

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Position::Before),
            "after" => Ok(Position::After),
            _ => Err(InvalidPosition(s.to_string())),
        }
    }
}

/// Key of one registration list: a content type plus an optional position.
///
/// Duplicate detection is scoped to an exact key, so `framework` and
/// `framework_before` hold independent lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationKey {
    pub content_type: ContentType,
    pub position: Option<Position>,
}

impl RegistrationKey {
    pub fn new(content_type: ContentType, position: Option<Position>) -> Self {
        Self {
            content_type,
            position,
        }
    }

    /// Key of the unpositioned list for a content type.
    pub fn base(content_type: ContentType) -> Self {
        Self::new(content_type, None)
    }

    /// The three keys of a content type in composition order:
    /// before-entries, base entries, after-entries.
    pub fn composition_order(content_type: ContentType) -> [RegistrationKey; 3] {
        [
            Self::new(content_type, Some(Position::Before)),
            Self::base(content_type),
            Self::new(content_type, Some(Position::After)),
        ]
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}_{}", self.content_type, position),
            None => write!(f, "{}", self.content_type),
        }
    }
}
