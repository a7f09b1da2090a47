//! Export descriptors contributed by plugins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One export to splice into the generated runtime entry.
///
/// # Example
///
/// ```
/// use icegen_core::ExportDescriptor;
///
/// let auth = ExportDescriptor::named("defineAuthConfig").from("@ice/plugin-auth/types");
/// assert_eq!(auth.identity(), Some("defineAuthConfig"));
///
/// let all = ExportDescriptor::reexport("./runtime");
/// assert_eq!(all.identity(), Some("./runtime"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDescriptor {
    /// Local binding (or re-export specifier) used instead of the export name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_members: Option<Vec<String>>,
    /// Module path used in import and re-export statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Name under which the value is re-exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
}

impl ExportDescriptor {
    /// An export re-exported under `export_name`.
    pub fn named(export_name: impl Into<String>) -> Self {
        Self {
            export_name: Some(export_name.into()),
            ..Self::default()
        }
    }

    /// A wildcard (or specifier) re-export of a whole module.
    pub fn reexport(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Import the value from `source`.
    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Bind or re-export under `specifier`.
    pub fn specifier(mut self, specifier: impl Into<String>) -> Self {
        self.specifier = Some(specifier.into());
        self
    }

    pub fn import_source(mut self, import_source: impl Into<String>) -> Self {
        self.import_source = Some(import_source.into());
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.export_members = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Resolved identity: `exportName`, else `specifier`, else `source`.
    pub fn identity(&self) -> Option<&str> {
        self.export_name
            .as_deref()
            .or(self.specifier.as_deref())
            .or(self.source.as_deref())
    }

    /// The local name bound by the generated import, if any.
    pub fn binding(&self) -> Option<&str> {
        self.specifier.as_deref().or(self.export_name.as_deref())
    }

    /// Name matched by removal: `exportName`, or `specifier` when absent.
    pub fn removal_name(&self) -> Option<&str> {
        self.export_name.as_deref().or(self.specifier.as_deref())
    }

    /// Whether two descriptors would collide inside one registration list.
    ///
    /// They collide when they resolve to the same identity, or when they
    /// bind the same local name.
    pub fn conflicts_with(&self, other: &ExportDescriptor) -> bool {
        let same =
            |a: Option<&str>, b: Option<&str>| matches!((a, b), (Some(a), Some(b)) if a == b);
        same(self.identity(), other.identity()) || same(self.binding(), other.binding())
    }
}

impl fmt::Display for ExportDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(name) = &self.export_name {
            parts.push(format!("exportName: {}", name));
        }
        if let Some(specifier) = &self.specifier {
            parts.push(format!("specifier: {}", specifier));
        }
        if let Some(source) = &self.source {
            parts.push(format!("source: {}", source));
        }
        if parts.is_empty() {
            write!(f, "empty export")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_precedence() {
        let full = ExportDescriptor::named("Link")
            .from("./router")
            .specifier("RouterLink");
        assert_eq!(full.identity(), Some("Link"));
        assert_eq!(full.binding(), Some("RouterLink"));

        let aliased = ExportDescriptor::reexport("./router").specifier("{ Link }");
        assert_eq!(aliased.identity(), Some("{ Link }"));

        let wildcard = ExportDescriptor::reexport("./router");
        assert_eq!(wildcard.identity(), Some("./router"));
        assert_eq!(wildcard.binding(), None);
    }

    #[test]
    fn test_conflicts_on_export_name() {
        let a = ExportDescriptor::named("request").from("./request");
        let b = ExportDescriptor::named("request").from("./other");
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_conflicts_on_binding() {
        let a = ExportDescriptor::named("useStore").from("./store").specifier("store");
        let b = ExportDescriptor::named("createStore").from("./store").specifier("store");
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_distinct_descriptors_do_not_conflict() {
        let a = ExportDescriptor::named("a").from("./a");
        let b = ExportDescriptor::named("b");
        let c = ExportDescriptor::reexport("./c");
        assert!(!a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
        assert!(!b.conflicts_with(&c));
    }

    #[test]
    fn test_same_wildcard_source_conflicts() {
        let a = ExportDescriptor::reexport("./runtime");
        let b = ExportDescriptor::reexport("./runtime");
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_display() {
        let d = ExportDescriptor::named("a").from("./a");
        assert_eq!(d.to_string(), "exportName: a, source: ./a");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let d: ExportDescriptor = serde_json::from_str(
            r#"{"exportName": "defineConfig", "source": "./config", "exportMembers": ["a"]}"#,
        )
        .unwrap();
        assert_eq!(d.export_name.as_deref(), Some("defineConfig"));
        assert_eq!(d.export_members, Some(vec!["a".to_string()]));
    }
}
