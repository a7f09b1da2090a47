//! Export registry: per registration key, the ordered content plugins add.
//!
//! Each [`RegistrationKey`] owns an independent list. Duplicate detection
//! runs against the exact key being appended to, so a descriptor added to
//! `framework_before` never conflicts with one in `framework`.

use icegen_core::{ContentType, ExportDescriptor, Position, RegistrationKey};
use indexmap::IndexMap;
use serde_json::Value;

use crate::{Error, Result};

/// One entry of a registration list.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEntry {
    /// An export spliced into the generated entry.
    Export(ExportDescriptor),
    /// An arbitrary record exposed to templates unchanged.
    Record(Value),
}

impl ContentEntry {
    pub fn as_export(&self) -> Option<&ExportDescriptor> {
        match self {
            ContentEntry::Export(export) => Some(export),
            ContentEntry::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Value> {
        match self {
            ContentEntry::Export(_) => None,
            ContentEntry::Record(record) => Some(record),
        }
    }
}

/// Parse a registration key from its string form, e.g. `"framework"` and
/// `Some("before")`.
pub fn parse_key(content_type: &str, position: Option<&str>) -> Result<RegistrationKey> {
    let content_type: ContentType = content_type.parse()?;
    let position: Option<Position> = position.map(str::parse).transpose()?;
    Ok(RegistrationKey::new(content_type, position))
}

/// Registration lists keyed by content type and position.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    lists: IndexMap<RegistrationKey, Vec<ContentEntry>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append export descriptors to `key`.
    ///
    /// The whole batch is checked first, against the existing list and
    /// against itself. On conflict nothing is appended.
    pub fn add_exports(
        &mut self,
        key: RegistrationKey,
        descriptors: impl IntoIterator<Item = ExportDescriptor>,
    ) -> Result<()> {
        let descriptors: Vec<ExportDescriptor> = descriptors.into_iter().collect();
        let existing: Vec<&ExportDescriptor> = self.exports(key).collect();

        for (index, candidate) in descriptors.iter().enumerate() {
            let earlier_in_batch = descriptors[..index].iter();
            if existing
                .iter()
                .copied()
                .chain(earlier_in_batch)
                .any(|current| current.conflicts_with(candidate))
            {
                return Err(Error::DuplicateExport {
                    key,
                    identity: candidate.identity().unwrap_or_default().to_string(),
                    descriptor: candidate.to_string(),
                });
            }
        }

        self.lists
            .entry(key)
            .or_default()
            .extend(descriptors.into_iter().map(ContentEntry::Export));
        Ok(())
    }

    /// Append arbitrary records to `key`. Records are never deduplicated.
    pub fn add_records(&mut self, key: RegistrationKey, records: impl IntoIterator<Item = Value>) {
        self.lists
            .entry(key)
            .or_default()
            .extend(records.into_iter().map(ContentEntry::Record));
    }

    /// Remove exports of `key` whose removal name matches any of `names`.
    ///
    /// Returns how many entries were removed; unknown names are ignored.
    pub fn remove_exports<I>(&mut self, key: RegistrationKey, names: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        let Some(list) = self.lists.get_mut(&key) else {
            return 0;
        };

        let before = list.len();
        list.retain(|entry| match entry {
            ContentEntry::Export(export) => !export
                .removal_name()
                .is_some_and(|name| names.iter().any(|n| n == name)),
            ContentEntry::Record(_) => true,
        });
        before - list.len()
    }

    /// All entries registered under exactly `key`.
    pub fn entries(&self, key: RegistrationKey) -> &[ContentEntry] {
        self.lists.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Export descriptors registered under exactly `key`.
    pub fn exports(&self, key: RegistrationKey) -> impl Iterator<Item = &ExportDescriptor> {
        self.entries(key).iter().filter_map(ContentEntry::as_export)
    }

    /// Exports of a content type in composition order: before, base, after.
    pub fn composed_exports(&self, content_type: ContentType) -> Vec<&ExportDescriptor> {
        RegistrationKey::composition_order(content_type)
            .into_iter()
            .flat_map(|key| self.exports(key))
            .collect()
    }

    /// Records of a content type in composition order: before, base, after.
    pub fn composed_records(&self, content_type: ContentType) -> Vec<&Value> {
        RegistrationKey::composition_order(content_type)
            .into_iter()
            .flat_map(|key| self.entries(key).iter().filter_map(ContentEntry::as_record))
            .collect()
    }

    /// Total number of entries across every key.
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn base(content_type: ContentType) -> RegistrationKey {
        RegistrationKey::base(content_type)
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(
            parse_key("frameworkTypes", Some("after")).unwrap(),
            RegistrationKey::new(ContentType::FrameworkTypes, Some(Position::After))
        );
        assert_eq!(parse_key("configTypes", None).unwrap(), base(ContentType::ConfigTypes));
    }

    #[test]
    fn test_parse_key_rejects_unknown_names() {
        let err = parse_key("frameworks", None).unwrap_err();
        assert!(matches!(err, Error::InvalidContentType(_)));

        let err = parse_key("framework", Some("middle")).unwrap_err();
        assert!(matches!(err, Error::InvalidPosition(_)));
    }

    #[test]
    fn test_add_exports_preserves_order() {
        let mut registry = ContentRegistry::new();
        let key = base(ContentType::Framework);
        registry
            .add_exports(key, [ExportDescriptor::named("a").from("./a")])
            .unwrap();
        registry
            .add_exports(
                key,
                [ExportDescriptor::named("b"), ExportDescriptor::reexport("./c")],
            )
            .unwrap();

        let ids: Vec<_> = registry.exports(key).filter_map(|e| e.identity()).collect();
        assert_eq!(ids, vec!["a", "b", "./c"]);
    }

    #[test]
    fn test_duplicate_export_name_fails() {
        let mut registry = ContentRegistry::new();
        let key = base(ContentType::Framework);
        registry
            .add_exports(key, [ExportDescriptor::named("request").from("./request")])
            .unwrap();

        let err = registry
            .add_exports(key, [ExportDescriptor::named("request").from("./fetch")])
            .unwrap_err();

        match err {
            Error::DuplicateExport { key: k, identity, .. } => {
                assert_eq!(k, key);
                assert_eq!(identity, "request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_inside_batch_appends_nothing() {
        let mut registry = ContentRegistry::new();
        let key = base(ContentType::FrameworkTypes);

        let result = registry.add_exports(
            key,
            [
                ExportDescriptor::named("x").from("./x"),
                ExportDescriptor::named("y").from("./y"),
                ExportDescriptor::named("x").from("./z"),
            ],
        );

        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_same_name_different_content_types() {
        let mut registry = ContentRegistry::new();
        let descriptor = ExportDescriptor::named("Config").from("./types");
        registry
            .add_exports(base(ContentType::FrameworkTypes), [descriptor.clone()])
            .unwrap();
        registry
            .add_exports(base(ContentType::ConfigTypes), [descriptor])
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_detection_is_per_exact_key() {
        let mut registry = ContentRegistry::new();
        let before = RegistrationKey::new(ContentType::Framework, Some(Position::Before));
        registry
            .add_exports(before, [ExportDescriptor::named("a")])
            .unwrap();
        registry
            .add_exports(base(ContentType::Framework), [ExportDescriptor::named("a")])
            .unwrap();
        assert_eq!(registry.composed_exports(ContentType::Framework).len(), 2);
    }

    #[test]
    fn test_remove_exports() {
        let mut registry = ContentRegistry::new();
        let key = base(ContentType::Framework);
        registry
            .add_exports(
                key,
                [
                    ExportDescriptor::named("a").from("./a"),
                    ExportDescriptor::reexport("./b").specifier("B"),
                    ExportDescriptor::named("c"),
                ],
            )
            .unwrap();

        assert_eq!(registry.remove_exports(key, ["a", "B"]), 2);
        let ids: Vec<_> = registry.exports(key).filter_map(|e| e.identity()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_remove_missing_name_is_noop() {
        let mut registry = ContentRegistry::new();
        let key = base(ContentType::Framework);
        registry
            .add_exports(key, [ExportDescriptor::named("a")])
            .unwrap();

        assert_eq!(registry.remove_exports(key, ["missing"]), 0);
        assert_eq!(
            registry.remove_exports(base(ContentType::ConfigTypes), ["a"]),
            0
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_composed_order() {
        let mut registry = ContentRegistry::new();
        let ct = ContentType::Framework;
        registry
            .add_exports(
                RegistrationKey::new(ct, Some(Position::After)),
                [ExportDescriptor::named("last")],
            )
            .unwrap();
        registry
            .add_exports(base(ct), [ExportDescriptor::named("middle")])
            .unwrap();
        registry
            .add_exports(
                RegistrationKey::new(ct, Some(Position::Before)),
                [ExportDescriptor::named("first")],
            )
            .unwrap();

        let ids: Vec<_> = registry
            .composed_exports(ct)
            .into_iter()
            .filter_map(|e| e.identity())
            .collect();
        assert_eq!(ids, vec!["first", "middle", "last"]);
    }

    #[test]
    fn test_records_are_kept_apart_from_exports() {
        let mut registry = ContentRegistry::new();
        let key = base(ContentType::ConfigTypes);
        registry.add_records(key, [json!({"snippet": "a"}), json!({"snippet": "a"})]);
        registry
            .add_exports(key, [ExportDescriptor::named("a")])
            .unwrap();

        assert_eq!(registry.entries(key).len(), 3);
        assert_eq!(registry.exports(key).count(), 1);
        assert_eq!(registry.composed_records(ContentType::ConfigTypes).len(), 2);
    }
}
