//! Export renderer: turns descriptor lists into source fragments.

use icegen_core::ExportDescriptor;
use serde::Serialize;

use crate::ast::{Import, ReExport};

/// Import and export fragments of one content type.
///
/// Serialized into render data as `{ "imports": ..., "exports": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportFragments {
    /// Import and re-export statements, one per line.
    pub imports: String,
    /// Names to splice into an export list, one per line.
    pub exports: String,
}

/// Render `exports` in list order.
///
/// With `type_only` set, imports are emitted as `import type`. An export
/// name is followed by `;` when its source mentions `types` (it lands in a
/// type body) and by `,` otherwise (it lands in an object or export list).
pub fn render_exports<'a>(
    exports: impl IntoIterator<Item = &'a ExportDescriptor>,
    type_only: bool,
) -> ExportFragments {
    let mut imports = Vec::new();
    let mut names = Vec::new();

    for export in exports {
        match (&export.export_name, &export.source) {
            (Some(name), Some(source)) => {
                let binding = export.specifier.as_deref().unwrap_or(name);
                imports.push(
                    Import::new(source)
                        .default(binding)
                        .type_only_if(type_only)
                        .build(),
                );
                let symbol = if source.contains("types") { ';' } else { ',' };
                names.push(format!("{name}{symbol}"));
            }
            (Some(name), None) => names.push(name.clone()),
            (None, Some(source)) => {
                let mut re_export = ReExport::new(source);
                if let Some(specifier) = &export.specifier {
                    re_export = re_export.specifier(specifier);
                }
                imports.push(re_export.build());
            }
            (None, None) => {}
        }
    }

    ExportFragments {
        imports: imports.join("\n"),
        exports: names.join("\n"),
    }
}

/// Render descriptors as plain imports: `import X from '...'` when a
/// specifier is present, a side-effect `import '...'` otherwise.
pub fn render_imports<'a>(exports: impl IntoIterator<Item = &'a ExportDescriptor>) -> String {
    exports
        .into_iter()
        .filter_map(|export| {
            let source = export.source.as_deref()?;
            let import = match &export.specifier {
                Some(specifier) => Import::new(source).default(specifier),
                None => Import::new(source),
            };
            Some(import.build())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_with_and_without_source() {
        let list = [
            ExportDescriptor::named("a").from("./a"),
            ExportDescriptor::named("b"),
        ];
        let fragments = render_exports(&list, false);
        assert_eq!(fragments.imports, "import a from './a';");
        assert_eq!(fragments.exports, "a,\nb");
    }

    #[test]
    fn test_types_source_uses_semicolon() {
        let list = [ExportDescriptor::named("AuthConfig").from("@ice/plugin-auth/types")];
        let fragments = render_exports(&list, true);
        assert_eq!(
            fragments.imports,
            "import type AuthConfig from '@ice/plugin-auth/types';"
        );
        assert_eq!(fragments.exports, "AuthConfig;");
    }

    #[test]
    fn test_specifier_is_import_binding() {
        let list = [ExportDescriptor::named("Link")
            .from("./router")
            .specifier("RouterLink")];
        let fragments = render_exports(&list, false);
        assert_eq!(fragments.imports, "import RouterLink from './router';");
        assert_eq!(fragments.exports, "Link,");
    }

    #[test]
    fn test_re_exports_go_to_import_fragment() {
        let list = [
            ExportDescriptor::reexport("./runtime"),
            ExportDescriptor::reexport("react-router-dom").specifier("{ Link }"),
        ];
        let fragments = render_exports(&list, false);
        assert_eq!(
            fragments.imports,
            "export * from './runtime';\nexport { Link } from 'react-router-dom';"
        );
        assert_eq!(fragments.exports, "");
    }

    #[test]
    fn test_interleaved_order_is_kept() {
        let list = [
            ExportDescriptor::reexport("./polyfill"),
            ExportDescriptor::named("a").from("./a"),
            ExportDescriptor::named("b").from("./b"),
        ];
        let fragments = render_exports(&list, false);
        assert_eq!(
            fragments.imports,
            "export * from './polyfill';\nimport a from './a';\nimport b from './b';"
        );
        assert_eq!(fragments.exports, "a,\nb,");
    }

    #[test]
    fn test_empty_list() {
        let fragments = render_exports(&[], false);
        assert_eq!(fragments, ExportFragments::default());
    }

    #[test]
    fn test_render_imports() {
        let list = [
            ExportDescriptor::reexport("./global.css"),
            ExportDescriptor::reexport("./store").specifier("store"),
            ExportDescriptor::named("noSource"),
        ];
        assert_eq!(
            render_imports(&list),
            "import './global.css';\nimport store from './store';"
        );
    }
}
