//! Path helpers for generated files.

use std::path::{Component, Path, PathBuf};

/// Render a path with forward slashes, for use inside generated source.
pub fn format_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Compute the path of `to` relative to the directory `from`.
///
/// Both paths must be of the same kind (both absolute or both relative to
/// the same base). Neither path is touched on disk.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = normalized(from);
    let to: Vec<Component> = normalized(to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for component in &to[common..] {
        result.push(component.as_os_str());
    }
    result
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    let mut out = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(out.last(), Some(Component::Normal(_))) => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Whether the final component of `path` has an extension.
pub fn has_extension(path: &Path) -> bool {
    path.extension().is_some()
}

/// Whether `path` ends in `.{ext}`.
pub fn is_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Drop a trailing `.{ext}` from `path`, leaving other paths unchanged.
///
/// `core/index.ts.tera` becomes `core/index.ts`.
pub fn strip_extension(path: &Path, ext: &str) -> PathBuf {
    if is_extension(path, ext) {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(Path::new("src/global.css")), "src/global.css");
        assert_eq!(
            format_path(Path::new("..\\..\\src\\global.css")),
            "../../src/global.css"
        );
    }

    #[test]
    fn test_relative_path_sibling_tree() {
        let rel = relative_path(
            Path::new("/app/.ice/core"),
            Path::new("/app/src/global.scss"),
        );
        assert_eq!(format_path(&rel), "../../src/global.scss");
    }

    #[test]
    fn test_relative_path_descendant() {
        let rel = relative_path(Path::new("/app"), Path::new("/app/src/app.tsx"));
        assert_eq!(format_path(&rel), "src/app.tsx");
    }

    #[test]
    fn test_relative_path_ignores_cur_dir() {
        let rel = relative_path(Path::new("./.ice/core"), Path::new("src/global.css"));
        assert_eq!(format_path(&rel), "../../src/global.css");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(
            strip_extension(Path::new(".ice/index.ts.tera"), "tera"),
            PathBuf::from(".ice/index.ts")
        );
        assert_eq!(
            strip_extension(Path::new(".ice/logo.png"), "tera"),
            PathBuf::from(".ice/logo.png")
        );
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("templates/index.ts.tera")));
        assert!(!has_extension(Path::new("templates/core")));
    }
}
