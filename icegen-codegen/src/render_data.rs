//! Render data: the template context rebuilt on every render pass.

use std::{fmt, path::Path, sync::Arc};

use globset::{Glob, GlobMatcher};
use icegen_core::{format_path, relative_path};
use serde_json::{Map, Value};

/// Template context, keyed by top-level variable name.
pub type RenderData = Map<String, Value>;

/// Project-relative path of the static app manifest.
pub const STATIC_CONFIG_PATH: &str = "src/manifest.json";

/// Global stylesheet candidates, relative to `src/`.
pub const GLOBAL_STYLE_GLOB: &str = "global.{scss,less,styl,css}";

/// Priority of global stylesheet extensions when several exist.
const GLOBAL_STYLE_EXTENSIONS: [&str; 4] = ["scss", "less", "styl", "css"];

/// A registered render-data transform.
///
/// Receives the current data and returns its complete replacement.
pub type RenderDataTransform = Box<dyn Fn(RenderData) -> RenderData>;

/// Per-template data layered over the shared render data.
#[derive(Clone, Default)]
pub enum ExtraData {
    /// No extra data: the template sees the render data unchanged.
    #[default]
    None,
    /// Merged over the render data, replacing keys it shares.
    Static(RenderData),
    /// Computed from the render data right before the file is rendered.
    /// The returned map is the whole template context.
    Computed(Arc<dyn Fn(&RenderData) -> RenderData>),
}

impl ExtraData {
    /// Build computed extra data from a closure.
    pub fn computed(f: impl Fn(&RenderData) -> RenderData + 'static) -> Self {
        ExtraData::Computed(Arc::new(f))
    }

    /// Resolve the template context for one file.
    pub fn resolve(&self, data: &RenderData) -> RenderData {
        match self {
            ExtraData::None => data.clone(),
            ExtraData::Static(extra) => {
                let mut merged = data.clone();
                merged.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
                merged
            }
            ExtraData::Computed(f) => f(data),
        }
    }
}

impl From<RenderData> for ExtraData {
    fn from(data: RenderData) -> Self {
        if data.is_empty() {
            ExtraData::None
        } else {
            ExtraData::Static(data)
        }
    }
}

impl fmt::Debug for ExtraData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraData::None => write!(f, "None"),
            ExtraData::Static(data) => f.debug_tuple("Static").field(data).finish(),
            ExtraData::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// `"src/manifest.json"` when the project has one, `false` otherwise.
pub fn discover_static_config(root: &Path) -> Value {
    if root.join(STATIC_CONFIG_PATH).is_file() {
        Value::String(STATIC_CONFIG_PATH.to_string())
    } else {
        Value::Bool(false)
    }
}

/// Path of the project's global stylesheet relative to `<target>/core`,
/// or `false` when there is none.
///
/// When several candidates exist the first in `scss, less, styl, css`
/// order wins.
pub fn discover_global_style(root: &Path, target_dir: &Path) -> Value {
    let Ok(glob) = Glob::new(GLOBAL_STYLE_GLOB) else {
        return Value::Bool(false);
    };
    let matcher = glob.compile_matcher();

    match find_global_style(&root.join("src"), &matcher) {
        Some(style) => {
            let core_dir = root.join(target_dir).join("core");
            Value::String(format_path(&relative_path(&core_dir, &style)))
        }
        None => Value::Bool(false),
    }
}

fn find_global_style(src_dir: &Path, matcher: &GlobMatcher) -> Option<std::path::PathBuf> {
    let mut found: Vec<std::path::PathBuf> = std::fs::read_dir(src_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .collect();

    found.sort_by_key(|path| {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        GLOBAL_STYLE_EXTENSIONS
            .iter()
            .position(|candidate| *candidate == ext)
            .unwrap_or(GLOBAL_STYLE_EXTENSIONS.len())
    });
    found.into_iter().next()
}
