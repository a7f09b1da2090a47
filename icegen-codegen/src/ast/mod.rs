//! TypeScript statement builders used by the export renderer.

mod exports;
mod imports;

pub use exports::ReExport;
pub use imports::Import;
