//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod output;
mod preview;
mod render;

pub use check::CheckReport;
pub use output::{Output, Report, TerminalOutput};
pub use preview::{PreviewReport, QueuedFile};
pub use render::RenderSummary;
