//! CLI command implementations.

mod auto_translate;
mod common;
mod dry_run;
mod export;
mod import;
mod overview;

pub use auto_translate::{AutoTranslateArgs, run_auto_translate};
pub use common::{Project, ProjectArgs, render_write_report};
pub use dry_run::DryRunDiff;
pub use export::{ExportArgs, run_export};
pub use import::{ImportArgs, run_import};
pub use overview::run_overview;
