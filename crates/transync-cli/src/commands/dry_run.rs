use crate::utils::ui;
use transync_core::WrittenFile;

/// Difference between a translation file on disk and its merged content.
#[derive(Debug, Clone)]
pub struct DryRunDiff {
    before: String,
    after: String,
}

impl DryRunDiff {
    pub fn new(before: String, after: String) -> Self {
        Self { before, after }
    }

    /// A file that does not exist yet diffs against the empty string.
    pub fn of(file: &WrittenFile) -> Self {
        Self::new(file.before.clone().unwrap_or_default(), file.after.clone())
    }

    pub fn print(&self) {
        ui::print_diff(&self.before, &self.after);
    }
}
