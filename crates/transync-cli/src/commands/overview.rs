//! Overview command: files, values and missing values per locale.

use crate::commands::{Project, ProjectArgs};
use crate::core::CliError;
use crate::utils::ui;
use transync_core::ValueStore;

/// Run the overview command.
pub fn run_overview(project: &ProjectArgs) -> Result<(), CliError> {
    let project = Project::open(project)?;

    ui::print_overview_header();

    let summaries = ValueStore::new(&project.index).overview(&project.default_locale)?;
    if summaries.is_empty() {
        ui::print_no_locales();
        return Ok(());
    }

    ui::print_overview(&summaries);
    Ok(())
}
