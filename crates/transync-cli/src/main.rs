use clap::{Parser, Subcommand};
use miette::Result as MietteResult;
use transync_cli::commands::{
    AutoTranslateArgs, ExportArgs, ImportArgs, ProjectArgs, run_auto_translate, run_export,
    run_import, run_overview,
};
use transync_cli::utils::ui;

#[derive(Parser)]
#[command(name = "transync")]
#[command(about = "Keep PHP translation files in sync across locales")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    project: ProjectArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show files, values and missing values per locale (default)
    Overview,

    /// Export the values a locale is missing to a CSV file
    Export(ExportArgs),

    /// Import a translated CSV file into the translation files
    Import(ImportArgs),

    /// Translate missing values with a machine translation provider
    AutoTranslate(AutoTranslateArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();
    let e2e = cli.project.e2e;

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(!e2e)
                .unicode(!e2e)
                .context_lines(2)
                .tab_width(4)
                .color(!e2e)
                .build(),
        )
    }))
    .ok();

    ui::set_e2e_mode(e2e);
    ui::init_logging();

    let result = match cli.command {
        None | Some(Commands::Overview) => run_overview(&cli.project),
        Some(Commands::Export(args)) => run_export(&cli.project, args),
        Some(Commands::Import(args)) => run_import(&cli.project, args),
        Some(Commands::AutoTranslate(args)) => run_auto_translate(&cli.project, args),
    };

    result.map_err(miette::Report::new)
}
