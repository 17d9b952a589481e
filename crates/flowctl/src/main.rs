use clap::Parser;
use flowctl_core::error::FlowError;
use flowctl_core::lifecycle::{install_signal_handlers, CancellationToken};
use flowctl_model::parser::ParseOptions;

mod autofix_cmd;
mod cli;
mod diff_cmd;
mod doctor_cmd;
mod io;
mod migrate_cmd;
mod output;
mod validate_cmd;
mod versions_cmd;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cancel = CancellationToken::new();
    install_signal_handlers(cancel.clone());

    let cli = Cli::parse();
    let format = cli.format;
    let parse_options = ParseOptions {
        accept_repaired: cli.repair,
        accept_js_object: cli.js_object,
    };

    let result = run(cli.command, parse_options, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("hint: {}", err.hint());
            std::process::exit(err.exit_code().code());
        }
    }
}

fn run(command: Commands, parse_options: ParseOptions, format: flowctl_core::types::OutputFormat) -> Result<i32, FlowError> {
    match command {
        Commands::Validate { file, profile } => validate_cmd::handle_validate(&file, profile, parse_options, format),
        Commands::Autofix {
            file,
            confidence,
            max_fixes,
            fix_types,
            upgrade_versions,
            apply,
        } => autofix_cmd::handle_autofix(&file, confidence, max_fixes, fix_types, upgrade_versions, apply, parse_options, format),
        Commands::Migrate { file, to, node, apply } => migrate_cmd::handle_migrate(&file, to, node, apply, parse_options, format),
        Commands::Diff {
            file,
            operations,
            validate_only,
            continue_on_error,
            apply,
        } => diff_cmd::handle_diff(&file, &operations, validate_only, continue_on_error, apply, parse_options, format),
        Commands::Versions { cmd } => versions_cmd::handle_versions(cmd, format),
        Commands::Doctor => doctor_cmd::handle_doctor(),
    }
}
