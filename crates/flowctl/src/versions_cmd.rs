use crate::cli::VersionsCommands;
use crate::io::{read_workflow, write_workflow};
use crate::output::emit;
use flowctl_catalog::Catalog;
use flowctl_core::config;
use flowctl_core::error::{ExitCode, FlowError};
use flowctl_core::types::{OutputFormat, WorkflowId};
use flowctl_model::parser::ParseOptions;
use flowctl_versions::{RestoreOutcome, VersionStore, VersionTrigger};
use serde_json::Map;

pub fn handle_versions(cmd: VersionsCommands, format: OutputFormat) -> Result<i32, FlowError> {
    let root = config::data_dir().ok_or_else(|| FlowError::Config("could not resolve a data directory for this platform".into()))?;

    match cmd {
        VersionsCommands::Backup { workflow_id, file } => {
            let (_raw, workflow) = read_workflow(&file, ParseOptions::default())?;
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let keep = config::load(&config::config_file_path().unwrap_or_default())?.version_store.keep_versions;
            let record = store.create_backup(&workflow, VersionTrigger::Manual, Map::new(), keep)?;
            emit(format, &record, |r| println!("created version {}", r.version));
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::List { workflow_id } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let versions = store.list_versions()?;
            emit(format, &versions, |vs| {
                for v in vs {
                    println!("{} {} {:?}", v.version, v.created_at, v.trigger);
                }
            });
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::Get { workflow_id, version } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            match store.get(version)? {
                Some(record) => {
                    emit(format, &record, |r| println!("{}", serde_json::to_string_pretty(&r.workflow).unwrap()));
                    Ok(ExitCode::Success.code())
                }
                None => Err(FlowError::MissingInput(format!("version {version} not found"))),
            }
        }
        VersionsCommands::Delete { workflow_id, version } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let deleted = store.delete_version(version)?;
            emit(format, &deleted, |d| println!("{}", if *d { "deleted" } else { "not found" }));
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::DeleteAll { workflow_id } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let count = store.delete_all()?;
            emit(format, &count, |c| println!("deleted {c} version(s)"));
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::Compare { workflow_id, from, to } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let diff = store.compare(from, to)?;
            emit(format, &diff, |d| {
                println!("added: {:?}", d.added_nodes);
                println!("removed: {:?}", d.removed_nodes);
                println!("modified: {:?}", d.modified_nodes);
                println!("connection changes: {}", d.connection_changes);
            });
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::Prune { workflow_id, keep } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let pruned = store.prune(keep)?;
            emit(format, &pruned, |p| println!("pruned {p} version(s)"));
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::Stats { workflow_id } => {
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let stats = store.stats()?;
            emit(format, &stats, |s| {
                println!("{} version(s), {} bytes total", s.count, s.total_bytes);
            });
            Ok(ExitCode::Success.code())
        }
        VersionsCommands::Restore { workflow_id, version, current, no_validate } => {
            let (_raw, current_workflow) = read_workflow(&current, ParseOptions::default())?;
            let store = VersionStore::open(&root, &WorkflowId::from(workflow_id))?;
            let catalog = Catalog::open()?;
            let keep = config::load(&config::config_file_path().unwrap_or_default())?.version_store.keep_versions;
            let outcome = store.restore(&current_workflow, version, !no_validate, &catalog, keep)?;
            match outcome {
                RestoreOutcome::Ready { backup, workflow } => {
                    write_workflow(&current, &workflow)?;
                    println!("restored version {version} (pre-restore backup saved as version {})", backup.version);
                    Ok(ExitCode::Success.code())
                }
                RestoreOutcome::ValidationFailed { backup, issues } => {
                    println!(
                        "restore blocked by validation ({} issue(s)); pre-restore backup saved as version {}",
                        issues.len(),
                        backup.version
                    );
                    for issue in &issues {
                        println!("  {issue}");
                    }
                    Ok(ExitCode::Data.code())
                }
            }
        }
    }
}
