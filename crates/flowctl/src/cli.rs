//! Top-level argument parsing (spec §6).

use clap::{Parser, Subcommand};
use flowctl_core::config::Profile;
use flowctl_core::types::{Confidence, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowctl", version)]
#[command(about = "Parse, validate, auto-fix, migrate and diff n8n-style workflow documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for command results.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Accept heuristically-repaired JSON when strict parsing fails.
    #[arg(long, global = true)]
    pub repair: bool,

    /// Fall back to a JS-object-literal parse when repair also fails.
    #[arg(long, global = true)]
    pub js_object: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a workflow document.
    Validate {
        file: PathBuf,
        #[arg(long, value_enum)]
        profile: Option<Profile>,
    },
    /// Generate and optionally apply fixes for common problems.
    Autofix {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "medium")]
        confidence: Confidence,
        #[arg(long)]
        max_fixes: Option<usize>,
        #[arg(long, value_delimiter = ',')]
        fix_types: Option<Vec<String>>,
        #[arg(long)]
        upgrade_versions: bool,
        /// Write the fixed workflow back to `file` instead of printing a report.
        #[arg(long)]
        apply: bool,
    },
    /// Migrate one node (or every node of its type) across a typeVersion boundary.
    Migrate {
        file: PathBuf,
        /// Target typeVersion; defaults to the registry's latest known version for the node's type.
        #[arg(long)]
        to: Option<f64>,
        /// Only migrate the node with this name; defaults to every node.
        #[arg(long)]
        node: Option<String>,
        #[arg(long)]
        apply: bool,
    },
    /// Apply a batch of diff operations to a workflow document.
    Diff {
        file: PathBuf,
        /// JSON file containing a `DiffOperation[]` array.
        operations: PathBuf,
        #[arg(long)]
        validate_only: bool,
        #[arg(long)]
        continue_on_error: bool,
        #[arg(long)]
        apply: bool,
    },
    /// Manage local workflow version snapshots.
    Versions {
        #[command(subcommand)]
        cmd: VersionsCommands,
    },
    /// Report on the local environment: config, catalog, and version store health.
    Doctor,
}

#[derive(Subcommand)]
pub enum VersionsCommands {
    /// Snapshot a workflow document.
    Backup {
        workflow_id: String,
        file: PathBuf,
    },
    List {
        workflow_id: String,
    },
    Get {
        workflow_id: String,
        version: u32,
    },
    Delete {
        workflow_id: String,
        version: u32,
    },
    DeleteAll {
        workflow_id: String,
    },
    Compare {
        workflow_id: String,
        from: u32,
        to: u32,
    },
    Prune {
        workflow_id: String,
        #[arg(long, default_value_t = 50)]
        keep: u32,
    },
    Stats {
        workflow_id: String,
    },
    /// Restore a snapshot, always taking a pre-restore backup of `current` first.
    Restore {
        workflow_id: String,
        version: u32,
        /// The live workflow document to back up before restoring.
        current: PathBuf,
        #[arg(long)]
        no_validate: bool,
    },
}
