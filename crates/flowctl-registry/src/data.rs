//! Static, compiled-in breaking-change table (spec §4.2). Entries are
//! ordered the way they'd be added over the catalog's release history;
//! `AnalyzeUpgrade` relies on this registry order, not on re-sorting.

use crate::model::{BreakingChange, ChangeType, Severity};

pub static BREAKING_CHANGES: &[BreakingChange] = &[
    BreakingChange {
        node_type: "nodes-base.httpRequest",
        from_version: 3.0,
        to_version: 4.0,
        property_name: "authentication",
        change_type: ChangeType::Renamed,
        is_breaking: true,
        severity: Severity::High,
        auto_migratable: true,
        migration_hint: "`authentication` moved from a top-level option to `genericAuthType`",
    },
    BreakingChange {
        node_type: "nodes-base.httpRequest",
        from_version: 4.0,
        to_version: 4.1,
        property_name: "options.redirect",
        change_type: ChangeType::DefaultChanged,
        is_breaking: false,
        severity: Severity::Low,
        auto_migratable: true,
        migration_hint: "redirects now follow by default; set `options.redirect.redirect.followRedirects=false` to restore the old behavior",
    },
    BreakingChange {
        node_type: "nodes-base.set",
        from_version: 2.0,
        to_version: 3.0,
        property_name: "values",
        change_type: ChangeType::TypeChanged,
        is_breaking: true,
        severity: Severity::High,
        auto_migratable: false,
        migration_hint: "`values` changed from a typed collection to `fields` with explicit `type` per entry; review each assignment",
    },
    BreakingChange {
        node_type: "nodes-base.switch",
        from_version: 2.0,
        to_version: 3.0,
        property_name: "rules",
        change_type: ChangeType::Renamed,
        is_breaking: true,
        severity: Severity::Medium,
        auto_migratable: true,
        migration_hint: "`rules.conditions` renamed to `rules.values`",
    },
    BreakingChange {
        node_type: "nodes-base.function",
        from_version: 1.0,
        to_version: 2.0,
        property_name: "functionCode",
        change_type: ChangeType::Renamed,
        is_breaking: true,
        severity: Severity::Medium,
        auto_migratable: true,
        migration_hint: "`functionCode` renamed to `jsCode`; node renamed to Code",
    },
    BreakingChange {
        node_type: "nodes-base.webhook",
        from_version: 1.0,
        to_version: 2.0,
        property_name: "responseMode",
        change_type: ChangeType::DefaultChanged,
        is_breaking: false,
        severity: Severity::Low,
        auto_migratable: true,
        migration_hint: "`responseMode` now defaults to `onReceived` instead of `lastNode`",
    },
    BreakingChange {
        node_type: "nodes-langchain.agent",
        from_version: 1.0,
        to_version: 1.1,
        property_name: "hasOutputParser",
        change_type: ChangeType::Added,
        is_breaking: false,
        severity: Severity::Low,
        auto_migratable: true,
        migration_hint: "new optional `hasOutputParser` flag defaults to false",
    },
    BreakingChange {
        node_type: "nodes-langchain.agent",
        from_version: 1.1,
        to_version: 1.2,
        property_name: "needsFallback",
        change_type: ChangeType::Added,
        is_breaking: false,
        severity: Severity::Medium,
        auto_migratable: false,
        migration_hint: "enabling `needsFallback` requires a second `ai_languageModel` connection",
    },
    BreakingChange {
        node_type: "nodes-base.code",
        from_version: 1.0,
        to_version: 2.0,
        property_name: "mode",
        change_type: ChangeType::SemanticChanged,
        is_breaking: true,
        severity: Severity::Medium,
        auto_migratable: false,
        migration_hint: "`mode=runOnceForEachItem` no longer implicitly wraps return values in `{json: ...}`",
    },
];
