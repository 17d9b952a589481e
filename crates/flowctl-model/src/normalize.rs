//! Node-type normalization (spec §6, invariant N1).
//!
//! `n8n-nodes-base.X` <-> `nodes-base.X`
//! `@n8n/n8n-nodes-langchain.X` <-> `nodes-langchain.X`
//! The normalizer is idempotent: `normalize(normalize(t)) == normalize(t)`.

use crate::workflow::Workflow;

const LEGACY_BASE_PREFIX: &str = "n8n-nodes-base.";
const SHORT_BASE_PREFIX: &str = "nodes-base.";
const SCOPED_LANGCHAIN_PREFIX: &str = "@n8n/n8n-nodes-langchain.";
const SHORT_LANGCHAIN_PREFIX: &str = "nodes-langchain.";

/// Normalizes a node-type string to its short form. Unknown package
/// prefixes pass through unchanged, which keeps the function total and
/// idempotent even for catalog entries this version doesn't recognize.
pub fn normalize(node_type: &str) -> String {
    if let Some(rest) = node_type.strip_prefix(SCOPED_LANGCHAIN_PREFIX) {
        return format!("{SHORT_LANGCHAIN_PREFIX}{rest}");
    }
    if let Some(rest) = node_type.strip_prefix(LEGACY_BASE_PREFIX) {
        return format!("{SHORT_BASE_PREFIX}{rest}");
    }
    node_type.to_string()
}

/// Inverse of [`normalize`] for payloads the control plane expects in
/// long form: `nodes-base.*` gets the `n8n-nodes-base.` prefix back.
/// `nodes-langchain.*` is left as-is; the control plane's scoped form is
/// only required at catalog-import time, not at update time.
pub fn display_form(node_type: &str) -> String {
    if let Some(rest) = node_type.strip_prefix(SHORT_BASE_PREFIX) {
        return format!("{LEGACY_BASE_PREFIX}{rest}");
    }
    node_type.to_string()
}

/// Splits a normalized node type into `(package_prefix, local_name)`.
pub fn split(node_type: &str) -> (&str, &str) {
    match node_type.rsplit_once('.') {
        Some((prefix, local)) => (prefix, local),
        None => ("", node_type),
    }
}

/// Normalizes every node's `type` field in place (run once after parse).
pub fn normalize_node_types(workflow: &mut Workflow) {
    for node in &mut workflow.nodes {
        node.node_type = normalize(&node.node_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_legacy_base_prefix() {
        assert_eq!(normalize("n8n-nodes-base.httpRequest"), "nodes-base.httpRequest");
    }

    #[test]
    fn normalizes_scoped_langchain_prefix() {
        assert_eq!(
            normalize("@n8n/n8n-nodes-langchain.openAi"),
            "nodes-langchain.openAi"
        );
    }

    #[test]
    fn already_short_form_passes_through() {
        assert_eq!(normalize("nodes-base.webhook"), "nodes-base.webhook");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "n8n-nodes-base.httpRequest",
            "@n8n/n8n-nodes-langchain.openAi",
            "nodes-base.webhook",
            "some-unknown-package.thing",
        ] {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn display_form_restores_legacy_prefix_for_base_nodes() {
        assert_eq!(display_form("nodes-base.httpRequest"), "n8n-nodes-base.httpRequest");
    }

    #[test]
    fn split_separates_prefix_and_local_name() {
        assert_eq!(split("nodes-base.httpRequest"), ("nodes-base", "httpRequest"));
        assert_eq!(split("bareword"), ("", "bareword"));
    }

    proptest::proptest! {
        #[test]
        fn normalize_is_idempotent_for_arbitrary_local_names(local in "[A-Za-z][A-Za-z0-9]{0,20}") {
            for prefix in [LEGACY_BASE_PREFIX, SHORT_BASE_PREFIX, SCOPED_LANGCHAIN_PREFIX, ""] {
                let input = format!("{prefix}{local}");
                let once = normalize(&input);
                let twice = normalize(&once);
                proptest::prop_assert_eq!(once, twice);
            }
        }
    }
}
