//! Trigger classification (spec §6), used by invariant W3 and diff
//! activation side effects.

use crate::normalize::split;

const NAMED_TRIGGERS: &[&str] = &["start", "manualtrigger", "formtrigger"];

/// *Trigger* = type name contains `trigger` (case-insensitive) OR
/// contains `webhook` but NOT `respond`, OR is one of the named triggers.
pub fn is_trigger(node_type: &str) -> bool {
    let lower = node_type.to_lowercase();
    if lower.contains("trigger") {
        return true;
    }
    if lower.contains("webhook") && !lower.contains("respond") {
        return true;
    }
    let (_, local) = split(node_type);
    NAMED_TRIGGERS.contains(&local.to_lowercase().as_str())
}

/// *Activatable trigger* = trigger AND type does not contain
/// `executeworkflow` (sub-workflow triggers can't activate a workflow).
pub fn is_activatable_trigger(node_type: &str) -> bool {
    is_trigger(node_type) && !node_type.to_lowercase().contains("executeworkflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_explicit_trigger_suffix() {
        assert!(is_trigger("nodes-base.cronTrigger"));
        assert!(is_trigger("nodes-base.scheduleTrigger"));
    }

    #[test]
    fn recognizes_webhook_but_not_respond_to_webhook() {
        assert!(is_trigger("nodes-base.webhook"));
        assert!(!is_trigger("nodes-base.respondToWebhook"));
    }

    #[test]
    fn recognizes_named_triggers() {
        assert!(is_trigger("nodes-base.manualTrigger"));
        assert!(is_trigger("nodes-base.formTrigger"));
        assert!(is_trigger("nodes-base.start"));
    }

    #[test]
    fn ordinary_node_is_not_a_trigger() {
        assert!(!is_trigger("nodes-base.httpRequest"));
    }

    #[test]
    fn execute_workflow_trigger_is_not_activatable() {
        assert!(is_trigger("nodes-base.executeWorkflowTrigger"));
        assert!(!is_activatable_trigger("nodes-base.executeWorkflowTrigger"));
    }

    #[test]
    fn webhook_trigger_is_activatable() {
        assert!(is_activatable_trigger("nodes-base.webhook"));
    }
}
