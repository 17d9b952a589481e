//! Similarity Engine (C7): Levenshtein + heuristic ranking, producing
//! node-type suggestions with a confidence score in `[0, 1]`.

pub mod levenshtein;

use serde::Serialize;

/// A candidate the unknown type is compared against — typically every
/// `NodeDefinition` in the catalog, expressed as just the two fields this
/// engine needs so it stays decoupled from the catalog crate.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub node_type: &'a str,
    pub display_name: &'a str,
}

/// A ranked suggestion (spec §4.7).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub node_type: String,
    pub confidence: f64,
    pub reason: String,
}

/// Known typo/shorthand -> canonical-suffix pairs. Matched against the
/// unknown type's local name (after the last `.`), case-insensitive.
const COMMON_MISTAKES: &[(&str, &str)] = &[
    ("webhok", "webhook"),
    ("htttprequest", "httprequest"),
    ("http", "httprequest"),
    ("fucntion", "function"),
    ("functoin", "function"),
    ("swithc", "switch"),
    ("agnet", "agent"),
];

const SUBSTRING_BOOST: f64 = 0.15;
const COMMON_MISTAKE_BOOST: f64 = 0.25;
const AUTO_FIXABLE_THRESHOLD: f64 = 0.90;

fn local_name(node_type: &str) -> &str {
    node_type.rsplit_once('.').map(|(_, local)| local).unwrap_or(node_type)
}

fn levenshtein_confidence(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let dist = levenshtein::distance(&a, &b);
    1.0 - (dist as f64 / max_len as f64)
}

fn confidence_for(unknown_type: &str, candidate: Candidate<'_>) -> (f64, &'static str) {
    let unknown_local = local_name(unknown_type).to_lowercase();
    let candidate_local = local_name(candidate.node_type).to_lowercase();

    let mut best = levenshtein_confidence(&unknown_local, &candidate_local);
    let mut reason = "similar node-type name";

    let display_confidence = levenshtein_confidence(&unknown_local, candidate.display_name);
    if display_confidence > best {
        best = display_confidence;
        reason = "similar display name";
    }
    for word in candidate.display_name.split_whitespace() {
        let word_confidence = levenshtein_confidence(&unknown_local, word);
        if word_confidence > best {
            best = word_confidence;
            reason = "similar to a word in the display name";
        }
    }

    if candidate_local.contains(&unknown_local) || unknown_local.contains(&candidate_local) {
        best += SUBSTRING_BOOST;
        reason = "substring match";
    }

    if COMMON_MISTAKES
        .iter()
        .any(|(wrong, right)| unknown_local == *wrong && candidate_local == *right)
    {
        best += COMMON_MISTAKE_BOOST;
        reason = "known common-mistake pattern";
    }

    (best.min(1.0), reason)
}

/// Ranks every candidate against `unknown_type` and returns the top `k`
/// by descending confidence.
pub fn suggest(unknown_type: &str, candidates: &[Candidate<'_>], top_k: usize) -> Vec<Suggestion> {
    let mut ranked: Vec<Suggestion> = candidates
        .iter()
        .map(|candidate| {
            let (confidence, reason) = confidence_for(unknown_type, *candidate);
            Suggestion {
                node_type: candidate.node_type.to_string(),
                confidence,
                reason: reason.to_string(),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    ranked.truncate(top_k);
    ranked
}

/// `IsAutoFixable` (spec §4.7): confidence at or above 0.90.
pub fn is_auto_fixable(confidence: f64) -> bool {
    confidence >= AUTO_FIXABLE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typo_suggests_canonical_type_with_high_confidence() {
        let candidates = [Candidate {
            node_type: "nodes-base.webhook",
            display_name: "Webhook",
        }];
        let suggestions = suggest("nodes-base.webhok", &candidates, 3);
        assert_eq!(suggestions[0].node_type, "nodes-base.webhook");
        assert!(suggestions[0].confidence > 0.8);
    }

    #[test]
    fn common_mistake_table_boosts_known_pairs() {
        let candidates = [Candidate {
            node_type: "nodes-base.webhook",
            display_name: "Webhook",
        }];
        let suggestions = suggest("nodes-base.webhok", &candidates, 1);
        assert!(is_auto_fixable(suggestions[0].confidence));
    }

    #[test]
    fn unrelated_candidate_has_low_confidence() {
        let candidates = [Candidate {
            node_type: "nodes-base.postgres",
            display_name: "Postgres",
        }];
        let suggestions = suggest("nodes-langchain.agent", &candidates, 1);
        assert!(suggestions[0].confidence < 0.5);
    }

    #[test]
    fn top_k_truncates_results() {
        let candidates = [
            Candidate { node_type: "nodes-base.webhook", display_name: "Webhook" },
            Candidate { node_type: "nodes-base.httpRequest", display_name: "HTTP Request" },
            Candidate { node_type: "nodes-base.set", display_name: "Edit Fields" },
        ];
        let suggestions = suggest("nodes-base.webhok", &candidates, 1);
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn results_are_sorted_descending_by_confidence() {
        let candidates = [
            Candidate { node_type: "nodes-base.webhook", display_name: "Webhook" },
            Candidate { node_type: "nodes-base.postgres", display_name: "Postgres" },
        ];
        let suggestions = suggest("nodes-base.webhok", &candidates, 2);
        assert!(suggestions[0].confidence >= suggestions[1].confidence);
    }
}
