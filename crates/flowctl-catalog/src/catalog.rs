//! Node Catalog (C1): an immutable, case-insensitive-resolvable view
//! over the embedded node-definition snapshot, backed by an in-memory
//! tantivy index for token retrieval with a deterministic relevance
//! score (spec §4.1) applied on top, and a linear-scan fallback when the
//! index can't be queried.

use crate::data::DEFINITIONS;
use crate::escape::escape_fts_query;
use crate::model::{NodeDefinition, PropertySchema};
use flowctl_core::error::FlowError;
use flowctl_similarity::levenshtein;
use std::collections::{HashMap, HashSet};
use tantivy::collector::TopDocs;
use tantivy::directory::RamDirectory;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, ReloadPolicy, TantivyDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Or,
    And,
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub node_type: String,
    pub display_name: String,
    pub score: i32,
}

pub struct Catalog {
    index: Index,
    reader: IndexReader,
    field_node_type: Field,
    field_display_name: Field,
    field_description: Field,
}

impl Catalog {
    /// Builds the index from the embedded snapshot. Per the failure
    /// model in spec §4.1, this is the one place that can fail — once
    /// open, the catalog never partially initializes.
    pub fn open() -> Result<Self, FlowError> {
        let mut schema_builder = Schema::builder();
        let field_node_type = schema_builder.add_text_field("node_type", STRING | STORED);
        let field_display_name = schema_builder.add_text_field("display_name", TEXT | STORED);
        let field_description = schema_builder.add_text_field("description", TEXT | STORED);
        let schema = schema_builder.build();

        let index = Index::create(RamDirectory::create(), schema, Default::default())
            .map_err(|e| FlowError::Config(format!("failed to open node catalog index: {e}")))?;

        let mut writer = index
            .writer(15_000_000)
            .map_err(|e| FlowError::Config(format!("failed to open catalog index writer: {e}")))?;
        for def in DEFINITIONS.iter() {
            writer
                .add_document(doc!(
                    field_node_type => def.node_type,
                    field_display_name => def.display_name,
                    field_description => def.description,
                ))
                .map_err(|e| FlowError::Config(format!("failed to index {}: {e}", def.node_type)))?;
        }
        writer
            .commit()
            .map_err(|e| FlowError::Config(format!("failed to commit catalog index: {e}")))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| FlowError::Config(format!("failed to build catalog reader: {e}")))?;

        Ok(Self {
            index,
            reader,
            field_node_type,
            field_display_name,
            field_description,
        })
    }

    /// `Get(nodeType)`: normalizes input, resolves via short form, then
    /// falls back to the original (unnormalized) input once before
    /// reporting a miss.
    pub fn get(&self, node_type: &str) -> Option<&'static NodeDefinition> {
        let normalized = flowctl_model::normalize::normalize(node_type);
        DEFINITIONS
            .iter()
            .find(|def| def.node_type == normalized)
            .or_else(|| DEFINITIONS.iter().find(|def| def.node_type == node_type))
    }

    /// `Search(query, mode, limit)` (spec §4.1).
    pub fn search(&self, query: &str, mode: SearchMode, limit: usize) -> Vec<SearchHit> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Vec::new();
        }
        match mode {
            SearchMode::Or | SearchMode::And => self.token_search(&tokens, mode, limit),
            SearchMode::Fuzzy => self.fuzzy_search(query, limit),
        }
    }

    fn token_search(&self, tokens: &[String], mode: SearchMode, limit: usize) -> Vec<SearchHit> {
        let candidates = self.tantivy_candidates(tokens, mode);
        let mut hits: Vec<SearchHit> = DEFINITIONS
            .iter()
            .filter(|def| candidates.as_ref().is_none_or(|set| set.contains(def.node_type)))
            .filter_map(|def| {
                let scores: Vec<i32> = tokens.iter().map(|t| token_score(t, def)).collect();
                let matched = match mode {
                    SearchMode::And => scores.iter().all(|s| *s > 0),
                    _ => scores.iter().any(|s| *s > 0),
                };
                matched.then(|| SearchHit {
                    node_type: def.node_type.to_string(),
                    display_name: def.display_name.to_string(),
                    score: scores.iter().sum(),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(limit);
        hits
    }

    /// Retrieves the candidate node-type set via tantivy's query parser,
    /// preferring BM25-backed retrieval per spec §4.1. Returns `None` on
    /// any FTS-layer failure (query syntax, searcher error), signaling
    /// callers to fall back to a full linear (LIKE-equivalent) scan.
    fn tantivy_candidates(&self, tokens: &[String], mode: SearchMode) -> Option<HashSet<&'static str>> {
        let escaped: Vec<String> = tokens.iter().map(|t| escape_fts_query(t)).collect();
        let joiner = match mode {
            SearchMode::And => " AND ",
            _ => " OR ",
        };
        let query_text = escaped.join(joiner);

        let query_parser = QueryParser::for_index(
            &self.index,
            vec![self.field_node_type, self.field_display_name, self.field_description],
        );
        let parsed = query_parser.parse_query(&query_text).ok()?;

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&parsed, &TopDocs::with_limit(DEFINITIONS.len())).ok()?;

        let mut found = HashSet::new();
        for (_score, address) in top_docs {
            let stored: TantivyDocument = searcher.doc(address).ok()?;
            if let Some(value) = stored.get_first(self.field_node_type).and_then(|v| v.as_str()) {
                if let Some(def) = DEFINITIONS.iter().find(|d| d.node_type == value) {
                    found.insert(def.node_type);
                }
            }
        }
        Some(found)
    }

    fn fuzzy_search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query_lower = query.to_lowercase();
        let threshold = ((0.4 * query.chars().count() as f64).floor() as usize).max(2);

        let mut hits: Vec<SearchHit> = DEFINITIONS
            .iter()
            .filter_map(|def| {
                let node_type_lower = def.node_type.to_lowercase();
                let display_lower = def.display_name.to_lowercase();

                let mut min_distance = levenshtein::distance(&query_lower, &node_type_lower);
                min_distance = min_distance.min(levenshtein::distance(&query_lower, &display_lower));
                for word in display_lower.split_whitespace() {
                    min_distance = min_distance.min(levenshtein::distance(&query_lower, word));
                }

                let substring = node_type_lower.contains(&query_lower) || display_lower.contains(&query_lower);
                if min_distance > threshold && !substring {
                    return None;
                }

                let max_len = query_lower.chars().count().max(node_type_lower.chars().count()).max(1);
                let distance_score = ((max_len - min_distance.min(max_len)) as f64 / max_len as f64 * 50.0) as i32;
                let score = token_score(query, def).max(distance_score).max(if substring { 75 } else { 0 });

                Some(SearchHit {
                    node_type: def.node_type.to_string(),
                    display_name: def.display_name.to_string(),
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(limit);
        hits
    }

    /// Every embedded definition, for callers that build their own
    /// candidate lists (e.g. the similarity engine's suggestion pool).
    pub fn all(&self) -> &'static [NodeDefinition] {
        &DEFINITIONS
    }

    pub fn category_stats(&self) -> HashMap<&'static str, usize> {
        let mut stats = HashMap::new();
        for def in DEFINITIONS.iter() {
            *stats.entry(def.category).or_insert(0) += 1;
        }
        stats
    }

    pub fn trigger_nodes(&self) -> Vec<&'static NodeDefinition> {
        DEFINITIONS.iter().filter(|d| d.flags.is_trigger).collect()
    }

    pub fn ai_tools(&self) -> Vec<&'static NodeDefinition> {
        DEFINITIONS.iter().filter(|d| d.flags.is_ai_tool).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&'static NodeDefinition> {
        DEFINITIONS.iter().filter(|d| d.category == category).collect()
    }

    pub fn search_properties(&self, node_type: &str, query: &str, max: usize) -> Vec<&'static PropertySchema> {
        let Some(def) = self.get(node_type) else { return Vec::new() };
        let query_lower = query.to_lowercase();
        def.properties
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query_lower) || p.display_name.to_lowercase().contains(&query_lower)
            })
            .take(max)
            .collect()
    }
}

fn token_score(token: &str, def: &NodeDefinition) -> i32 {
    let token_lower = token.to_lowercase();
    let node_type_lower = def.node_type.to_lowercase();
    let display_lower = def.display_name.to_lowercase();
    let description_lower = def.description.to_lowercase();

    if node_type_lower == token_lower {
        150
    } else if node_type_lower.contains(&token_lower) {
        100
    } else if display_lower == token_lower {
        100
    } else if display_lower.contains(&token_lower) {
        75
    } else if description_lower.contains(&token_lower) {
        25
    } else {
        0
    }
}
