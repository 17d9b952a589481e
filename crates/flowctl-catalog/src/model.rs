//! Catalog data model (spec §3): `NodeDefinition` and `PropertySchema`.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    Collection,
    FixedCollection,
    ResourceLocator,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyOption {
    pub value: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// `displayOptions.show/hide`: maps another property's name to the list
/// of its values for which this property is active (show) or inactive
/// (hide).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayOptions {
    pub show: HashMap<&'static str, Vec<Value>>,
    pub hide: HashMap<&'static str, Vec<Value>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    pub name: &'static str,
    pub display_name: &'static str,
    pub property_type: PropertyType,
    pub required: bool,
    pub default: Option<Value>,
    pub options: Option<Vec<PropertyOption>>,
    pub display_options: Option<DisplayOptions>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NodeFlags {
    pub is_trigger: bool,
    pub is_webhook: bool,
    pub is_ai_tool: bool,
    pub is_versioned: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub package: &'static str,
    pub flags: NodeFlags,
    pub version: f64,
    pub properties: Vec<PropertySchema>,
    pub operations: Vec<&'static str>,
    pub credentials: Vec<&'static str>,
}
