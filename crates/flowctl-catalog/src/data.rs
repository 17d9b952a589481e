//! Embedded node-definition snapshot: a compiled-in sample of the
//! catalog this crate would otherwise load from a build-time data
//! artifact. Built lazily once per process.

use crate::model::{DisplayOptions, NodeDefinition, NodeFlags, PropertyOption, PropertySchema, PropertyType};
use serde_json::json;
use std::collections::HashMap;
use std::sync::LazyLock;

pub static DEFINITIONS: LazyLock<Vec<NodeDefinition>> = LazyLock::new(build_definitions);

fn build_definitions() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            node_type: "nodes-base.httpRequest",
            display_name: "HTTP Request",
            description: "Makes an HTTP request and returns the response",
            category: "Core Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 4.1,
            properties: vec![
                PropertySchema {
                    name: "url",
                    display_name: "URL",
                    property_type: PropertyType::String,
                    required: true,
                    default: Some(json!("")),
                    options: None,
                    display_options: None,
                },
                PropertySchema {
                    name: "method",
                    display_name: "Method",
                    property_type: PropertyType::Options,
                    required: true,
                    default: Some(json!("GET")),
                    options: Some(vec![
                        PropertyOption { value: "GET", name: "GET", description: "" },
                        PropertyOption { value: "POST", name: "POST", description: "" },
                    ]),
                    display_options: None,
                },
            ],
            operations: vec![],
            credentials: vec!["httpBasicAuth", "httpHeaderAuth"],
        },
        NodeDefinition {
            node_type: "nodes-base.set",
            display_name: "Edit Fields",
            description: "Add or edit fields on an item",
            category: "Core Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 3.0,
            properties: vec![PropertySchema {
                name: "fields",
                display_name: "Fields",
                property_type: PropertyType::FixedCollection,
                required: false,
                default: None,
                options: None,
                display_options: None,
            }],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.switch",
            display_name: "Switch",
            description: "Route items to different outputs based on rules",
            category: "Flow",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 3.0,
            properties: vec![PropertySchema {
                name: "rules",
                display_name: "Rules",
                property_type: PropertyType::Collection,
                required: true,
                default: None,
                options: None,
                display_options: None,
            }],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.code",
            display_name: "Code",
            description: "Run custom JavaScript or Python code",
            category: "Core Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 2.0,
            properties: vec![PropertySchema {
                name: "jsCode",
                display_name: "JavaScript Code",
                property_type: PropertyType::String,
                required: true,
                default: Some(json!("")),
                options: None,
                display_options: None,
            }],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.webhook",
            display_name: "Webhook",
            description: "Starts the workflow when a webhook is called",
            category: "Trigger Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags { is_trigger: true, is_webhook: true, ..NodeFlags::default() },
            version: 2.0,
            properties: vec![PropertySchema {
                name: "path",
                display_name: "Path",
                property_type: PropertyType::String,
                required: true,
                default: Some(json!("")),
                options: None,
                display_options: None,
            }],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.respondToWebhook",
            display_name: "Respond to Webhook",
            description: "Returns data for a webhook call",
            category: "Core Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 1.0,
            properties: vec![],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.manualTrigger",
            display_name: "Manual Trigger",
            description: "Runs the workflow when you click a button",
            category: "Trigger Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags { is_trigger: true, ..NodeFlags::default() },
            version: 1.0,
            properties: vec![],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.cronTrigger",
            display_name: "Cron Trigger",
            description: "Runs the workflow on a schedule",
            category: "Trigger Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags { is_trigger: true, ..NodeFlags::default() },
            version: 1.0,
            properties: vec![],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.noOp",
            display_name: "No Operation",
            description: "Does nothing; useful as a placeholder",
            category: "Core Nodes",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 1.0,
            properties: vec![],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-base.postgres",
            display_name: "Postgres",
            description: "Run queries against a Postgres database",
            category: "Data & Storage",
            package: "n8n-nodes-base",
            flags: NodeFlags::default(),
            version: 2.0,
            properties: vec![],
            operations: vec!["executeQuery", "insert", "update"],
            credentials: vec!["postgres"],
        },
        NodeDefinition {
            node_type: "nodes-langchain.agent",
            display_name: "AI Agent",
            description: "Runs an autonomous agent with tools and memory",
            category: "AI",
            package: "@n8n/n8n-nodes-langchain",
            flags: NodeFlags { is_ai_tool: false, is_versioned: true, ..NodeFlags::default() },
            version: 1.2,
            properties: vec![
                PropertySchema {
                    name: "promptType",
                    display_name: "Prompt Type",
                    property_type: PropertyType::Options,
                    required: true,
                    default: Some(json!("auto")),
                    options: Some(vec![
                        PropertyOption { value: "auto", name: "Take from previous node", description: "" },
                        PropertyOption { value: "define", name: "Define below", description: "" },
                    ]),
                    display_options: None,
                },
                PropertySchema {
                    name: "text",
                    display_name: "Text",
                    property_type: PropertyType::String,
                    required: false,
                    default: Some(json!("")),
                    options: None,
                    display_options: Some(DisplayOptions {
                        show: HashMap::from([("promptType", vec![json!("define")])]),
                        hide: HashMap::new(),
                    }),
                },
            ],
            operations: vec![],
            credentials: vec![],
        },
        NodeDefinition {
            node_type: "nodes-langchain.lmChatOpenAi",
            display_name: "OpenAI Chat Model",
            description: "Language model for chat-based completions",
            category: "AI",
            package: "@n8n/n8n-nodes-langchain",
            flags: NodeFlags::default(),
            version: 1.0,
            properties: vec![],
            operations: vec![],
            credentials: vec!["openAiApi"],
        },
        NodeDefinition {
            node_type: "nodes-langchain.toolCode",
            display_name: "Code Tool",
            description: "Exposes custom code as a tool an agent can call",
            category: "AI",
            package: "@n8n/n8n-nodes-langchain",
            flags: NodeFlags { is_ai_tool: true, ..NodeFlags::default() },
            version: 1.0,
            properties: vec![PropertySchema {
                name: "toolDescription",
                display_name: "Tool Description",
                property_type: PropertyType::String,
                required: true,
                default: Some(json!("")),
                options: None,
                display_options: None,
            }],
            operations: vec![],
            credentials: vec![],
        },
    ]
}
