//! The `ControlPlane` trait: every operation `flowctl` needs against the
//! system of record for workflows. Kept separate from the HTTP
//! implementation so tests and alternative transports can substitute it.

use crate::model::{ExecutionSummary, WorkflowSummary};
use async_trait::async_trait;
use flowctl_core::error::FlowError;
use flowctl_core::types::WorkflowId;
use flowctl_model::workflow::Workflow;

#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn get_workflow(&self, id: &WorkflowId) -> Result<Workflow, FlowError>;
    async fn update_workflow(&self, id: &WorkflowId, workflow: &Workflow) -> Result<(), FlowError>;
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, FlowError>;
    async fn create_workflow(&self, workflow: &Workflow) -> Result<WorkflowId, FlowError>;
    async fn delete_workflow(&self, id: &WorkflowId) -> Result<(), FlowError>;
    async fn activate(&self, id: &WorkflowId) -> Result<(), FlowError>;
    async fn deactivate(&self, id: &WorkflowId) -> Result<(), FlowError>;
    async fn get_executions(&self, id: &WorkflowId, limit: Option<u32>) -> Result<Vec<ExecutionSummary>, FlowError>;
}
