use anyhow::Result;
use async_trait::async_trait;

use crate::types::{DayConversations, ExperimentStatus, Template};

/// Read side of the backend gateway, as consumed by the live pollers.
/// Implemented by the HTTP client; tests substitute scripted mocks.
#[async_trait]
pub trait ExperimentGateway: Send + Sync {
    async fn experiment_status(&self, experiment_id: &str) -> Result<ExperimentStatus>;

    async fn conversations(&self, experiment_id: &str) -> Result<Vec<DayConversations>>;

    /// The raw moderator report, or `None` while the experiment has not
    /// produced one yet.
    async fn result(&self, experiment_id: &str) -> Result<Option<String>>;
}

/// Write side of template persistence, as consumed by the configuration
/// editor when an edited template must be stored under a derived id.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn create_template(&self, template: &Template) -> Result<()>;
}
