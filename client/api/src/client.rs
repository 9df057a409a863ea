use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use simdash_core::traits::{ExperimentGateway, TemplateStore};
use simdash_core::types::{
    DayConversations, ExperimentRecord, ExperimentStatus, HealthSnapshot, Template,
};

use crate::types::{
    DeleteResponse, ResultResponse, RunExperimentRequest, RunExperimentResponse, StatusResponse,
    TemplateSummary,
};

/// REST client for the simulation backend gateway.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`. Transport failures bubble up; callers treat them as
    /// "backend unreachable", not as fatal errors.
    pub async fn check_health(&self) -> Result<HealthSnapshot> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .context("health request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("health endpoint returned {}", status);
        }

        response.json().await.context("failed to parse health response")
    }

    /// `GET /templates`.
    pub async fn templates(&self) -> Result<Vec<TemplateSummary>> {
        let response = self
            .client
            .get(self.url("/templates"))
            .send()
            .await
            .context("template listing request failed")?;
        Self::parse_ok(response, "template listing").await
    }

    /// `GET /templates/{id}`.
    pub async fn template(&self, template_id: &str) -> Result<Template> {
        let response = self
            .client
            .get(self.url(&format!("/templates/{}", template_id)))
            .send()
            .await
            .context("template request failed")?;
        Self::parse_ok(response, "template").await
    }

    /// `GET /experiments`.
    pub async fn experiments(&self) -> Result<Vec<ExperimentRecord>> {
        let response = self
            .client
            .get(self.url("/experiments"))
            .send()
            .await
            .context("experiment listing request failed")?;
        Self::parse_ok(response, "experiment listing").await
    }

    /// `GET /experiments/{id}`.
    pub async fn experiment(&self, experiment_id: &str) -> Result<ExperimentRecord> {
        let response = self
            .client
            .get(self.url(&format!("/experiments/{}", experiment_id)))
            .send()
            .await
            .context("experiment request failed")?;
        Self::parse_ok(response, "experiment").await
    }

    /// `POST /run_experiment`. The backend queues the run and reports back an
    /// experiment id to poll.
    pub async fn run_experiment(&self, request: &RunExperimentRequest) -> Result<RunExperimentResponse> {
        debug!(template_id = %request.template_id, "Submitting experiment run");
        let response = self
            .client
            .post(self.url("/run_experiment"))
            .json(request)
            .send()
            .await
            .context("run_experiment request failed")?;
        Self::parse_ok(response, "run_experiment").await
    }

    /// `DELETE /experiments/{id}`. The backend refuses to delete running
    /// experiments; that refusal surfaces as an error here.
    pub async fn delete_experiment(&self, experiment_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/experiments/{}", experiment_id)))
            .send()
            .await
            .context("delete request failed")?;
        let _ack: DeleteResponse = Self::parse_ok(response, "delete").await?;
        Ok(())
    }

    async fn parse_ok<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("backend returned {} for {}: {}", status, what, body);
        }
        response
            .json()
            .await
            .with_context(|| format!("failed to parse {} response", what))
    }
}

#[async_trait]
impl ExperimentGateway for ApiClient {
    async fn experiment_status(&self, experiment_id: &str) -> Result<ExperimentStatus> {
        let response = self
            .client
            .get(self.url(&format!("/experiments/{}/status", experiment_id)))
            .send()
            .await
            .context("status request failed")?;
        let parsed: StatusResponse = Self::parse_ok(response, "status").await?;
        Ok(parsed.status)
    }

    async fn conversations(&self, experiment_id: &str) -> Result<Vec<DayConversations>> {
        let response = self
            .client
            .get(self.url(&format!("/experiments/{}/conversations", experiment_id)))
            .send()
            .await
            .context("conversations request failed")?;
        Self::parse_ok(response, "conversations").await
    }

    async fn result(&self, experiment_id: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.url(&format!("/experiments/{}/result", experiment_id)))
            .send()
            .await
            .context("result request failed")?;

        // The backend 404s until the experiment completes; that is the
        // normal "no report yet" signal, not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let parsed: ResultResponse = Self::parse_ok(response, "result").await?;
        Ok(parsed.raw_report.filter(|r| !r.trim().is_empty()))
    }
}

#[async_trait]
impl TemplateStore for ApiClient {
    async fn create_template(&self, template: &Template) -> Result<()> {
        debug!(template_id = %template.template_id, "Creating template");
        let response = self
            .client
            .post(self.url("/templates"))
            .json(template)
            .send()
            .await
            .context("template create request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("backend returned {} for template create: {}", status, body);
        }
        Ok(())
    }
}
