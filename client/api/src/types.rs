use serde::{Deserialize, Serialize};

use simdash_core::types::ExperimentStatus;

/// Body of `POST /run_experiment`.
#[derive(Debug, Clone, Serialize)]
pub struct RunExperimentRequest {
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversations_per_round: Option<u32>,
}

/// Response of `POST /run_experiment`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunExperimentResponse {
    pub experiment_id: String,
    #[serde(default)]
    pub status: ExperimentStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /experiments/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub experiment_id: Option<String>,
    pub status: ExperimentStatus,
}

/// Response of `GET /experiments/{id}/result`. The report field is optional:
/// a missing or empty report is a soft condition, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultResponse {
    #[serde(default)]
    pub experiment_id: Option<String>,
    #[serde(default)]
    pub raw_report: Option<String>,
}

/// One entry of `GET /templates`. The listing flattens template_data and
/// reduces factions to their names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub template_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub rounds: u32,
    #[serde(default)]
    pub conversations_per_round: u32,
    #[serde(default)]
    pub factions: Vec<String>,
}

/// Ack of `DELETE /experiments/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub experiment_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_omits_unset_fields() {
        let req = RunExperimentRequest {
            template_id: "template-default".into(),
            rounds: None,
            conversations_per_round: Some(4),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("rounds\":null"));
        assert!(json.contains("\"conversations_per_round\":4"));
    }

    #[test]
    fn test_result_without_report_deserializes() {
        let resp: ResultResponse = serde_json::from_str("{\"experiment_id\":\"e1\"}").unwrap();
        assert!(resp.raw_report.is_none());
    }

    #[test]
    fn test_status_response_maps_unknown() {
        let resp: StatusResponse =
            serde_json::from_str("{\"status\":\"paused_for_maintenance\"}").unwrap();
        assert_eq!(resp.status, ExperimentStatus::Unknown);
    }
}
