//! Next-best-action suggestions.
//!
//! A single templated prompt call to an externally hosted model with
//! schema-validated input and output. The model itself is an opaque
//! external collaborator; there is no orchestration or retrieval here.

use crate::errors::AppError;
use crate::models::LeadDraft;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Schema-validated suggestion returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeadInsights {
    /// The suggested next best action for this lead.
    pub next_best_action: String,
    /// The reasoning behind the suggested action.
    pub reasoning: String,
}

/// Renders the fixed suggestion prompt over a lead's fields.
pub fn build_prompt(lead: &LeadDraft) -> String {
    format!(
        "You are an AI assistant helping channel partners to identify the next best action for their leads.\n\
         \n\
         Based on the following lead data, provide a concise next best action and the reasoning behind it.\n\
         \n\
         Lead Name: {}\n\
         Contact Details: {}\n\
         Deal Value: {}\n\
         Stage: {}\n\
         Last Interaction: {}\n\
         Additional Details: {}\n\
         \n\
         Next Best Action:",
        lead.lead_name,
        lead.email,
        lead.deal_value,
        lead.stage,
        lead.last_interaction,
        lead.additional_details,
    )
}

/// Client for the hosted suggestion model.
#[derive(Debug, Clone)]
pub struct InsightsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl InsightsClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create insights client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Asks the model for the next best action on a lead.
    ///
    /// The response must match the `{ nextBestAction, reasoning }` schema
    /// exactly; a partial or differently shaped document is an error, never
    /// a partial value.
    pub async fn next_best_action(&self, lead: &LeadDraft) -> Result<LeadInsights, AppError> {
        let prompt = build_prompt(lead);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Insights request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RemoteRejected {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let insights: LeadInsights = response.json().await.map_err(|e| {
            AppError::Network(format!("Insights response did not match schema: {}", e))
        })?;

        tracing::info!("Received next-best-action suggestion");
        Ok(insights)
    }
}
