use crate::config::Config;
use crate::errors::AppError;
use crate::models::wire::CreateLeadEnvelope;
use crate::models::{Lead, LeadDraft};
use crate::session::SessionCredential;
use std::time::Duration;

/// Client for the remote lead API.
///
/// Holds no credential itself; the session bundle is passed to each call so
/// it stays read-only for the duration of an operation.
#[derive(Debug, Clone)]
pub struct LeadsApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl LeadsApiClient {
    /// Creates a new `LeadsApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the lead API.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create leads client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.leads_api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Creates a new lead on the remote system.
    ///
    /// One create request per call; there is no retry, a failed submission
    /// requires explicit resubmission by the caller.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The ID of the created lead.
    pub async fn create_lead(
        &self,
        credential: &SessionCredential,
        draft: &LeadDraft,
    ) -> Result<String, AppError> {
        let url = format!("{}/api/socialLeads/create", self.base_url);
        tracing::info!("Creating lead: {}", draft.lead_name);

        let body = CreateLeadEnvelope::new(credential, draft);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", credential.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Create lead request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let response_data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::Network(format!("Failed to parse lead creation response: {}", e))
        })?;

        let lead_id = extract_created_id(&response_data).ok_or_else(|| {
            tracing::warn!("Unexpected create response format: {:?}", response_data);
            AppError::RemoteRejected {
                status: 200,
                message: "Lead creation response missing 'id' field".to_string(),
            }
        })?;

        tracing::info!("Lead created successfully: {}", lead_id);
        Ok(lead_id)
    }

    /// Fetches the caller's full lead collection.
    ///
    /// A single non-paginated read; the remote response nests the records
    /// under `data.leads` and anything else is treated as an empty
    /// collection, matching the remote contract.
    pub async fn fetch_leads(
        &self,
        credential: &SessionCredential,
    ) -> Result<Vec<Lead>, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/socialLeads/all", self.base_url),
            &[
                ("Id", credential.id.as_str()),
                ("Token", credential.token.as_str()),
                ("Session", credential.session.as_str()),
            ],
        )
        .map_err(|e| AppError::Network(format!("Failed to build URL: {}", e)))?;

        tracing::info!("Fetching lead collection");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", credential.token))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Fetch leads request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse leads response: {}", e)))?;

        let leads = match response_data
            .get("data")
            .and_then(|d| d.get("leads"))
            .filter(|l| l.is_array())
        {
            Some(raw) => serde_json::from_value::<Vec<Lead>>(raw.clone())
                .map_err(|e| AppError::Network(format!("Failed to parse lead records: {}", e)))?,
            None => {
                tracing::warn!("Leads response missing 'data.leads' array; treating as empty");
                Vec::new()
            }
        };

        tracing::info!("Fetched {} leads", leads.len());
        Ok(leads)
    }
}

/// Converts a non-success response into `RemoteRejected`, surfacing the
/// remote `message` verbatim when one is present.
async fn rejection(response: reqwest::Response) -> AppError {
    let status = response.status();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16())),
        Err(_) => format!("HTTP error! status: {}", status.as_u16()),
    };
    tracing::warn!("Remote API rejected request ({}): {}", status, message);
    AppError::RemoteRejected {
        status: status.as_u16(),
        message,
    }
}

/// Pulls the created-record identifier out of the create response.
///
/// The remote system has been observed returning it at `data.id`, `id` and
/// `lead_id`, as either a string or an integer.
fn extract_created_id(response: &serde_json::Value) -> Option<String> {
    let candidates = [
        response.get("data").and_then(|d| d.get("id")),
        response.get("id"),
        response.get("lead_id"),
    ];

    for value in candidates.into_iter().flatten() {
        if let Some(id) = value.as_str() {
            return Some(id.to_string());
        }
        if let Some(id) = value.as_i64() {
            return Some(id.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_client_creation() {
        let client = LeadsApiClient::new("https://example.com", Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn extracts_id_from_known_shapes() {
        assert_eq!(
            extract_created_id(&json!({"data": {"id": "L-9"}})),
            Some("L-9".to_string())
        );
        assert_eq!(
            extract_created_id(&json!({"id": 42})),
            Some("42".to_string())
        );
        assert_eq!(
            extract_created_id(&json!({"lead_id": "abc"})),
            Some("abc".to_string())
        );
        assert_eq!(extract_created_id(&json!({"ok": true})), None);
    }
}
