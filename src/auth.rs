//! Sign-in transport.
//!
//! OTP issuance and verification live entirely on the remote backend; this
//! client only moves the requests and turns a successful verification into
//! a [`SessionCredential`].

use crate::config::Config;
use crate::errors::AppError;
use crate::session::SessionCredential;
use serde_json::json;
use std::time::Duration;

/// Client for the remote phone/OTP sign-in endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create auth client: {}", e)))?;

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

    /// Requests a partner sign-in OTP for the given phone number.
    pub async fn request_sign_in_otp(
        &self,
        phone: &str,
        country_code: &str,
    ) -> Result<(), AppError> {
        let url = format!("{}/api/phone/request-partner-otp", self.base_url);
        tracing::info!("Requesting sign-in OTP");

        let body = json!({
            "phone": phone,
            "countryCode": country_code,
            "isSignUp": false,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("OTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        tracing::info!("OTP requested successfully");
        Ok(())
    }

    /// Verifies an OTP and signs the partner in.
    ///
    /// # Returns
    ///
    /// * `Result<SessionCredential, AppError>` - The session bundle required
    ///   on every subsequent authenticated call.
    pub async fn verify_otp_and_sign_in(
        &self,
        phone: &str,
        country_code: &str,
        otp: &str,
    ) -> Result<SessionCredential, AppError> {
        let url = format!("{}/api/phone/verify-partner-signin", self.base_url);
        tracing::info!("Verifying sign-in OTP");

        let body = json!({
            "phone": phone,
            "countryCode": country_code,
            "otp": otp,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("OTP verification failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::Network(format!("Failed to parse sign-in response: {}", e))
        })?;

        // The credential bundle has been observed both at the root and
        // nested under "data".
        let raw = data.get("data").unwrap_or(&data);
        let credential: SessionCredential =
            serde_json::from_value(raw.clone()).map_err(|e| {
                AppError::AuthenticationMissing(format!(
                    "sign-in response did not contain a session bundle: {}",
                    e
                ))
            })?;

        if !credential.is_complete() {
            return Err(AppError::AuthenticationMissing(
                "sign-in response contained an incomplete session bundle".to_string(),
            ));
        }

        tracing::info!("Signed in successfully");
        Ok(credential)
    }
}

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
    AppError::RemoteRejected {
        status: status.as_u16(),
        message,
    }
}
