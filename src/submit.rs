//! Single lead submission.
//!
//! Validate one structured form submission and send it through the remote
//! create-lead contract. No retry: a failed submission requires explicit
//! resubmission, with the user's entered values preserved.

use crate::errors::AppError;
use crate::leads_client::LeadsApiClient;
use crate::session::{self, SessionCredential};
use crate::validation::{validate_lead_form, LeadFormInput};

/// Result of a successful single-lead submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Identifier assigned to the new record by the remote system.
    pub lead_id: String,
}

/// Validates and submits one lead.
///
/// Order matters: schema validation first (nothing leaves the client on
/// failure), then the fail-fast credential check (no network attempt
/// without authentication data), then exactly one create call.
pub async fn submit_lead(
    client: &LeadsApiClient,
    credential: Option<&SessionCredential>,
    input: &LeadFormInput,
) -> Result<SubmitOutcome, AppError> {
    let draft = validate_lead_form(input).map_err(AppError::Validation)?;
    let credential = session::require(credential)?;

    let lead_id = client.create_lead(credential, &draft).await?;
    Ok(SubmitOutcome { lead_id })
}

/// Form state for the single-lead screen.
///
/// Owns the entered values so the reset/preserve contract is explicit: a
/// successful submission resets the form to its defaults, any failure leaves
/// the input untouched for correction and resubmission.
#[derive(Debug, Default, Clone)]
pub struct LeadForm {
    pub input: LeadFormInput,
}

impl LeadForm {
    pub fn new(input: LeadFormInput) -> Self {
        Self { input }
    }

    /// Submits the current form values.
    pub async fn submit(
        &mut self,
        client: &LeadsApiClient,
        credential: Option<&SessionCredential>,
    ) -> Result<SubmitOutcome, AppError> {
        let outcome = submit_lead(client, credential, &self.input).await?;
        self.input = LeadFormInput::default();
        Ok(outcome)
    }
}
