//! Lead schema validation.
//!
//! Single source of truth for what an acceptable lead is. The single-lead
//! form goes through [`validate_lead_form`]; the bulk CSV path reuses the
//! same stage and deal-value primitives with its documented lenient
//! coercion (`bulk` module).

use crate::errors::FieldError;
use crate::models::{LeadDraft, LeadStage};
use regex::Regex;

/// Minimum lead name length.
const MIN_NAME_LEN: usize = 2;

/// Minimum last-interaction summary length.
const MIN_INTERACTION_LEN: usize = 5;

/// Raw single-lead form values, exactly as entered.
///
/// Everything is a string here; coercion happens during validation so the
/// caller's input survives a failed submission unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFormInput {
    pub lead_name: String,
    pub email: String,
    pub phone: String,
    pub deal_value: String,
    pub stage: String,
    pub last_interaction: String,
    pub additional_details: String,
}

impl Default for LeadFormInput {
    /// The form's default (reset) values.
    fn default() -> Self {
        Self {
            lead_name: String::new(),
            email: String::new(),
            phone: String::new(),
            deal_value: "0".to_string(),
            stage: "New".to_string(),
            last_interaction: String::new(),
            additional_details: String::new(),
        }
    }
}

/// Validate email address
///
/// Checks for:
/// - Basic email format (contains @ and .)
/// - Minimum length requirements
/// - Valid domain structure
pub fn is_valid_email(email: &str) -> bool {
    // Basic checks
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    email_regex.is_match(email)
}

/// Validate a contact phone for the form variant: exactly 10 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Coerce a raw deal-value string to a number.
///
/// Returns `None` when the string does not parse as a finite number at all;
/// the caller decides whether unparsable input is an error (form) or falls
/// back to zero (bulk).
pub fn coerce_deal_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validates a raw form submission into a [`LeadDraft`].
///
/// All rules are evaluated; errors accumulate per field so the caller can
/// show every problem at once. Nothing leaves the client when this fails.
pub fn validate_lead_form(input: &LeadFormInput) -> Result<LeadDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let lead_name = input.lead_name.trim();
    if lead_name.chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "leadName",
            "Lead name must be at least 2 characters.",
        ));
    }

    let email = input.email.trim();
    if !is_valid_email(email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address.",
        ));
    }

    let phone = input.phone.trim();
    if !is_valid_phone(phone) {
        errors.push(FieldError::new(
            "phone",
            "Phone number must be exactly 10 digits.",
        ));
    }

    let deal_value = match coerce_deal_value(&input.deal_value) {
        Some(v) if v > 0.0 => Some(v),
        _ => {
            errors.push(FieldError::new(
                "dealValue",
                "Deal value must be a positive number.",
            ));
            None
        }
    };

    let stage = match LeadStage::parse_or_default(&input.stage) {
        Some(s) => Some(s),
        None => {
            errors.push(FieldError::new("stage", "Unknown stage."));
            None
        }
    };

    let last_interaction = input.last_interaction.trim();
    if last_interaction.chars().count() < MIN_INTERACTION_LEN {
        errors.push(FieldError::new(
            "lastInteraction",
            "Please describe the last interaction.",
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LeadDraft {
        lead_name: lead_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        // Both unwraps guarded by the empty-errors check above.
        deal_value: deal_value.unwrap(),
        stage: stage.unwrap(),
        last_interaction: last_interaction.to_string(),
        additional_details: input.additional_details.trim().to_string(),
    })
}
