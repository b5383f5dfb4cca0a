use serde::{Deserialize, Serialize};

// ============ Core Models ============

/// Position of a lead in the sales pipeline.
///
/// A closed enumeration; the remote system serializes these with the exact
/// strings below ("In Progress" contains a space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStage {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Qualified,
    Closed,
    Converted,
}

impl LeadStage {
    /// Parses a stage from its remote string form. Unknown strings are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "New" => Some(LeadStage::New),
            "In Progress" => Some(LeadStage::InProgress),
            "Qualified" => Some(LeadStage::Qualified),
            "Closed" => Some(LeadStage::Closed),
            "Converted" => Some(LeadStage::Converted),
            _ => None,
        }
    }

    /// Parses a stage, treating a blank value as `New`.
    ///
    /// This is the coercion rule shared by the form validator and the bulk
    /// CSV path: absence defaults, garbage does not.
    pub fn parse_or_default(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Some(LeadStage::New)
        } else {
            Self::parse(trimmed)
        }
    }

    /// The remote string form of this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStage::New => "New",
            LeadStage::InProgress => "In Progress",
            LeadStage::Qualified => "Qualified",
            LeadStage::Closed => "Closed",
            LeadStage::Converted => "Converted",
        }
    }
}

impl std::fmt::Display for LeadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lead record as returned by the remote system.
///
/// The `id` and `Stage` are assigned and mutated only remotely; this client
/// is create/read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque identifier assigned by the remote system.
    pub id: String,
    #[serde(rename = "LeadName")]
    pub lead_name: String,
    #[serde(rename = "ContactDetails", default)]
    pub contact_details: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "PCode", default)]
    pub p_code: String,
    /// Monetary deal value. Missing values deserialize as 0.
    #[serde(rename = "Budget", default)]
    pub budget: f64,
    #[serde(rename = "Stage")]
    pub stage: LeadStage,
    #[serde(rename = "LastInteraction", default)]
    pub last_interaction: String,
    #[serde(rename = "AdditionalDetails", default)]
    pub additional_details: Option<String>,
}

/// The canonical, validated client-side lead shape.
///
/// This is the single internal representation; the remote system's ad-hoc
/// casing lives only in the `wire` module below. Produced by
/// `validation::validate_lead_form` (strict) or `bulk` coercion (lenient).
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDraft {
    pub lead_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone, 10 digits in the form variant; may be empty for CSV rows.
    pub phone: String,
    pub deal_value: f64,
    pub stage: LeadStage,
    /// Free-text summary of the last interaction with the lead.
    pub last_interaction: String,
    /// Optional free-text notes; empty when absent.
    pub additional_details: String,
}

// ============ Wire Models ============

/// Mapping layer for the remote lead API.
///
/// The remote contract uses PascalCase attribute names and a fixed set of
/// placeholder fields. This module is the only place that knows about that
/// shape; everything else works with [`LeadDraft`] and [`Lead`].
pub mod wire {
    use super::LeadDraft;
    use crate::session::SessionCredential;
    use serde::Serialize;

    /// Lead source code the partner portal submits under.
    const PARTNER_PORTAL_SOURCE: &str = "10";

    /// Default dialing code attached to submitted contact phones.
    const DEFAULT_COUNTRY_CODE: &str = "+91";

    /// Lead attributes as the create endpoint expects them.
    #[derive(Debug, Clone, Serialize)]
    pub struct WireLeadAttributes {
        #[serde(rename = "Name")]
        pub name: String,
        #[serde(rename = "Email")]
        pub email: String,
        #[serde(rename = "Budget")]
        pub budget: f64,
        #[serde(rename = "Stage")]
        pub stage: String,
        #[serde(rename = "Description")]
        pub description: String,
        #[serde(rename = "Notes")]
        pub notes: String,
        #[serde(rename = "Location")]
        pub location: Option<String>,
        #[serde(rename = "Phone")]
        pub phone: String,
        #[serde(rename = "PCode")]
        pub p_code: String,
        #[serde(rename = "Source")]
        pub source: String,
        #[serde(rename = "Type")]
        pub type_: String,
        #[serde(rename = "Size")]
        pub size: String,
        #[serde(rename = "Category")]
        pub category: String,
        #[serde(rename = "AssignedBy")]
        pub assigned_by: String,
    }

    impl From<&LeadDraft> for WireLeadAttributes {
        fn from(draft: &LeadDraft) -> Self {
            Self {
                name: draft.lead_name.clone(),
                email: draft.email.clone(),
                budget: draft.deal_value,
                stage: draft.stage.as_str().to_string(),
                description: draft.last_interaction.clone(),
                notes: draft.additional_details.clone(),
                location: None,
                phone: draft.phone.clone(),
                p_code: DEFAULT_COUNTRY_CODE.to_string(),
                source: PARTNER_PORTAL_SOURCE.to_string(),
                type_: String::new(),
                size: String::new(),
                category: String::new(),
                assigned_by: String::new(),
            }
        }
    }

    /// Envelope for the create-lead request body: caller identity plus the
    /// lead attributes under the `socialLeads` key.
    #[derive(Debug, Clone, Serialize)]
    pub struct CreateLeadEnvelope {
        #[serde(rename = "Id")]
        pub id: String,
        #[serde(rename = "Token")]
        pub token: String,
        #[serde(rename = "Session")]
        pub session: String,
        #[serde(rename = "socialLeads")]
        pub social_leads: WireLeadAttributes,
    }

    impl CreateLeadEnvelope {
        pub fn new(credential: &SessionCredential, draft: &LeadDraft) -> Self {
            Self {
                id: credential.id.clone(),
                token: credential.token.clone(),
                session: credential.session.clone(),
                social_leads: WireLeadAttributes::from(draft),
            }
        }
    }
}
