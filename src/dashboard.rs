//! Lead list presentation and derived metrics.
//!
//! Aggregates are pure functions of the fetched collection and are
//! recomputed on every read; they are never cached apart from the
//! collection they describe, so they always agree with the last successful
//! fetch.

use crate::errors::AppError;
use crate::leads_client::LeadsApiClient;
use crate::models::{Lead, LeadStage};
use crate::session::{self, SessionCredential};

/// Commission rate credited on Closed-stage deals.
pub const COMMISSION_RATE: f64 = 0.10;

/// Read-only aggregates over a lead collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    /// Total lead count.
    pub total_leads: usize,
    /// Leads in the Qualified or Closed stage.
    pub qualified_leads: usize,
    /// Sum of deal value times [`COMMISSION_RATE`] over Closed leads only.
    pub total_commission: f64,
}

/// The fetched collection together with its derived metrics.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub leads: Vec<Lead>,
    pub metrics: DashboardMetrics,
}

/// Computes the dashboard aggregates.
///
/// Leads in any stage other than Closed contribute zero commission.
pub fn compute_metrics(leads: &[Lead]) -> DashboardMetrics {
    let qualified_leads = leads
        .iter()
        .filter(|l| matches!(l.stage, LeadStage::Qualified | LeadStage::Closed))
        .count();
    let total_commission = leads
        .iter()
        .filter(|l| l.stage == LeadStage::Closed)
        .map(|l| l.budget * COMMISSION_RATE)
        .sum();

    DashboardMetrics {
        total_leads: leads.len(),
        qualified_leads,
        total_commission,
    }
}

/// Fetches the caller's lead collection and derives its metrics.
///
/// The credential gate runs before any network attempt; a missing or
/// malformed credential is an explicit error state, not an empty dashboard.
pub async fn fetch_dashboard(
    client: &LeadsApiClient,
    credential: Option<&SessionCredential>,
) -> Result<DashboardSnapshot, AppError> {
    let credential = session::require(credential)?;

    let leads = client.fetch_leads(credential).await?;
    let metrics = compute_metrics(&leads);
    Ok(DashboardSnapshot { leads, metrics })
}
