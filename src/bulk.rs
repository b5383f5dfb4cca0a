//! Bulk CSV lead ingestion.
//!
//! The whole file is parsed in memory before any upload begins: a structural
//! parse failure is an all-or-nothing gate. Parsed rows are coerced into
//! lead payloads and submitted one at a time, sequentially, through the same
//! create-lead contract as the single-lead path. The remote API documents
//! no concurrency or ordering guarantee for rapid successive creates on one
//! session, so serialized submission is the conservative choice and keeps
//! the progress count exact.
//!
//! Known limitation: there is no cancellation token. Abandoning an in-flight
//! upload is undefined behavior; rows created before the abandonment remain
//! committed on the remote system.

use crate::errors::AppError;
use crate::leads_client::LeadsApiClient;
use crate::models::{LeadDraft, LeadStage};
use crate::session::{self, SessionCredential};
use crate::validation::coerce_deal_value;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rows are submitted in chunks of this size. Submission stays sequential
/// inside and across chunks; the chunking only paces progress reporting.
pub const UPLOAD_BATCH_SIZE: usize = 5;

/// Header columns a bulk CSV must carry. `additionalDetails` is optional.
const REQUIRED_COLUMNS: [&str; 5] = [
    "leadName",
    "contactDetails",
    "dealValue",
    "stage",
    "lastInteraction",
];

/// One parsed CSV line: an untyped candidate lead, header-keyed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvLeadRow {
    pub lead_name: String,
    pub contact_details: String,
    #[serde(default)]
    pub deal_value: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub last_interaction: String,
    #[serde(default)]
    pub additional_details: Option<String>,
}

impl CsvLeadRow {
    /// Promotes the row to a lead payload.
    ///
    /// Deliberately looser than the form validator: unparsable deal values
    /// fall back to zero, a blank or unknown stage falls back to New, and
    /// missing notes become empty. Stage and deal-value semantics are the
    /// shared `validation`/`models` primitives.
    pub fn coerce(&self) -> LeadDraft {
        LeadDraft {
            lead_name: self.lead_name.clone(),
            email: self.contact_details.clone(),
            phone: String::new(),
            deal_value: coerce_deal_value(&self.deal_value).unwrap_or(0.0),
            stage: LeadStage::parse_or_default(&self.stage).unwrap_or(LeadStage::New),
            last_interaction: self.last_interaction.clone(),
            additional_details: self.additional_details.clone().unwrap_or_default(),
        }
    }
}

/// What to do when a row fails remote creation mid-upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the remaining queue on the first failure. Rows created before
    /// the failing row remain committed remotely. This mirrors the portal's
    /// observed behavior and is the default.
    #[default]
    FailFast,
    /// Attempt every row and report all failures.
    ContinueOnError,
}

/// Phases of a bulk upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    FileSelected(PathBuf),
    Parsing,
    Uploading { uploaded: usize, total: usize },
    Done(BulkOutcome),
}

/// Terminal classification of an upload run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    Success,
    PartialFailure,
    Failure,
}

/// A row that failed remote creation.
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// 1-based data row number (header excluded).
    pub row: usize,
    /// Identifying detail of the failed row.
    pub lead_name: String,
    pub error: AppError,
}

/// Terminal report of a bulk upload.
#[derive(Debug, Clone, Default)]
pub struct BulkReport {
    /// Rows parsed from the file.
    pub total: usize,
    /// Remote identifiers of successfully created leads, in submission order.
    pub created: Vec<String>,
    /// Failed rows; at most one under [`FailurePolicy::FailFast`].
    pub failures: Vec<RowFailure>,
}

impl BulkReport {
    pub fn succeeded(&self) -> usize {
        self.created.len()
    }

    /// Rows never attempted because the queue was aborted.
    pub fn skipped(&self) -> usize {
        self.total - self.created.len() - self.failures.len()
    }

    pub fn outcome(&self) -> BulkOutcome {
        if self.failures.is_empty() {
            BulkOutcome::Success
        } else if self.created.is_empty() {
            BulkOutcome::Failure
        } else {
            BulkOutcome::PartialFailure
        }
    }
}

/// Parses CSV content with a header row into candidate lead rows.
///
/// Any structural error (bad header, malformed record, missing required
/// field) aborts the whole operation; no rows from a malformed file are
/// ever uploaded.
pub fn parse_records(content: &str) -> Result<Vec<CsvLeadRow>, AppError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::Parse(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(AppError::Parse(format!(
                "Missing required column '{}'",
                required
            )));
        }
    }

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<CsvLeadRow>().enumerate() {
        let row = result
            .map_err(|e| AppError::Parse(format!("Failed to parse CSV row {}: {}", index + 1, e)))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Drives a bulk upload: parse gate, coercion, sequential submission.
#[derive(Debug)]
pub struct BulkIngestor {
    policy: FailurePolicy,
    batch_size: usize,
    state: UploadState,
}

impl Default for BulkIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkIngestor {
    pub fn new() -> Self {
        Self {
            policy: FailurePolicy::default(),
            batch_size: UPLOAD_BATCH_SIZE,
            state: UploadState::Idle,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current phase of the ingestor.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Returns the ingestor to `Idle`, dropping any terminal report state.
    pub fn reset(&mut self) {
        self.state = UploadState::Idle;
    }

    /// Ingests a CSV file end to end.
    ///
    /// The credential gate runs before the file is even opened: no
    /// authentication data, no work. `progress` is invoked after each
    /// successful row with `(uploaded_so_far, total)`.
    ///
    /// # Arguments
    ///
    /// * `client` - The lead API client.
    /// * `credential` - The caller's session credential.
    /// * `path` - The CSV file to ingest.
    /// * `progress` - Incremental progress callback.
    pub async fn ingest_file(
        &mut self,
        client: &LeadsApiClient,
        credential: Option<&SessionCredential>,
        path: &Path,
        progress: impl FnMut(usize, usize),
    ) -> Result<BulkReport, AppError> {
        let credential = session::require(credential)?;

        self.state = UploadState::FileSelected(path.to_path_buf());
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        self.state = UploadState::Parsing;
        let rows = match parse_records(&content) {
            Ok(rows) => rows,
            Err(e) => {
                self.state = UploadState::Done(BulkOutcome::Failure);
                return Err(e);
            }
        };
        if rows.is_empty() {
            self.state = UploadState::Done(BulkOutcome::Failure);
            return Err(AppError::Parse("No valid leads found in CSV".to_string()));
        }

        tracing::info!("Parsed {} leads from {}", rows.len(), path.display());

        let report = self.upload_rows(client, credential, &rows, progress).await;
        self.state = UploadState::Done(report.outcome());
        Ok(report)
    }

    /// Submits parsed rows sequentially through the create-lead contract.
    ///
    /// Remote failures are captured in the report rather than returned: the
    /// terminal state always carries total attempted, total created and the
    /// identifying detail of any failed row.
    pub async fn upload_rows(
        &mut self,
        client: &LeadsApiClient,
        credential: &SessionCredential,
        rows: &[CsvLeadRow],
        mut progress: impl FnMut(usize, usize),
    ) -> BulkReport {
        let total = rows.len();
        let mut report = BulkReport {
            total,
            ..BulkReport::default()
        };

        self.state = UploadState::Uploading { uploaded: 0, total };

        'outer: for (chunk_index, batch) in rows.chunks(self.batch_size).enumerate() {
            for (offset, row) in batch.iter().enumerate() {
                let row_number = chunk_index * self.batch_size + offset + 1;
                let draft = row.coerce();

                match client.create_lead(credential, &draft).await {
                    Ok(id) => {
                        report.created.push(id);
                        let uploaded = report.created.len();
                        self.state = UploadState::Uploading { uploaded, total };
                        progress(uploaded, total);
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Row {} ({}) failed: {}",
                            row_number,
                            row.lead_name,
                            e
                        );
                        report.failures.push(RowFailure {
                            row: row_number,
                            lead_name: row.lead_name.clone(),
                            error: e,
                        });
                        if self.policy == FailurePolicy::FailFast {
                            break 'outer;
                        }
                    }
                }
            }
        }

        tracing::info!(
            "Bulk upload finished: {}/{} created, {} failed, {} skipped",
            report.succeeded(),
            report.total,
            report.failures.len(),
            report.skipped()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CSV: &str = "\
leadName,contactDetails,dealValue,stage,lastInteraction,additionalDetails
Alpha Corp,alpha@example.com,1000,New,Intro call,
Beta LLC,beta@example.com,2500,Qualified,Sent proposal,Wants Q3 start
Gamma Inc,gamma@example.com,not-a-number,,Emailed deck,";

    #[test]
    fn parses_rows_and_coerces_values() {
        let rows = parse_records(GOOD_CSV).unwrap();
        assert_eq!(rows.len(), 3);

        let gamma = rows[2].coerce();
        assert_eq!(gamma.deal_value, 0.0);
        assert_eq!(gamma.stage, LeadStage::New);
        assert_eq!(gamma.additional_details, "");

        let beta = rows[1].coerce();
        assert_eq!(beta.deal_value, 2500.0);
        assert_eq!(beta.stage, LeadStage::Qualified);
        assert_eq!(beta.additional_details, "Wants Q3 start");
        assert_eq!(beta.email, "beta@example.com");
        assert_eq!(beta.phone, "");
    }

    #[test]
    fn missing_required_column_is_a_parse_error() {
        let csv = "leadName,dealValue\nAlpha,1000";
        let err = parse_records(csv).unwrap_err();
        match err {
            AppError::Parse(msg) => assert!(msg.contains("contactDetails")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_record_aborts_parsing() {
        // Unclosed quote makes the record structurally invalid.
        let csv = "leadName,contactDetails,dealValue,stage,lastInteraction\n\"Alpha,a@b.com,1,New,call";
        assert!(matches!(parse_records(csv), Err(AppError::Parse(_))));
    }

    #[test]
    fn report_outcomes() {
        let mut report = BulkReport {
            total: 3,
            created: vec!["1".to_string(), "2".to_string()],
            failures: vec![],
        };
        assert_eq!(report.outcome(), BulkOutcome::Success);

        report.failures.push(RowFailure {
            row: 3,
            lead_name: "Gamma Inc".to_string(),
            error: AppError::Network("boom".to_string()),
        });
        assert_eq!(report.outcome(), BulkOutcome::PartialFailure);
        assert_eq!(report.skipped(), 0);

        report.created.clear();
        assert_eq!(report.outcome(), BulkOutcome::Failure);
        assert_eq!(report.skipped(), 2);
    }
}
