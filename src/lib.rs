//! Partner Leads Pipeline Library
//!
//! This library provides the core functionality of the partner lead
//! pipeline: lead schema validation, single and bulk lead intake against
//! the remote lead API, dashboard aggregation, and the thin sign-in and
//! suggestion-model transports.
//!
//! # Modules
//!
//! - `auth`: Remote OTP sign-in transport.
//! - `bulk`: Bulk CSV ingestion and sequential upload.
//! - `config`: Configuration management.
//! - `dashboard`: Lead list fetching and derived metrics.
//! - `errors`: Error handling types.
//! - `insights`: Next-best-action suggestion client.
//! - `leads_client`: Remote lead API client.
//! - `models`: Core data models and the wire mapping layer.
//! - `session`: Session credential context.
//! - `submit`: Single lead submission.
//! - `validation`: Lead schema validation rules.

pub mod auth;
pub mod bulk;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod insights;
pub mod leads_client;
pub mod models;
pub mod session;
pub mod submit;
pub mod validation;
