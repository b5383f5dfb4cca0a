use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use partner_leads::auth::AuthClient;
use partner_leads::bulk::{BulkIngestor, BulkOutcome, FailurePolicy};
use partner_leads::config::Config;
use partner_leads::dashboard;
use partner_leads::insights::InsightsClient;
use partner_leads::leads_client::LeadsApiClient;
use partner_leads::session::SessionCredential;
use partner_leads::submit::submit_lead;
use partner_leads::validation::{validate_lead_form, LeadFormInput};

#[derive(Parser)]
#[command(name = "partner-leads", about = "Partner lead pipeline client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Request a sign-in OTP for a phone number
    SignIn {
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "+91")]
        country_code: String,
    },
    /// Verify an OTP and store the session credential
    Verify {
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "+91")]
        country_code: String,
        #[arg(long)]
        otp: String,
    },
    /// Validate and submit a single lead
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        deal_value: String,
        #[arg(long, default_value = "New")]
        stage: String,
        #[arg(long)]
        last_interaction: String,
        #[arg(long, default_value = "")]
        details: String,
    },
    /// Upload a CSV of leads
    Upload {
        /// CSV file with a header row
        file: PathBuf,
        /// Attempt every row instead of aborting on the first failure
        #[arg(long)]
        continue_on_error: bool,
    },
    /// Show the lead dashboard
    Dashboard,
    /// Suggest the next best action for a lead
    Insights {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        deal_value: String,
        #[arg(long, default_value = "New")]
        stage: String,
        #[arg(long)]
        last_interaction: String,
        #[arg(long, default_value = "")]
        details: String,
    },
}

/// Main entry point for the CLI.
///
/// Initializes tracing and configuration, then dispatches to the requested
/// operation. Operation errors are reported as user-visible notifications;
/// none of them crash the process with a backtrace.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partner_leads=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let cli = Cli::parse();

    match cli.command {
        Command::SignIn {
            phone,
            country_code,
        } => {
            let client = AuthClient::from_config(&config)?;
            client.request_sign_in_otp(&phone, &country_code).await?;
            println!("OTP sent. Run `partner-leads verify --phone {} --otp <code>`.", phone);
        }
        Command::Verify {
            phone,
            country_code,
            otp,
        } => {
            let client = AuthClient::from_config(&config)?;
            let credential = client
                .verify_otp_and_sign_in(&phone, &country_code, &otp)
                .await?;
            credential.store(&config.session_file)?;
            println!("Signed in. Session stored at {}.", config.session_file.display());
        }
        Command::Submit {
            name,
            email,
            phone,
            deal_value,
            stage,
            last_interaction,
            details,
        } => {
            let input = LeadFormInput {
                lead_name: name,
                email,
                phone,
                deal_value,
                stage,
                last_interaction,
                additional_details: details,
            };
            let credential = load_session(&config);
            let client = LeadsApiClient::from_config(&config)?;

            match submit_lead(&client, credential.as_ref(), &input).await {
                Ok(outcome) => {
                    println!(
                        "Lead created successfully: {} ({})",
                        input.lead_name, outcome.lead_id
                    );
                }
                Err(e) => {
                    eprintln!("Error creating lead: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
        Command::Upload {
            file,
            continue_on_error,
        } => {
            let policy = if continue_on_error {
                FailurePolicy::ContinueOnError
            } else {
                FailurePolicy::FailFast
            };
            let credential = load_session(&config);
            let client = LeadsApiClient::from_config(&config)?;
            let mut ingestor = BulkIngestor::new().with_policy(policy);

            let report = match ingestor
                .ingest_file(&client, credential.as_ref(), &file, |uploaded, total| {
                    println!("Uploaded {} of {} leads...", uploaded, total);
                })
                .await
            {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Upload error: {}", e.user_message());
                    std::process::exit(1);
                }
            };

            match report.outcome() {
                BulkOutcome::Success => {
                    println!(
                        "Bulk upload complete! Successfully uploaded {} leads.",
                        report.succeeded()
                    );
                }
                BulkOutcome::PartialFailure | BulkOutcome::Failure => {
                    println!(
                        "Uploaded {} of {} leads ({} skipped).",
                        report.succeeded(),
                        report.total,
                        report.skipped()
                    );
                    for failure in &report.failures {
                        eprintln!(
                            "Failed to upload lead: {} (row {}): {}",
                            failure.lead_name,
                            failure.row,
                            failure.error.user_message()
                        );
                    }
                    std::process::exit(1);
                }
            }
        }
        Command::Dashboard => {
            let credential = load_session(&config);
            let client = LeadsApiClient::from_config(&config)?;

            match dashboard::fetch_dashboard(&client, credential.as_ref()).await {
                Ok(snapshot) => {
                    let m = &snapshot.metrics;
                    println!("Total Leads:      {}", m.total_leads);
                    println!("Qualified Leads:  {}", m.qualified_leads);
                    println!("Total Commission: ${:.2}", m.total_commission);
                    println!();
                    for lead in &snapshot.leads {
                        println!(
                            "{:<12} {:<24} {:<12} ${:.2}",
                            lead.id, lead.lead_name, lead.stage, lead.budget
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
        Command::Insights {
            name,
            email,
            phone,
            deal_value,
            stage,
            last_interaction,
            details,
        } => {
            let endpoint = config.insights_api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("INSIGHTS_API_URL is not configured")
            })?;
            let input = LeadFormInput {
                lead_name: name,
                email,
                phone,
                deal_value,
                stage,
                last_interaction,
                additional_details: details,
            };
            let draft = match validate_lead_form(&input) {
                Ok(draft) => draft,
                Err(errors) => {
                    for e in errors {
                        eprintln!("{}", e);
                    }
                    std::process::exit(1);
                }
            };

            let client = InsightsClient::new(
                endpoint,
                Duration::from_secs(config.request_timeout_secs),
            )?;
            match client.next_best_action(&draft).await {
                Ok(insights) => {
                    println!("Next best action: {}", insights.next_best_action);
                    println!("Reasoning:        {}", insights.reasoning);
                }
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Loads the stored session credential, if any.
///
/// Absence is not fatal here; each operation runs its own fail-fast
/// credential gate and reports the typed error.
fn load_session(config: &Config) -> Option<SessionCredential> {
    match SessionCredential::load(&config.session_file) {
        Ok(credential) => Some(credential),
        Err(e) => {
            tracing::debug!("No usable session credential: {}", e);
            None
        }
    }
}
