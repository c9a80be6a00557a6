// SPDX-License-Identifier: MIT
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::error;

use uxprobe::audit::verify::{verify_audit, verify_share};
use uxprobe::audit::AuditClient;
use uxprobe::config::ProbeConfig;
use uxprobe::error::ProbeError;
use uxprobe::rest::{start_status_server, STATUS_PORT};
use uxprobe::scenarios::{self, ScenarioOutcome};
use uxprobe::AppContext;

#[derive(Parser)]
#[command(
    name = "uxprobe",
    about = "UX Audit verification toolkit — status endpoints and end-to-end probes",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the audit application under verification
    #[arg(long, env = "UXPROBE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "UXPROBE_LOG", global = true)]
    log: Option<String>,

    /// Suppress progress and informational output.
    ///
    /// Errors are still printed to stderr.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the status/diagnostics HTTP server.
    ///
    /// Serves GET /api/health and GET /api/diagnostics on localhost.
    Serve {
        /// Port to bind
        #[arg(long, env = "UXPROBE_PORT")]
        port: Option<u16>,
    },
    /// Verify the audit API end to end.
    ///
    /// POSTs an audit request for URL, prints the key insights,
    /// recommendations, and first issue, and scans the response wording.
    Audit {
        /// Page to audit
        url: String,
    },
    /// Verify the share-report API.
    ///
    /// POSTs a canned share request and prints the acknowledgement.
    Share {
        /// Recipient email for the shared report
        #[arg(long, default_value = "design-team@example.com")]
        email: String,
        /// Recipient display name
        #[arg(long, default_value = "Design Team")]
        name: String,
    },
    /// Run a browser-driven UI scenario against the audit app.
    Scenario {
        #[command(subcommand)]
        which: ScenarioCommand,
    },
}

#[derive(Subcommand)]
enum ScenarioCommand {
    /// Submit a URL and capture the image analysis tab.
    ImageTab {
        /// Page to audit
        url: String,
    },
    /// Submit a URL and capture the audit report (Deep Dive when offered).
    AuditReport {
        /// Page to audit
        url: String,
    },
    /// Demo walkthrough against a known page.
    CaseStudy {
        /// Page to audit (defaults to the built-in case study URL)
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    let log_level = args.log.as_deref().unwrap_or(default_level);
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .init();

    let mut config = ProbeConfig::from_env();
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }

    match args.command {
        Command::Serve { port } => {
            let ctx = Arc::new(AppContext::new(config));
            start_status_server(ctx, port.unwrap_or(STATUS_PORT)).await?;
        }
        Command::Audit { url } => {
            let client = AuditClient::new(&config.base_url)?;
            match verify_audit(&client, &url).await {
                Ok(report) => {
                    println!("Key insights:");
                    for insight in &report.key_insights {
                        println!("  - {insight}");
                    }
                    println!("Recommendations:");
                    for rec in &report.recommendations {
                        println!("  - {rec}");
                    }
                    match &report.first_issue {
                        Some(issue) => {
                            println!("First issue: {}", issue.title);
                            if !issue.description.is_empty() {
                                println!("  {}", issue.description);
                            }
                        }
                        None => println!("First issue: none reported"),
                    }
                    println!("Language: {}", report.language.label());
                }
                Err(e) => report_failure("audit", &e),
            }
        }
        Command::Share { email, name } => {
            let client = AuditClient::new(&config.base_url)?;
            match verify_share(&client, &email, &name).await {
                Ok(report) => {
                    println!("Share acknowledged: {}", report.acknowledgement);
                }
                Err(e) => report_failure("share-report", &e),
            }
        }
        Command::Scenario { which } => {
            let result = match which {
                ScenarioCommand::ImageTab { url } => {
                    scenarios::image_tab::run(&config, &url).await
                }
                ScenarioCommand::AuditReport { url } => {
                    scenarios::audit_report::run(&config, &url).await
                }
                ScenarioCommand::CaseStudy { url } => {
                    scenarios::case_study::run(&config, url.as_deref()).await
                }
            };
            match result {
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => report_failure("scenario", &e),
            }
        }
    }

    Ok(())
}

/// Log a verification failure in its bucket. The run is terminal either
/// way; there is no caller to hand a structured error to.
fn report_failure(flow: &str, e: &ProbeError) {
    match e {
        ProbeError::Server { status, body } => {
            error!(flow, status = *status, body = %body, "server returned an error status");
        }
        ProbeError::Network(msg) => {
            error!(flow, %msg, "no response from server");
        }
        ProbeError::Schema(msg) => {
            error!(flow, %msg, "response shape mismatch");
        }
        ProbeError::Client(msg) | ProbeError::Ui(msg) => {
            error!(flow, %msg, "verification failed");
        }
    }
}

fn print_outcome(outcome: &ScenarioOutcome) {
    for shot in &outcome.screenshots {
        println!("Saved {shot}");
    }
    if outcome.analysis_timed_out {
        println!("Analysis did not finish within the deadline (fallback captured)");
    }
    if let Some(found) = outcome.deep_dive_found {
        println!("Deep Dive: {}", if found { "captured" } else { "not offered" });
    }
}
