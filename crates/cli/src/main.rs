//! Toolbelt demo CLI.
//!
//! This binary is the composition root for the payment sample. Responsibilities:
//!
//! 1. **Parse arguments**: `clap` derive; `RUST_LOG` selects the log filter.
//! 2. **Wire observability**: install a `tracing-subscriber` registry with an
//!    `EnvFilter` and a text or JSON formatter. Logs go to stderr so stdout
//!    carries only command output.
//! 3. **Run the command**: submit a payment through
//!    [`payments::PaymentGateway`] or inspect the [`payments::ErrorType`]
//!    taxonomy, printing JSON.
//!
//! A failed payment *outcome* is a normal result and exits `0`. Invalid input,
//! unknown error kinds and unanticipated provider faults exit non-zero.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use payments::{CustomerName, ErrorType, PaymentGateway};
use serde::Serialize;
use toolbelt::ClosedSetValue;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "toolbelt-demo")]
#[command(about = "Explicit outcomes and closed-set error kinds, demonstrated on a payment")]
#[command(version)]
struct Cli {
    /// Log output format (logs are written to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a payment and print its outcome
    Pay {
        /// Customer to charge
        #[arg(short, long)]
        customer: String,

        /// Payment date (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,

        /// Return a receipt on success
        #[arg(long)]
        receipt: bool,
    },

    /// List every declared error kind
    ErrorKinds,

    /// Look up one error kind
    ErrorKind(ErrorKindQuery),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ErrorKindQuery {
    /// Look up by value
    #[arg(long, allow_negative_numbers = true)]
    value: Option<i32>,

    /// Look up by exact display name
    #[arg(long)]
    name: Option<String>,
}

/// JSON view of one error kind.
#[derive(Serialize)]
struct ErrorKindView {
    value: i32,
    display_name: &'static str,
    detail: &'static str,
}

impl From<&ErrorType> for ErrorKindView {
    fn from(error_type: &ErrorType) -> Self {
        Self {
            value: *error_type.value(),
            display_name: error_type.display_name(),
            detail: error_type.detail(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    match cli.command {
        Commands::Pay {
            customer,
            date,
            receipt,
        } => pay(&customer, date.unwrap_or_else(Utc::now), receipt),
        Commands::ErrorKinds => list_error_kinds(),
        Commands::ErrorKind(query) => show_error_kind(query),
    }
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .context("failed to install the tracing subscriber")
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 date: {err}"))
}

fn pay(customer: &str, date: DateTime<Utc>, receipt: bool) -> Result<()> {
    let customer = CustomerName::new(customer).context("invalid customer")?;
    let gateway = PaymentGateway::new();
    tracing::debug!(%customer, %date, receipt, "dispatching pay command");

    let json = if receipt {
        let outcome = gateway
            .capture(date, &customer)
            .context("payment provider failed")?;
        serde_json::to_string(&outcome)?
    } else {
        let outcome = gateway
            .pay(date, &customer)
            .context("payment provider failed")?;
        serde_json::to_string(&outcome)?
    };

    println!("{json}");
    Ok(())
}

fn list_error_kinds() -> Result<()> {
    let views: Vec<ErrorKindView> = ErrorType::all_members()?.map(ErrorKindView::from).collect();
    println!("{}", serde_json::to_string(&views)?);
    Ok(())
}

fn show_error_kind(query: ErrorKindQuery) -> Result<()> {
    let error_type = match (query.value, query.name) {
        (Some(value), _) => ErrorType::from_value(&value)?,
        (None, Some(name)) => ErrorType::from_display_name(&name)?,
        (None, None) => anyhow::bail!("either --value or --name is required"),
    };

    println!("{}", serde_json::to_string(&ErrorKindView::from(error_type))?);
    Ok(())
}
