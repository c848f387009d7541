//! Deletes expired, never-activated registrations in one pass.
//!
//! Usage:
//!
//! ```text
//! sweep_registrations <database-url> [window-days]
//! ```
//!
//! The `database-url` must point at the `PostgreSQL` instance holding the
//! `users` and `registration_profiles` tables; `window-days` defaults to 7.
//! Intended to be invoked by cron or any external scheduler; each run
//! performs exactly one sweep and exits.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;

use vestibule::registration::{
    adapters::memory::DiscardNotifier,
    adapters::postgres::{PostgresProfileRepository, PostgresUserDirectory},
    services::{RegistrationConfig, RegistrationError, RegistrationService},
};

/// Sender address placeholder; the sweep never sends mail.
const UNUSED_FROM_ADDRESS: &str = "registration@localhost";

/// Default activation window when none is given.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running the sweep.
#[derive(Debug, Error)]
enum SweepError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to build connection pool: {0}")]
    PoolInit(String),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("sweep failed: {0}")]
    Sweep(#[source] RegistrationError),
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    run(&args).map_err(Into::into)
}

fn run(args: &[String]) -> Result<(), SweepError> {
    let (database_url, window_days) = parse_args(args)?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .build(manager)
        .map_err(|err| SweepError::PoolInit(err.to_string()))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SweepError::RuntimeInit)?;

    let service = RegistrationService::new(
        Arc::new(PostgresUserDirectory::new(pool.clone())),
        Arc::new(PostgresProfileRepository::new(pool)),
        Arc::new(DiscardNotifier::new()),
        Arc::new(DefaultClock),
        RegistrationConfig::new(window_days, UNUSED_FROM_ADDRESS),
    );

    let outcome = runtime
        .block_on(service.sweep_expired())
        .map_err(SweepError::Sweep)?;

    tracing::info!(
        deleted_accounts = outcome.deleted_accounts,
        deleted_orphans = outcome.deleted_orphans,
        "registration sweep finished"
    );
    Ok(())
}

fn parse_args(args: &[String]) -> Result<(String, i64), SweepError> {
    let mut remaining = args.iter().skip(1);
    let database_url = remaining
        .next()
        .ok_or_else(|| SweepError::InvalidArgs("missing database-url argument".into()))?
        .clone();
    let window_days = remaining.next().map_or(Ok(DEFAULT_WINDOW_DAYS), |raw| {
        raw.parse::<i64>()
            .map_err(|_| SweepError::InvalidArgs(format!("invalid window-days '{raw}'")))
    })?;
    if let Some(extra) = remaining.next() {
        return Err(SweepError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    if window_days < 1 {
        return Err(SweepError::InvalidArgs(
            "window-days must be at least 1".into(),
        ));
    }
    Ok((database_url, window_days))
}
