//! CRM job runner
//!
//! One-shot maintenance jobs meant to be started by cron:
//! - `heartbeat`: check that the API answers
//! - `restock`: top up low-stock products
//! - `report`: log customer/order/revenue totals
//! - `reminders`: log a reminder for every recent order
//!
//! A failed job still exits successfully; the failure is in its log file.

mod client;
mod config;
mod jobs;

#[cfg(test)]
mod test_server;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use config::JobConfig;
use jobs::Job;

fn usage() -> String {
    let names: Vec<String> = Job::ALL.iter().map(|j| j.to_string()).collect();
    format!("usage: crm-jobs <{}>", names.join("|"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so cron mail only carries real output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,crm_jobs=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(arg) = std::env::args().nth(1) else {
        bail!(usage());
    };
    let job: Job = match arg.parse() {
        Ok(job) => job,
        Err(e) => bail!("{}\n{}", e, usage()),
    };

    let config = JobConfig::from_env()?;
    tracing::debug!(%job, endpoint = %config.endpoint, "Running job");

    jobs::run(job, &config).await?;

    tracing::info!(%job, "Job finished");
    Ok(())
}
