//! Periodic jobs
//!
//! Each job makes its API calls, turns the outcome (success or failure) into
//! log lines and appends them to its file. Only a failure to write the log
//! file is returned as an error.

pub mod heartbeat;
pub mod reminders;
pub mod report;
pub mod restock;

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::client::CrmClient;
use crate::config::JobConfig;

pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Heartbeat,
    Restock,
    Report,
    Reminders,
}

impl Job {
    pub const ALL: [Job; 4] = [Job::Heartbeat, Job::Restock, Job::Report, Job::Reminders];

    pub fn timeout(&self) -> Duration {
        match self {
            Job::Heartbeat => HEARTBEAT_TIMEOUT,
            _ => DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Job::Heartbeat => "heartbeat",
            Job::Restock => "restock",
            Job::Report => "report",
            Job::Reminders => "reminders",
        };
        f.write_str(name)
    }
}

impl FromStr for Job {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heartbeat" => Ok(Job::Heartbeat),
            "restock" => Ok(Job::Restock),
            "report" => Ok(Job::Report),
            "reminders" => Ok(Job::Reminders),
            other => Err(format!("Unknown job: {}", other)),
        }
    }
}

/// Run one job to completion
pub async fn run(job: Job, config: &JobConfig) -> Result<()> {
    let client = CrmClient::new(&config.endpoint, job.timeout())
        .context("Failed to build HTTP client")?;

    match job {
        Job::Heartbeat => heartbeat::run(&client, &config.heartbeat_log).await,
        Job::Restock => restock::run(&client, &config.low_stock_log).await,
        Job::Report => report::run(&client, &config.report_log).await,
        Job::Reminders => {
            reminders::run(&client, &config.reminders_log, config.reminder_window_days).await
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS`, used by every job except the heartbeat
pub fn timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Append `lines` to `path`, one per line, creating the file if needed
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut buf = String::new();
    for line in lines {
        buf.push_str(line);
        buf.push('\n');
    }
    file.write_all(buf.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
