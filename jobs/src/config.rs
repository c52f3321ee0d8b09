use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/graphql";

/// Where the jobs talk to and where they write
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub endpoint: String,
    pub heartbeat_log: PathBuf,
    pub low_stock_log: PathBuf,
    pub report_log: PathBuf,
    pub reminders_log: PathBuf,
    /// How far back `reminders` looks for orders
    pub reminder_window_days: i64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            heartbeat_log: PathBuf::from("/tmp/crm_heartbeat_log.txt"),
            low_stock_log: PathBuf::from("/tmp/low_stock_updates_log.txt"),
            report_log: PathBuf::from("/tmp/crm_report_log.txt"),
            reminders_log: PathBuf::from("/tmp/order_reminders_log.txt"),
            reminder_window_days: 7,
        }
    }
}

impl JobConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let reminder_window_days = match env::var("CRM_REMINDER_WINDOW_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CRM_REMINDER_WINDOW_DAYS is not a number: {}", raw))?,
            Err(_) => defaults.reminder_window_days,
        };

        Ok(Self {
            endpoint: env::var("CRM_GRAPHQL_ENDPOINT").unwrap_or(defaults.endpoint),
            heartbeat_log: path_var("CRM_HEARTBEAT_LOG", defaults.heartbeat_log),
            low_stock_log: path_var("CRM_LOW_STOCK_LOG", defaults.low_stock_log),
            report_log: path_var("CRM_REPORT_LOG", defaults.report_log),
            reminders_log: path_var("CRM_REMINDERS_LOG", defaults.reminders_log),
            reminder_window_days,
        })
    }
}

fn path_var(name: &str, default: PathBuf) -> PathBuf {
    env::var_os(name).map(PathBuf::from).unwrap_or(default)
}
