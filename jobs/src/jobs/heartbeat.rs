//! Heartbeat: ask the API for `hello` and record whether it answered

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde_json::json;

use super::append_lines;
use crate::client::CrmClient;

pub fn line(at: DateTime<Local>, alive: bool) -> String {
    let status = if alive {
        "alive"
    } else {
        "unreachable or unresponsive"
    };
    format!("{} CRM is {}", at.format("%d/%m/%Y-%H:%M:%S"), status)
}

pub async fn run(client: &CrmClient, log: &Path) -> Result<()> {
    let at = Local::now();
    let alive = match client.execute::<String>("hello", json!({})).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Heartbeat failed");
            false
        }
    };

    append_lines(log, &[line(at, alive)])
}
