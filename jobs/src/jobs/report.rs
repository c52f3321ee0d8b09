//! Report: log customer count, order count and revenue in one line

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use serde_json::{json, Value};

use super::{append_lines, timestamp};
use crate::client::{ClientError, CrmClient};

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub customers: u64,
    pub orders: u64,
    /// Kept as the API sent it so decimal places survive
    pub revenue: String,
}

pub fn line(ts: &str, totals: &Result<Totals, ClientError>) -> String {
    match totals {
        Ok(t) => format!(
            "{} - Report: {} customers, {} orders, {} revenue.",
            ts, t.customers, t.orders, t.revenue
        ),
        Err(e) => format!("{} - FAILED to generate report: {}", ts, e),
    }
}

async fn fetch(client: &CrmClient) -> Result<Totals, ClientError> {
    let customers = client.execute("totalCustomerCount", json!({})).await?;
    let orders = client.execute("totalOrderCount", json!({})).await?;
    let revenue = match client.execute::<Value>("totalRevenue", json!({})).await? {
        Value::String(s) => s,
        other => other.to_string(),
    };

    Ok(Totals {
        customers,
        orders,
        revenue,
    })
}

pub async fn run(client: &CrmClient, log: &Path) -> Result<()> {
    let ts = timestamp(Local::now());
    let totals = fetch(client).await;

    if let Err(e) = &totals {
        tracing::warn!(error = %e, "Report failed");
    }

    append_lines(log, &[line(&ts, &totals)])
}
