//! Reminders: log one line per order placed within the reminder window
//!
//! Pages through `allOrders` oldest first until `totalCount` orders have been
//! seen. Orders placed while paging land after the current offset.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Duration, Local, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{append_lines, timestamp};
use crate::client::{ClientError, CrmClient};

const PAGE_SIZE: u64 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderPage {
    items: Vec<RecentOrder>,
    total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct RecentOrder {
    pub id: String,
    pub customer: Option<OrderCustomer>,
}

#[derive(Debug, Deserialize)]
pub struct OrderCustomer {
    pub email: String,
}

pub fn lines(ts: &str, outcome: &Result<Vec<RecentOrder>, ClientError>) -> Vec<String> {
    match outcome {
        Ok(orders) if orders.is_empty() => vec![format!("{} - No recent orders found.", ts)],
        Ok(orders) => orders
            .iter()
            .map(|o| {
                let email = o.customer.as_ref().map_or("unknown", |c| c.email.as_str());
                format!("{} - Reminder for Order ID: {}, Customer: {}", ts, o.id, email)
            })
            .collect(),
        Err(e) => vec![format!("{} - ERROR: {}", ts, e)],
    }
}

async fn fetch(client: &CrmClient, since: DateTime<Utc>) -> Result<Vec<RecentOrder>, ClientError> {
    let mut orders = Vec::new();
    loop {
        let page: OrderPage = client
            .execute(
                "allOrders",
                json!({
                    "filter": { "orderDateGte": since.to_rfc3339() },
                    "orderBy": "order_date",
                    "first": PAGE_SIZE,
                    "offset": orders.len(),
                }),
            )
            .await?;

        let fetched = page.items.len();
        orders.extend(page.items);
        if fetched == 0 || orders.len() as u64 >= page.total_count {
            return Ok(orders);
        }
    }
}

pub async fn run(client: &CrmClient, log: &Path, window_days: i64) -> Result<()> {
    let since = Utc::now() - Duration::days(window_days);
    let outcome = fetch(client, since).await;
    let ts = timestamp(Local::now());

    match &outcome {
        Ok(orders) => tracing::info!(reminders = orders.len(), "Order reminders processed"),
        Err(e) => tracing::warn!(error = %e, "Order reminders failed"),
    }

    append_lines(log, &lines(&ts, &outcome))
}
