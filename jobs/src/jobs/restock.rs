//! Restock: trigger `updateLowStockProducts` and log what changed

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::{append_lines, timestamp};
use crate::client::{ClientError, CrmClient};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockReport {
    pub message: String,
    #[serde(default)]
    pub updated_products: Vec<RestockedProduct>,
}

#[derive(Debug, Deserialize)]
pub struct RestockedProduct {
    pub name: String,
    pub stock: i64,
}

pub fn lines(ts: &str, outcome: &Result<RestockReport, ClientError>) -> Vec<String> {
    match outcome {
        Ok(report) => {
            let mut lines = vec![format!("{} - {}", ts, report.message)];
            lines.extend(
                report
                    .updated_products
                    .iter()
                    .map(|p| format!("  - Product: {}, New Stock: {}", p.name, p.stock)),
            );
            lines
        }
        Err(ClientError::GraphQl(messages)) => {
            vec![format!("{} - ERROR: {}", ts, messages.join("; "))]
        }
        Err(e) => vec![format!("{} - FAILED to execute mutation: {}", ts, e)],
    }
}

pub async fn run(client: &CrmClient, log: &Path) -> Result<()> {
    let ts = timestamp(Local::now());
    let outcome = client
        .execute::<RestockReport>("updateLowStockProducts", json!({}))
        .await;

    match &outcome {
        Ok(report) => tracing::info!(
            restocked = report.updated_products.len(),
            "{}",
            report.message
        ),
        Err(e) => tracing::warn!(error = %e, "Restock failed"),
    }

    append_lines(log, &lines(&ts, &outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{spawn, Reply, TempLog};
    use std::time::Duration;

    #[tokio::test]
    async fn logs_message_and_each_product() {
        let endpoint = spawn(Reply::ok(json!({"data": {"updateLowStockProducts": {
            "message": "Successfully restocked 2 products.",
            "updatedProducts": [
                {"name": "A", "stock": 13, "price": "5.00"},
                {"name": "C", "stock": 19, "price": "5.00"}
            ]
        }}})))
        .await;
        let client = CrmClient::new(&endpoint, Duration::from_secs(2)).unwrap();
        let log = TempLog::new("restock-ok");

        run(&client, &log.path()).await.unwrap();

        let lines = log.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" - Successfully restocked 2 products."));
        assert_eq!(lines[1], "  - Product: A, New Stock: 13");
        assert_eq!(lines[2], "  - Product: C, New Stock: 19");
    }

    #[tokio::test]
    async fn logs_error_payload() {
        let endpoint = spawn(Reply::status(
            500,
            json!({"data": null, "errors": [{"message": "Internal server error", "code": "INTERNAL_ERROR"}]}),
        ))
        .await;
        let client = CrmClient::new(&endpoint, Duration::from_secs(2)).unwrap();
        let log = TempLog::new("restock-error");

        run(&client, &log.path()).await.unwrap();

        assert!(log.lines()[0].ends_with(" - ERROR: Internal server error"));
    }

    #[tokio::test]
    async fn logs_transport_failure() {
        let client = CrmClient::new("http://127.0.0.1:9/graphql", Duration::from_secs(2)).unwrap();
        let log = TempLog::new("restock-down");

        run(&client, &log.path()).await.unwrap();

        assert!(log.lines()[0].contains(" - FAILED to execute mutation: "));
    }

    #[test]
    fn nothing_restocked_is_one_line() {
        let outcome = Ok(RestockReport {
            message: "No low stock products found.".to_string(),
            updated_products: vec![],
        });
        assert_eq!(
            lines("2024-01-01 00:00:00", &outcome),
            vec!["2024-01-01 00:00:00 - No low stock products found."]
        );
    }
}
