use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::domain::entities::restock::{DEFAULT_RESTOCK_INCREMENT, DEFAULT_RESTOCK_THRESHOLD};
use crate::domain::entities::RestockPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Threshold and increment used by `updateLowStockProducts`
    pub restock: RestockPolicy,
    /// Create missing tables on startup
    pub init_schema: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let threshold = parse_var("RESTOCK_THRESHOLD", DEFAULT_RESTOCK_THRESHOLD)?;
        let increment = parse_var("RESTOCK_INCREMENT", DEFAULT_RESTOCK_INCREMENT)?;
        let restock = RestockPolicy::new(threshold, increment)
            .map_err(|e| anyhow::anyhow!("Invalid restock policy: {}", e))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8000)?,
            restock,
            init_schema: parse_var("CRM_INIT_SCHEMA", true)?,
        })
    }
}

/// Read `name`, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_uses_default_when_unset() {
        let value: i32 = parse_var("CRM_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn parse_var_reports_bad_values() {
        env::set_var("CRM_TEST_BAD_PORT", "not-a-port");
        let err = parse_var::<u16>("CRM_TEST_BAD_PORT", 8000).unwrap_err();
        assert!(err.to_string().contains("CRM_TEST_BAD_PORT"));
        env::remove_var("CRM_TEST_BAD_PORT");
    }
}
