//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Customer, CustomerId, NewCustomer, NewProduct, Product, ProductId,
};

/// Input for `createCustomer` / `bulkCreateCustomers`
pub fn new_customer(name: &str, email: &str, phone: Option<&str>) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(|p| p.to_string()),
    }
}

/// A stored customer with the given email
pub fn test_customer(email: &str) -> Customer {
    let name = email.split('@').next().unwrap_or(email);
    Customer {
        id: CustomerId::new(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        created_at: Utc::now(),
    }
}

/// Input for `createProduct`
pub fn new_product(name: &str, price: Decimal, stock: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: None,
        price,
        stock,
    }
}

/// A stored product priced at 10.00 with the given stock
pub fn test_product(name: &str, stock: i32) -> Product {
    Product {
        id: ProductId::new(),
        name: name.to_string(),
        description: None,
        price: Decimal::new(1000, 2),
        stock,
    }
}

/// A stored product with plenty of stock and the given price
pub fn priced_product(name: &str, price: Decimal) -> Product {
    Product {
        price,
        ..test_product(name, 50)
    }
}
