//! Listing filters, sorting and pagination
//!
//! Filters are plain data. The `matches` methods are used by in-memory
//! stores; the PostgreSQL adapter translates the same fields into SQL.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::customer::{Customer, CustomerId};
use super::order::Order;
use super::product::{Product, ProductId};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Page {
    /// Build a page, clamping `first` into `1..=MAX_PAGE_SIZE`
    pub fn new(first: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: first.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0),
        }
    }

    /// Slice an already-sorted collection
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

/// One page of results plus the size of the whole filtered set
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

/// Sort key with direction. Parsed from `"field"` or `"-field"` (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub descending: bool,
}

impl<F> Sort<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl<F> FromStr for Sort<F>
where
    F: FromStr<Err = String>,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('-') {
            Some(field) => Ok(Self::desc(field.parse()?)),
            None => Ok(Self::asc(s.parse()?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSortField {
    Name,
    Email,
    CreatedAt,
}

impl FromStr for CustomerSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(CustomerSortField::Name),
            "email" => Ok(CustomerSortField::Email),
            "created_at" | "createdat" => Ok(CustomerSortField::CreatedAt),
            _ => Err(format!("Unknown customer sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Name,
    Price,
    Stock,
}

impl FromStr for ProductSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(ProductSortField::Name),
            "price" => Ok(ProductSortField::Price),
            "stock" => Ok(ProductSortField::Stock),
            _ => Err(format!("Unknown product sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    OrderDate,
    TotalAmount,
}

impl FromStr for OrderSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "order_date" | "orderdate" => Ok(OrderSortField::OrderDate),
            "total_amount" | "totalamount" => Ok(OrderSortField::TotalAmount),
            _ => Err(format!("Unknown order sort field: {}", s)),
        }
    }
}

pub type CustomerSort = Sort<CustomerSortField>;
pub type ProductSort = Sort<ProductSortField>;
pub type OrderSort = Sort<OrderSortField>;

impl Default for CustomerSort {
    fn default() -> Self {
        Sort::asc(CustomerSortField::Name)
    }
}

impl Default for ProductSort {
    fn default() -> Self {
        Sort::asc(ProductSortField::Name)
    }
}

impl Default for OrderSort {
    fn default() -> Self {
        Sort::desc(OrderSortField::OrderDate)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub name_icontains: Option<String>,
    pub email_icontains: Option<String>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lte: Option<DateTime<Utc>>,
    /// Phone prefix, e.g. `+1`
    pub phone_pattern: Option<String>,
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        self.name_icontains
            .as_deref()
            .map_or(true, |n| contains_ignore_case(&customer.name, n))
            && self
                .email_icontains
                .as_deref()
                .map_or(true, |e| contains_ignore_case(&customer.email, e))
            && self
                .created_at_gte
                .map_or(true, |t| customer.created_at >= t)
            && self
                .created_at_lte
                .map_or(true, |t| customer.created_at <= t)
            && self.phone_pattern.as_deref().map_or(true, |p| {
                customer
                    .phone
                    .as_deref()
                    .is_some_and(|phone| phone.starts_with(p))
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name_icontains: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
    /// Strict upper bound, set from the restock threshold for `lowStock`
    pub stock_lt: Option<i32>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.name_icontains
            .as_deref()
            .map_or(true, |n| contains_ignore_case(&product.name, n))
            && self.price_gte.map_or(true, |p| product.price >= p)
            && self.price_lte.map_or(true, |p| product.price <= p)
            && self.stock_gte.map_or(true, |s| product.stock >= s)
            && self.stock_lte.map_or(true, |s| product.stock <= s)
            && self.stock_lt.map_or(true, |s| product.is_below(s))
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<DateTime<Utc>>,
    pub order_date_lte: Option<DateTime<Utc>>,
    pub customer_id: Option<CustomerId>,
    pub product_id: Option<ProductId>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.total_amount_gte
            .map_or(true, |t| order.total_amount >= t)
            && self
                .total_amount_lte
                .map_or(true, |t| order.total_amount <= t)
            && self.order_date_gte.map_or(true, |d| order.order_date >= d)
            && self.order_date_lte.map_or(true, |d| order.order_date <= d)
            && self.customer_id.map_or(true, |c| order.customer_id == c)
            && self
                .product_id
                .map_or(true, |p| order.product_ids.contains(&p))
    }
}
