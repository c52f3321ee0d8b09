//! Mock implementations of port traits
//!
//! In-memory repositories backed by `Arc<RwLock<..>>`, so a clone handed to
//! a service shares state with the one the test keeps for assertions.
//! `failing_writes()` makes every write return a database error before any
//! state is touched, which is how the stores' all-or-nothing guarantee
//! looks from the outside.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::customer::DUPLICATE_EMAIL;
use crate::domain::entities::order::INVALID_CUSTOMER;
use crate::domain::entities::{
    Customer, CustomerFilter, CustomerId, CustomerSort, CustomerSortField, NewCustomer, NewOrder,
    NewProduct, Order, OrderFilter, OrderId, OrderSort, OrderSortField, Page, Paginated, Product,
    ProductFilter, ProductId, ProductSort, ProductSortField, RestockPolicy, Sort,
};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::error::DomainError;

fn mock_failure() -> DomainError {
    DomainError::Database("Mock failure".to_string())
}

fn directed<F>(ordering: Ordering, sort: &Sort<F>) -> Ordering {
    if sort.descending {
        ordering.reverse()
    } else {
        ordering
    }
}

// ============================================================================
// In-Memory Customer Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a customer for testing
    pub fn with_customer(self, customer: Customer) -> Self {
        self.customers
            .write()
            .unwrap()
            .insert(customer.id, customer);
        self
    }

    pub fn failing_writes(self) -> Self {
        *self.should_fail.write().unwrap() = true;
        self
    }

    pub fn len(&self) -> usize {
        self.customers.read().unwrap().len()
    }

    fn stored(input: &NewCustomer) -> Customer {
        Customer {
            id: CustomerId::new(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone.clone().filter(|p| !p.is_empty()),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.read().unwrap().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, DomainError> {
        let customers = self.customers.read().unwrap();
        Ok(ids.iter().filter_map(|id| customers.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        self.create_many(std::slice::from_ref(customer))
            .await
            .map(|mut created| created.remove(0))
    }

    async fn create_many(&self, batch: &[NewCustomer]) -> Result<Vec<Customer>, DomainError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }

        let mut customers = self.customers.write().unwrap();
        let created: Vec<Customer> = batch.iter().map(Self::stored).collect();
        for (i, customer) in created.iter().enumerate() {
            let clash = customers.values().any(|c| c.email == customer.email)
                || created[..i].iter().any(|c| c.email == customer.email);
            if clash {
                return Err(DomainError::validation(DUPLICATE_EMAIL));
            }
        }
        for customer in &created {
            customers.insert(customer.id, customer.clone());
        }
        Ok(created)
    }

    async fn list(
        &self,
        filter: &CustomerFilter,
        sort: CustomerSort,
        page: Page,
    ) -> Result<Paginated<Customer>, DomainError> {
        let mut matched: Vec<Customer> = self
            .customers
            .read()
            .unwrap()
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ordering = match sort.field {
                CustomerSortField::Name => a.name.cmp(&b.name),
                CustomerSortField::Email => a.email.cmp(&b.email),
                CustomerSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            directed(ordering, &sort).then(a.id.0.cmp(&b.id.0))
        });

        Ok(Paginated {
            total_count: matched.len() as u64,
            items: page.apply(matched),
        })
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.len() as u64)
    }
}

// ============================================================================
// In-Memory Product Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products.write().unwrap().insert(product.id, product);
        self
    }

    pub fn failing_writes(self) -> Self {
        *self.should_fail.write().unwrap() = true;
        self
    }

    pub fn len(&self) -> usize {
        self.products.read().unwrap().len()
    }

    /// Current state of a stored product
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.products.read().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }

        let product = Product {
            id: ProductId::new(),
            name: product.name.trim().to_string(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
        };
        self.products
            .write()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: Page,
    ) -> Result<Paginated<Product>, DomainError> {
        let mut matched: Vec<Product> = self
            .products
            .read()
            .unwrap()
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ordering = match sort.field {
                ProductSortField::Name => a.name.cmp(&b.name),
                ProductSortField::Price => a.price.cmp(&b.price),
                ProductSortField::Stock => a.stock.cmp(&b.stock),
            };
            directed(ordering, &sort).then(a.id.cmp(&b.id))
        });

        Ok(Paginated {
            total_count: matched.len() as u64,
            items: page.apply(matched),
        })
    }

    async fn restock_low_stock(
        &self,
        policy: &RestockPolicy,
    ) -> Result<Vec<Product>, DomainError> {
        // One write guard spans selection and update, like the row locks in postgres
        let mut products = self.products.write().unwrap();
        let selected: Vec<ProductId> = products
            .values()
            .filter(|p| p.is_below(policy.threshold))
            .map(|p| p.id)
            .collect();

        if !selected.is_empty() && *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }

        let mut updated = Vec::with_capacity(selected.len());
        for id in selected {
            if let Some(product) = products.get_mut(&id) {
                product.stock += policy.increment;
                updated.push(product.clone());
            }
        }
        updated.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(updated)
    }
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

/// Shares state with the customer and product mocks it is built from, so
/// order creation sees the same rows the services do.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
    customers: InMemoryCustomerRepository,
    products: InMemoryProductRepository,
    should_fail: Arc<RwLock<bool>>,
}

impl InMemoryOrderRepository {
    pub fn new(customers: InMemoryCustomerRepository, products: InMemoryProductRepository) -> Self {
        Self {
            orders: Arc::default(),
            customers,
            products,
            should_fail: Arc::default(),
        }
    }

    pub fn failing_writes(self) -> Self {
        *self.should_fail.write().unwrap() = true;
        self
    }

    pub fn len(&self) -> usize {
        self.orders.read().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.iter().find(|o| o.id == *id).cloned())
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        if self.customers.find_by_id(&order.customer_id).await?.is_none() {
            return Err(DomainError::validation(INVALID_CUSTOMER));
        }

        let found = self.products.find_by_ids(&order.product_ids).await?;
        let total_amount = order.total_for(&found)?;

        let order = Order {
            id: OrderId::new(),
            customer_id: order.customer_id,
            product_ids: order.product_ids.clone(),
            order_date: order.order_date.unwrap_or_else(Utc::now),
            total_amount,
        };
        self.orders.write().unwrap().push(order.clone());
        Ok(order)
    }

    async fn list(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        page: Page,
    ) -> Result<Paginated<Order>, DomainError> {
        let mut matched: Vec<Order> = self
            .orders
            .read()
            .unwrap()
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ordering = match sort.field {
                OrderSortField::OrderDate => a.order_date.cmp(&b.order_date),
                OrderSortField::TotalAmount => a.total_amount.cmp(&b.total_amount),
            };
            directed(ordering, &sort)
        });

        Ok(Paginated {
            total_count: matched.len() as u64,
            items: page.apply(matched),
        })
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.len() as u64)
    }

    async fn total_revenue(&self) -> Result<Decimal, DomainError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.iter().map(|o| o.total_amount).sum())
    }
}
