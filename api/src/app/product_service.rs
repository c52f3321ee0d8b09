//! Product service
//!
//! Product creation and catalogue listing.

use std::sync::Arc;

use crate::domain::entities::{NewProduct, Page, Paginated, Product, ProductFilter, ProductSort};
use crate::domain::ports::ProductRepository;
use crate::error::AppError;

/// Service for managing products
pub struct ProductService<PR>
where
    PR: ProductRepository + ?Sized,
{
    products: Arc<PR>,
    /// Stock level used by the `low_stock` listing shortcut
    low_stock_threshold: i32,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository + ?Sized,
{
    pub fn new(products: Arc<PR>, low_stock_threshold: i32) -> Self {
        Self {
            products,
            low_stock_threshold,
        }
    }

    /// Create a product after checking price and stock
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, AppError> {
        input.validate()?;

        let product = self.products.create(&input).await?;
        tracing::debug!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// List products; `low_stock` narrows to products under the restock threshold
    pub async fn list_products(
        &self,
        mut filter: ProductFilter,
        low_stock: bool,
        sort: ProductSort,
        page: Page,
    ) -> Result<Paginated<Product>, AppError> {
        if low_stock {
            filter.stock_lt = Some(self.low_stock_threshold);
        }
        Ok(self.products.list(&filter, sort, page).await?)
    }
}
