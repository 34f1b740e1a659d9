//! Product catalog service: categories and products
//!
//! Categories are stored flat and assembled into a forest on every read;
//! the assembled tree is never cached, only the raw rows are.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::application::services::{cached_list, decode, encode, fetch, matches_search};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Category, CategoryForest, CategoryOption, DomainError, Product, ProductStatus};
use crate::infrastructure::cache::{QueryCache, QueryKey};
use crate::infrastructure::traits::{RecordStore, ResourceKind};

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub parent_id: Option<String>,
    pub description: Option<String>,
}

/// Partial category update. Unset fields keep their stored value;
/// `parent_id: Some(None)` detaches the category and makes it a root.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub parent_id: Option<Option<String>>,
    pub description: Option<String>,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub company_id: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub processes: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
}

/// Partial product update. Only set fields are written; `updated_at` is
/// bumped on every successful update.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub company_id: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProductStatus>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub processes: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// In-memory product list filter.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Substring match on name and description, case-insensitive
    pub search: Option<String>,
    /// Matches either the category or the subcategory reference
    pub category_id: Option<String>,
    pub company_id: Option<String>,
    pub status: Option<ProductStatus>,
}

/// Service for the product catalog: categories and products.
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
    cache: Arc<QueryCache>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    // ---- categories ----

    /// All category rows, flat, in storage order.
    pub fn list_categories(&self) -> ApplicationResult<Vec<Category>> {
        cached_list(self.store.as_ref(), &self.cache, ResourceKind::Categories)
    }

    /// Assemble the category forest from the flat rows.
    ///
    /// Rebuilt on every call; the forest itself is deliberately not cached.
    #[instrument(level = "debug", skip(self))]
    pub fn category_forest(&self) -> ApplicationResult<CategoryForest> {
        let categories = self.list_categories()?;
        Ok(CategoryForest::build(&categories))
    }

    /// Depth-indented options for parent selection dropdowns.
    pub fn category_options(&self) -> ApplicationResult<Vec<CategoryOption>> {
        Ok(self.category_forest()?.flatten())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn create_category(&self, input: NewCategory) -> ApplicationResult<Category> {
        if input.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" }.into());
        }
        if let Some(parent_id) = &input.parent_id {
            // A missing parent is tolerated at read time, but creating one
            // through the service is almost always a typo worth flagging.
            if !self
                .list_categories()?
                .iter()
                .any(|c| &c.id == parent_id)
            {
                warn!(parent_id, "creating category under unknown parent");
            }
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            parent_id: input.parent_id,
            description: input.description,
            created_at: Some(now),
            updated_at: Some(now),
        };
        let row = encode(ResourceKind::Categories, &category)?;
        self.store.insert(ResourceKind::Categories, row)?;
        self.cache.invalidate_kind(ResourceKind::Categories);
        debug!(id = %category.id, "category created");
        Ok(category)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_category(&self, id: &str, patch: CategoryPatch) -> ApplicationResult<Category> {
        let mut category: Category = fetch(self.store.as_ref(), ResourceKind::Categories, id)?;

        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(parent_id) = patch.parent_id {
            if parent_id.as_deref() == Some(id) {
                warn!(id, "refusing to set category as its own parent");
            } else {
                category.parent_id = parent_id;
            }
        }
        if let Some(description) = patch.description {
            category.description = Some(description);
        }
        category.updated_at = Some(Utc::now());

        let row = encode(ResourceKind::Categories, &category)?;
        self.store.update(ResourceKind::Categories, id, row)?;
        self.cache.invalidate_kind(ResourceKind::Categories);
        Ok(category)
    }

    /// Delete a category row. Children are left in place; at the next read
    /// they no longer resolve their parent and surface as roots.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_category(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Categories, id)?;
        self.cache.invalidate_kind(ResourceKind::Categories);
        Ok(())
    }

    // ---- products ----

    pub fn list_products(&self, filter: &ProductFilter) -> ApplicationResult<Vec<Product>> {
        let products: Vec<Product> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Products)?;
        Ok(products
            .into_iter()
            .filter(|p| Self::product_matches(p, filter))
            .collect())
    }

    fn product_matches(product: &Product, filter: &ProductFilter) -> bool {
        if let Some(search) = &filter.search {
            let in_name = matches_search(&product.name, search);
            let in_description = product
                .description
                .as_deref()
                .map(|d| matches_search(d, search))
                .unwrap_or(false);
            if !in_name && !in_description {
                return false;
            }
        }
        if let Some(category_id) = &filter.category_id {
            if &product.category_id != category_id
                && product.subcategory_id.as_ref() != Some(category_id)
            {
                return false;
            }
        }
        if let Some(company_id) = &filter.company_id {
            if &product.company_id != company_id {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if product.status != status {
                return false;
            }
        }
        true
    }

    /// Single product by id, cached under its record key.
    pub fn get_product(&self, id: &str) -> ApplicationResult<Product> {
        let key = QueryKey::record(ResourceKind::Products, id);
        if let Some(row) = self.cache.get(&key) {
            return decode(ResourceKind::Products, row);
        }
        let row = self
            .store
            .get(ResourceKind::Products, id)?
            .ok_or_else(|| {
                ApplicationError::Domain(DomainError::RecordNotFound {
                    kind: "product",
                    id: id.to_string(),
                })
            })?;
        self.cache.put(key, row.clone());
        decode(ResourceKind::Products, row)
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn create_product(&self, input: NewProduct) -> ApplicationResult<Product> {
        if input.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" }.into());
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            category_id: input.category_id,
            subcategory_id: input.subcategory_id,
            company_id: input.company_id,
            description: input.description,
            status: input.status,
            strengths: input.strengths,
            weaknesses: input.weaknesses,
            processes: input.processes,
            tags: input.tags,
            author: input.author,
            created_at: Some(now),
            updated_at: Some(now),
        };
        let row = encode(ResourceKind::Products, &product)?;
        self.store.insert(ResourceKind::Products, row)?;
        self.cache.invalidate_kind(ResourceKind::Products);
        debug!(id = %product.id, "product created");
        Ok(product)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_product(&self, id: &str, patch: ProductPatch) -> ApplicationResult<Product> {
        let mut product: Product = fetch(self.store.as_ref(), ResourceKind::Products, id)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = category_id;
        }
        if let Some(subcategory_id) = patch.subcategory_id {
            product.subcategory_id = Some(subcategory_id);
        }
        if let Some(company_id) = patch.company_id {
            product.company_id = company_id;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(status) = patch.status {
            product.status = status;
        }
        if let Some(strengths) = patch.strengths {
            product.strengths = Some(strengths);
        }
        if let Some(weaknesses) = patch.weaknesses {
            product.weaknesses = Some(weaknesses);
        }
        if let Some(processes) = patch.processes {
            product.processes = Some(processes);
        }
        if let Some(tags) = patch.tags {
            product.tags = tags;
        }
        product.updated_at = Some(Utc::now());

        let row = encode(ResourceKind::Products, &product)?;
        self.store.update(ResourceKind::Products, id, row)?;
        self.cache.invalidate_kind(ResourceKind::Products);
        Ok(product)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_product(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Products, id)?;
        self.cache.invalidate_kind(ResourceKind::Products);
        Ok(())
    }
}
