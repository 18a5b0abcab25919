use crate::catalog::{Brand, Category, CategoryId, InventoryRecord, Product, ProductId};
use crate::errors::StoreError;
use crate::models::{ProductFilters, ProductHit, SortOrder};

/// Full reference-data dump, used to (re)build the in-memory snapshot at
/// process start.
#[derive(Debug, Clone, Default)]
pub struct CatalogDump {
    pub brands: Vec<Brand>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

/// The structured store: exact filtering, lookups, and inventory.
///
/// Every method either answers fully or fails with a distinct error —
/// connectivity problems are never masked as empty results.
pub trait IProductStore: Send + Sync {
    // --- Search ---

    /// Exact-filter search. Default order is featured DESC, effective price
    /// ASC, id ASC; an explicit `sort` replaces it with a pure effective
    /// price order (ties by id). `limit`/`offset` page the ordered set.
    fn filter_search(
        &self,
        filters: &ProductFilters,
        sort: Option<SortOrder>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ProductHit>, StoreError>;

    /// Like [`filter_search`](Self::filter_search), but restricted to the
    /// given candidate ids. Returns every match (the candidate set is
    /// already bounded); ordering is left to the merger.
    fn search_within(
        &self,
        ids: &[ProductId],
        filters: &ProductFilters,
    ) -> Result<Vec<ProductHit>, StoreError>;

    /// Number of products matching the filters, ignoring pagination.
    fn count(&self, filters: &ProductFilters) -> Result<u64, StoreError>;

    // --- Lookups ---

    fn get_product(&self, id: &ProductId) -> Result<Option<ProductHit>, StoreError>;

    /// Resolve a category by name, case-insensitively.
    fn category_id_by_name(&self, name: &str) -> Result<Option<CategoryId>, StoreError>;

    // --- Inventory ---

    /// All variant records for a product, ordered by (size, color).
    fn product_inventory(&self, id: &ProductId) -> Result<Vec<InventoryRecord>, StoreError>;

    /// The record for one (product, size, color) variant; color matches
    /// case-insensitively. `None` means the variant is not carried.
    fn variant_stock(
        &self,
        id: &ProductId,
        size: &str,
        color: &str,
    ) -> Result<Option<InventoryRecord>, StoreError>;

    // --- Snapshot support ---

    /// Dump all reference data for snapshot building at process start.
    fn dump_catalog(&self) -> Result<CatalogDump, StoreError>;
}
