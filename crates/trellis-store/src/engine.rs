//! StoreEngine — owns the connection pool, implements `IProductStore`,
//! runs migrations at startup.

use std::path::Path;

use tracing::info;

use trellis_core::catalog::{Brand, Category, CategoryId, InventoryRecord, Product, ProductId};
use trellis_core::config::StoreConfig;
use trellis_core::errors::StoreError;
use trellis_core::models::{ProductFilters, ProductHit, SortOrder};
use trellis_core::traits::{CatalogDump, IProductStore};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The structured store engine.
pub struct StoreEngine {
    pool: ConnectionPool,
    /// When true, reads go through the read pool (file-backed mode). False in
    /// in-memory mode, where read pool connections are isolated databases.
    use_read_pool: bool,
}

impl StoreEngine {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        info!(db = %path.display(), readers = engine.pool.readers.size(), "store opened");
        Ok(engine)
    }

    /// Open from config: file-backed when `db_path` is set, else in-memory.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match &config.db_path {
            Some(path) => Self::open(path, config),
            None => Self::open_in_memory(),
        }
    }

    /// Open an in-memory store (tests and fixtures). Reads route through the
    /// writer since in-memory read connections cannot see its changes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let config = StoreConfig::default();
        let pool = ConnectionPool::open_in_memory(config.busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> Result<(), StoreError> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StoreError>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    // --- Catalog loading (fixtures and the external refresh job) ---

    pub fn load_brands(&self, brands: &[Brand]) -> Result<usize, StoreError> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::catalog_load::load_brands(conn, brands))
    }

    pub fn load_categories(&self, categories: &[Category]) -> Result<usize, StoreError> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::catalog_load::load_categories(conn, categories))
    }

    pub fn load_products(&self, products: &[Product]) -> Result<usize, StoreError> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::catalog_load::load_products(conn, products))
    }

    pub fn load_inventory(&self, records: &[InventoryRecord]) -> Result<usize, StoreError> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::catalog_load::load_inventory(conn, records))
    }
}

impl IProductStore for StoreEngine {
    fn filter_search(
        &self,
        filters: &ProductFilters,
        sort: Option<SortOrder>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ProductHit>, StoreError> {
        self.with_reader(|conn| {
            queries::product_search::filter_search(conn, filters, sort, limit, offset)
        })
    }

    fn search_within(
        &self,
        ids: &[ProductId],
        filters: &ProductFilters,
    ) -> Result<Vec<ProductHit>, StoreError> {
        self.with_reader(|conn| queries::product_search::search_within(conn, ids, filters))
    }

    fn count(&self, filters: &ProductFilters) -> Result<u64, StoreError> {
        self.with_reader(|conn| queries::product_search::count_filtered(conn, filters))
    }

    fn get_product(&self, id: &ProductId) -> Result<Option<ProductHit>, StoreError> {
        self.with_reader(|conn| queries::product_read::get_product(conn, id))
    }

    fn category_id_by_name(&self, name: &str) -> Result<Option<CategoryId>, StoreError> {
        self.with_reader(|conn| queries::product_read::category_id_by_name(conn, name))
    }

    fn product_inventory(&self, id: &ProductId) -> Result<Vec<InventoryRecord>, StoreError> {
        self.with_reader(|conn| queries::inventory_ops::product_inventory(conn, id))
    }

    fn variant_stock(
        &self,
        id: &ProductId,
        size: &str,
        color: &str,
    ) -> Result<Option<InventoryRecord>, StoreError> {
        self.with_reader(|conn| queries::inventory_ops::variant_stock(conn, id, size, color))
    }

    fn dump_catalog(&self) -> Result<CatalogDump, StoreError> {
        self.with_reader(|conn| {
            Ok(CatalogDump {
                brands: queries::product_read::all_brands(conn)?,
                categories: queries::product_read::all_categories(conn)?,
                products: queries::product_read::all_active_products(conn)?,
            })
        })
    }
}
