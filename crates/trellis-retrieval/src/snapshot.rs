//! The in-memory catalog snapshot — terminal rung of the degradation ladder.
//!
//! Fully materialized at process start, immutable during request handling
//! (an out-of-scope reload job swaps in a fresh `Arc`). Every operation here
//! is pure in-process computation and cannot fail.

use std::collections::{BTreeSet, HashMap, HashSet};

use trellis_core::catalog::{Brand, BrandId, Category, CategoryId, Product, ProductId};
use trellis_core::errors::StoreError;
use trellis_core::models::{ProductFilters, ProductHit};
use trellis_core::traits::{CatalogDump, IProductStore};

use crate::lexicon::{LexicalMatch, LexiconMatcher};

/// Immutable catalog snapshot plus derived lookup tables.
pub struct CatalogSnapshot {
    products: Vec<Product>,
    brands: HashMap<i64, Brand>,
    categories: HashMap<i64, Category>,
    /// Controlled vocabulary, derived from product attributes.
    sizes: BTreeSet<String>,
    colors: BTreeSet<String>,
}

impl CatalogSnapshot {
    /// Build from a dump. Inactive products are dropped here once so no
    /// request-time path needs to re-check.
    pub fn from_dump(dump: CatalogDump) -> Self {
        let products: Vec<Product> = dump.products.into_iter().filter(|p| p.is_active).collect();
        let mut sizes = BTreeSet::new();
        let mut colors = BTreeSet::new();
        for product in &products {
            sizes.extend(product.attributes.sizes.iter().cloned());
            colors.extend(product.attributes.colors.iter().map(|c| c.to_lowercase()));
        }
        Self {
            products,
            brands: dump.brands.into_iter().map(|b| (b.id.0, b)).collect(),
            categories: dump.categories.into_iter().map(|c| (c.id.0, c)).collect(),
            sizes,
            colors,
        }
    }

    /// Load the snapshot from the structured store at process start.
    pub fn load(store: &dyn IProductStore) -> Result<Self, StoreError> {
        Ok(Self::from_dump(store.dump_catalog()?))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // --- Vocabulary / name resolution ---

    pub fn brand_id_by_name(&self, name: &str) -> Option<BrandId> {
        self.brands
            .values()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .map(|b| b.id)
    }

    pub fn category_id_by_name(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.id)
    }

    /// Whether any product is offered in this size (exact match).
    pub fn knows_size(&self, size: &str) -> bool {
        self.sizes.contains(size)
    }

    /// Whether any product is offered in this color (case-insensitive).
    pub fn knows_color(&self, color: &str) -> bool {
        self.colors.contains(&color.to_lowercase())
    }

    /// (id, name) pairs for the lexicon vocabulary.
    pub fn brand_vocabulary(&self) -> Vec<(BrandId, String)> {
        self.brands
            .values()
            .map(|b| (b.id, b.name.clone()))
            .collect()
    }

    pub fn category_vocabulary(&self) -> Vec<(CategoryId, String)> {
        self.categories
            .values()
            .map(|c| (c.id, c.name.clone()))
            .collect()
    }

    // --- Lookups ---

    fn brand_name(&self, id: BrandId) -> String {
        self.brands
            .get(&id.0)
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }

    fn category_name(&self, id: CategoryId) -> String {
        self.categories
            .get(&id.0)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    fn hit(&self, product: &Product) -> ProductHit {
        ProductHit {
            brand_name: self.brand_name(product.brand_id),
            category_name: self.category_name(product.category_id),
            product: product.clone(),
        }
    }

    /// Fetch one product with names resolved.
    pub fn get(&self, id: &ProductId) -> Option<ProductHit> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .map(|p| self.hit(p))
    }

    /// Whether a product's category satisfies a category filter — the
    /// filter category itself or its direct children (shallow tree).
    fn category_matches(&self, product_category: CategoryId, filter: CategoryId) -> bool {
        if product_category == filter {
            return true;
        }
        self.categories
            .get(&product_category.0)
            .and_then(|c| c.parent_id)
            .is_some_and(|parent| parent == filter)
    }

    fn passes(&self, product: &Product, filters: &ProductFilters) -> bool {
        if let Some(category_id) = filters.category_id {
            if !self.category_matches(product.category_id, category_id) {
                return false;
            }
        }
        filters.matches_product(product)
    }

    // --- Fallback search ---

    /// The in-memory equivalent of the structured tier's `filter_search`.
    ///
    /// With `query_text`, the injected lexicon first checks for a
    /// brand/category browse ("nike shoes"); otherwise the text becomes a
    /// case-insensitive substring filter over name + description. Returns
    /// the full match set ordered featured DESC, effective price ASC, id
    /// ASC; the merger owns final ordering and pagination.
    pub fn fallback_search(
        &self,
        query_text: Option<&str>,
        filters: &ProductFilters,
        lexicon: &LexiconMatcher,
    ) -> Vec<ProductHit> {
        let mut effective = filters.clone();
        if let Some(query) = query_text.map(str::trim).filter(|q| !q.is_empty()) {
            match lexicon.detect(query) {
                Some(LexicalMatch::Brand(id)) => effective.brand_id = Some(id),
                Some(LexicalMatch::Category(id)) => effective.category_id = Some(id),
                None => effective.text = Some(query.to_string()),
            }
        }

        let mut hits: Vec<ProductHit> = self
            .products
            .iter()
            .filter(|p| self.passes(p, &effective))
            .map(|p| self.hit(p))
            .collect();
        sort_structured(&mut hits);
        hits
    }

    /// Fallback restricted to candidate ids — used when the structured tier
    /// dies *after* semantic narrowing, preserving that narrowing.
    pub fn fallback_search_within(
        &self,
        ids: &[ProductId],
        filters: &ProductFilters,
    ) -> Vec<ProductHit> {
        let wanted: HashSet<&ProductId> = ids.iter().collect();
        let mut hits: Vec<ProductHit> = self
            .products
            .iter()
            .filter(|p| wanted.contains(&p.id) && self.passes(p, filters))
            .map(|p| self.hit(p))
            .collect();
        sort_structured(&mut hits);
        hits
    }
}

/// The structured default order: featured DESC, effective price ASC, id ASC.
fn sort_structured(hits: &mut [ProductHit]) {
    hits.sort_by(|a, b| {
        b.product
            .is_featured
            .cmp(&a.product.is_featured)
            .then_with(|| a.effective_price().total_cmp(&b.effective_price()))
            .then_with(|| a.product.id.cmp(&b.product.id))
    });
}
