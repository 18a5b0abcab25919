//! Product documents for embedding.
//!
//! Each active product becomes one text document: name, description, brand,
//! category, and search keywords. The blake3 content hash keys the embedding
//! cache so unchanged products are not re-embedded on rebuild.

use std::collections::HashMap;

use trellis_core::catalog::ProductId;
use trellis_core::traits::CatalogDump;

/// One embeddable product document.
#[derive(Debug, Clone)]
pub struct ProductDocument {
    pub product_id: ProductId,
    pub text: String,
    pub content_hash: String,
    pub brand_name: String,
    pub category_name: String,
}

/// Build documents for every active product in the dump, resolving brand and
/// category names. Products pointing at unknown references get empty names
/// rather than being dropped — the structured tiers remain authoritative.
pub fn build_documents(dump: &CatalogDump) -> Vec<ProductDocument> {
    let brand_names: HashMap<i64, &str> = dump
        .brands
        .iter()
        .map(|b| (b.id.0, b.name.as_str()))
        .collect();
    let category_names: HashMap<i64, &str> = dump
        .categories
        .iter()
        .map(|c| (c.id.0, c.name.as_str()))
        .collect();

    dump.products
        .iter()
        .filter(|p| p.is_active)
        .map(|product| {
            let brand_name = brand_names
                .get(&product.brand_id.0)
                .copied()
                .unwrap_or_default()
                .to_string();
            let category_name = category_names
                .get(&product.category_id.0)
                .copied()
                .unwrap_or_default()
                .to_string();

            let mut text = format!("{} - {}", product.name, product.description);
            if !brand_name.is_empty() {
                text.push_str(&format!(" {brand_name}"));
            }
            if !category_name.is_empty() {
                text.push_str(&format!(" {category_name}"));
            }
            if !product.keywords.is_empty() {
                text.push(' ');
                text.push_str(&product.keywords.join(" "));
            }

            ProductDocument {
                product_id: product.id.clone(),
                content_hash: blake3::hash(text.as_bytes()).to_hex().to_string(),
                text,
                brand_name,
                category_name,
            }
        })
        .collect()
}
