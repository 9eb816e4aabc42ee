//! # Product Catalog
//!
//! The static catalog every product page is built from. It is loaded once, before the page
//! actor starts, from a JSON array of [`Product`] records and is read-only afterwards.
//!
//! ```json
//! [
//!   { "id": "sku-1", "name": "Mug", "price": 1200, "currency": "usd" },
//!   { "id": "sku-2", "name": "Tote", "price": 2400, "currency": "usd", "image": "/img/tote.png" }
//! ]
//! ```

use crate::model::{Product, ProductId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {0}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    /// Indexes `products` by id. Every id must be unique.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for product in products {
            if index.contains_key(&product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            index.insert(product.id.clone(), product);
        }
        Ok(Self { products: index })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Reads and indexes the catalog file at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.to_path_buf(), e))?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// Every product id, sorted.
    pub fn ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.products.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sorted() {
        let catalog = Catalog::from_products(vec![
            Product::new("sku-2", "Tote", 2400, "usd"),
            Product::new("sku-1", "Mug", 1200, "usd"),
        ])
        .unwrap();

        assert_eq!(
            catalog.ids(),
            vec![ProductId::from("sku-1"), ProductId::from("sku-2")]
        );
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&"sku-1".into()));
        assert_eq!(catalog.get(&"sku-2".into()).unwrap().name, "Tote");
        assert!(catalog.get(&"sku-404".into()).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_products(vec![
            Product::new("sku-1", "Mug", 1200, "usd"),
            Product::new("sku-1", "Other Mug", 1300, "usd"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "sku-1"));
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"[{ "id": "sku-1", "name": "Mug", "price": 1200, "currency": "usd", "image": "/mug.png" }]"#,
        )
        .unwrap();
        let mug = catalog.get(&"sku-1".into()).unwrap();
        assert_eq!(mug.image.as_deref(), Some("/mug.png"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::Io(..))));
    }
}
