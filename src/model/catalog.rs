//! Reference catalogs: sellable products and testing services.
//!
//! Both tables are immutable once loaded and addressable by exact-match
//! lookup on a string identifier. Loading failures are the one place the
//! core surfaces hard errors — every downstream stage assumes the catalogs
//! are present and falls back gracefully on per-row misses instead.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CatalogErrorKind, ErrorContext, Result, RfpError};

/// One sellable SKU from the OEM product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogProduct {
    /// Product identifier (e.g. "CAB-XLPE-11K-3C")
    pub id: String,
    /// Display name
    pub name: String,
    /// Product category (e.g. "HT Power Cable")
    pub category: String,
    /// Voltage rating as printed in the catalog (e.g. "11 kV")
    pub voltage_rating: String,
    /// Conductor material (e.g. "Copper", "Aluminium")
    pub conductor_material: String,
    /// Insulation type (e.g. "XLPE", "PVC")
    pub insulation_type: String,
    /// Core count as printed (e.g. "3 Core")
    pub core_count: String,
    /// Armoring description
    pub armoring: String,
    /// Standards compliance string (e.g. "IS 7098, IEC 60502")
    pub standards_compliance: String,
    /// Whether the product carries BIS certification
    pub bis_certified: bool,
    /// Unit price in INR per meter
    pub unit_price_inr: f64,
    /// Minimum order quantity in meters
    pub min_order_qty_m: u32,
    /// Manufacturing lead time in days
    pub lead_time_days: u32,
    /// Warranty period in years
    pub warranty_years: f64,
}

/// One row of the testing-services price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestService {
    /// Test code (e.g. "HVWT-11KV")
    pub code: String,
    /// Display name
    pub name: String,
    /// Price in INR
    pub price_inr: f64,
    /// Duration in hours
    pub duration_hours: f64,
}

/// Voltage class of a product, derived from its catalog rating string.
///
/// Drives the high-voltage-withstand test filter: only the withstand test
/// matching the selected product's class is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[non_exhaustive]
pub enum VoltageClass {
    /// 11 kV class
    Kv11,
    /// 1.1 kV class
    Kv1_1,
    /// 0.6 kV and below (incl. 415 V / 0.4 kV ratings)
    LowVoltage,
    /// Rating string carries no recognized class token
    Unclassified,
}

impl VoltageClass {
    /// Classify a catalog voltage-rating string.
    ///
    /// Tokens are matched against the lowercased, space-stripped rating, in
    /// the same precedence the pricing rules expect: 11 kV first, then
    /// 1.1 kV, then the low-voltage spellings.
    #[must_use]
    pub fn from_rating(rating: &str) -> Self {
        let v: String = rating.to_lowercase().split_whitespace().collect();
        if v.contains("11kv") {
            Self::Kv11
        } else if v.contains("1.1kv") || v.contains("1.1") {
            Self::Kv1_1
        } else if v.contains("0.6kv") || v.contains("415v") || v.contains("0.4kv") {
            Self::LowVoltage
        } else {
            Self::Unclassified
        }
    }
}

/// Immutable, insertion-ordered product table with id lookup.
///
/// Loaded once per run and threaded explicitly through every stage.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<CatalogProduct>,
    by_id: IndexMap<String, usize>,
}

impl ProductCatalog {
    /// Build a catalog from rows, rejecting duplicate product ids.
    pub fn new(products: Vec<CatalogProduct>) -> Result<Self> {
        let mut by_id = IndexMap::with_capacity(products.len());
        for (idx, product) in products.iter().enumerate() {
            if by_id.insert(product.id.clone(), idx).is_some() {
                return Err(RfpError::duplicate_id("product", &product.id));
            }
        }
        Ok(Self { products, by_id })
    }

    /// Load a catalog from a JSON array of products.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let products: Vec<CatalogProduct> =
            serde_json::from_str(json).context("product catalog")?;
        if products.is_empty() {
            return Err(RfpError::catalog("product catalog", CatalogErrorKind::Empty));
        }
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RfpError::io(path, e))?;
        tracing::debug!(path = %path.display(), "loading product catalog");
        Self::from_json_str(&content)
    }

    /// Exact-match lookup by product id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogProduct> {
        self.by_id.get(id).map(|&idx| &self.products[idx])
    }

    /// Iterate products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogProduct> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Immutable testing-services price table with code lookup.
#[derive(Debug, Clone, Default)]
pub struct TestServiceCatalog {
    services: Vec<TestService>,
    by_code: IndexMap<String, usize>,
}

impl TestServiceCatalog {
    /// Build a catalog from rows, rejecting duplicate test codes.
    pub fn new(services: Vec<TestService>) -> Result<Self> {
        let mut by_code = IndexMap::with_capacity(services.len());
        for (idx, service) in services.iter().enumerate() {
            if by_code.insert(service.code.clone(), idx).is_some() {
                return Err(RfpError::duplicate_id("test service", &service.code));
            }
        }
        Ok(Self { services, by_code })
    }

    /// Load the price table from a JSON array of services.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let services: Vec<TestService> =
            serde_json::from_str(json).context("test service catalog")?;
        Self::new(services)
    }

    /// Load the price table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RfpError::io(path, e))?;
        tracing::debug!(path = %path.display(), "loading test service catalog");
        Self::from_json_str(&content)
    }

    /// Exact-match lookup by test code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&TestService> {
        self.by_code.get(code).map(|&idx| &self.services[idx])
    }

    /// Iterate services in table order.
    pub fn iter(&self) -> impl Iterator<Item = &TestService> {
        self.services.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: "HT Power Cable".to_string(),
            voltage_rating: "11 kV".to_string(),
            conductor_material: "Copper".to_string(),
            insulation_type: "XLPE".to_string(),
            core_count: "3 Core".to_string(),
            armoring: "Galvanized Steel Wire".to_string(),
            standards_compliance: "IS 7098".to_string(),
            bis_certified: true,
            unit_price_inr: 100.0,
            min_order_qty_m: 500,
            lead_time_days: 30,
            warranty_years: 2.0,
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = ProductCatalog::new(vec![product("A"), product("B")]).unwrap();
        assert_eq!(catalog.get("B").map(|p| p.id.as_str()), Some("B"));
        assert!(catalog.get("C").is_none());
    }

    #[test]
    fn duplicate_product_id_rejected() {
        let err = ProductCatalog::new(vec![product("A"), product("A")]).unwrap_err();
        assert!(err.to_string().contains("catalog"));
    }

    #[test]
    fn empty_product_json_rejected() {
        assert!(ProductCatalog::from_json_str("[]").is_err());
    }

    #[test]
    fn voltage_class_tokens() {
        assert_eq!(VoltageClass::from_rating("11 kV"), VoltageClass::Kv11);
        assert_eq!(VoltageClass::from_rating("1.1 kV"), VoltageClass::Kv1_1);
        assert_eq!(VoltageClass::from_rating("0.6 kV"), VoltageClass::LowVoltage);
        assert_eq!(VoltageClass::from_rating("415 V"), VoltageClass::LowVoltage);
        assert_eq!(
            VoltageClass::from_rating("3.5 kV"),
            VoltageClass::Unclassified
        );
    }

    #[test]
    fn voltage_class_11kv_not_confused_with_1_1kv() {
        // "1.1kv" must not classify as 11 kV
        assert_eq!(VoltageClass::from_rating("1.1kV"), VoltageClass::Kv1_1);
    }

    #[test]
    fn test_service_lookup() {
        let catalog = TestServiceCatalog::new(vec![TestService {
            code: "IRT-10M".to_string(),
            name: "Insulation Resistance Test".to_string(),
            price_inr: 12000.0,
            duration_hours: 1.0,
        }])
        .unwrap();
        assert!(catalog.get("IRT-10M").is_some());
        assert!(catalog.get("RT-01").is_none());
    }
}
