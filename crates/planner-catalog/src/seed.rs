//! 種子資料載入（JSON）

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::input::{BomLineInput, ProductInput, RawMaterialInput};
use crate::store::InMemoryCatalog;
use crate::CatalogError;

/// 種子文件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedDocument {
    pub raw_materials: Vec<SeedRawMaterial>,
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRawMaterial {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub stock_quantity: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProduct {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    #[serde(default)]
    pub raw_materials: Vec<SeedBomLine>,
}

/// 以原物料名稱引用的物料清單行
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBomLine {
    pub raw_material_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub required_quantity: Decimal,
}

impl SeedDocument {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::Seed(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// 透過與 CRUD 相同的驗證寫入目錄
    pub fn apply(&self, catalog: &InMemoryCatalog) -> crate::Result<()> {
        let mut ids: HashMap<String, i64> = HashMap::new();

        for material in &self.raw_materials {
            let created = catalog.create_raw_material(RawMaterialInput::new(
                material.name.clone(),
                material.stock_quantity,
            ))?;
            ids.insert(created.name.to_lowercase(), created.id);
        }

        for product in &self.products {
            let lines = product
                .raw_materials
                .iter()
                .map(|line| {
                    ids.get(&line.raw_material_name.trim().to_lowercase())
                        .map(|&id| BomLineInput::new(id, line.required_quantity))
                        .ok_or_else(|| {
                            CatalogError::Seed(format!(
                                "產品 '{}' 引用了不存在的原物料 '{}'",
                                product.name, line.raw_material_name
                            ))
                        })
                })
                .collect::<crate::Result<Vec<_>>>()?;

            catalog.create_product(
                ProductInput::new(product.name.clone(), product.value)
                    .with_bill_of_materials(lines),
            )?;
        }

        tracing::info!(
            "種子資料載入完成：原物料 {} 筆，產品 {} 筆",
            self.raw_materials.len(),
            self.products.len()
        );
        Ok(())
    }
}

impl InMemoryCatalog {
    /// 從種子文件建立目錄
    pub fn from_seed_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let catalog = Self::new();
        SeedDocument::from_file(path)?.apply(&catalog)?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::CatalogProvider;
    use std::io::Write;

    const SEED: &str = r#"{
        "rawMaterials": [
            {"name": "Steel", "stockQuantity": 100},
            {"name": "Aluminum", "stockQuantity": 50.5}
        ],
        "products": [
            {"name": "Product A", "value": 100.00,
             "rawMaterials": [{"rawMaterialName": "steel", "requiredQuantity": 10}]},
            {"name": "Product B", "value": 150.00,
             "rawMaterials": [
                {"rawMaterialName": "Steel", "requiredQuantity": 20},
                {"rawMaterialName": "Aluminum", "requiredQuantity": 0.25}
             ]}
        ]
    }"#;

    #[test]
    fn test_apply_seed_document() {
        let catalog = InMemoryCatalog::new();
        SeedDocument::from_json(SEED).unwrap().apply(&catalog).unwrap();

        assert_eq!(catalog.list_raw_materials().unwrap().len(), 2);
        let products = catalog.products_by_value_desc().unwrap();
        assert_eq!(products[0].name, "Product B");
        assert_eq!(
            products[0].bill_of_materials[1].required_quantity,
            Decimal::new(25, 2)
        );
        assert_eq!(
            products[0].bill_of_materials[1].stock_quantity,
            Decimal::new(505, 1)
        );
    }

    #[test]
    fn test_unknown_material_name() {
        let json = r#"{"products": [{"name": "X", "value": 1,
            "rawMaterials": [{"rawMaterialName": "Wood", "requiredQuantity": 1}]}]}"#;

        let err = SeedDocument::from_json(json)
            .unwrap()
            .apply(&InMemoryCatalog::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Seed(_)));
    }

    #[test]
    fn test_invalid_seed_values_are_rejected() {
        let json = r#"{"rawMaterials": [{"name": "Steel", "stockQuantity": -1}]}"#;

        let err = SeedDocument::from_json(json)
            .unwrap()
            .apply(&InMemoryCatalog::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let catalog = InMemoryCatalog::from_seed_file(file.path()).unwrap();
        assert_eq!(catalog.list_products().unwrap().len(), 2);

        assert!(matches!(
            InMemoryCatalog::from_seed_file("/nonexistent/seed.json"),
            Err(CatalogError::Seed(_))
        ));
    }
}
