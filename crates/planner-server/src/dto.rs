//! 請求/回應資料結構（JSON camelCase，小數以精確數字表示）

use planner_catalog::validation::{check_product_name, check_raw_material_name};
use planner_catalog::{BomLineInput, CatalogError, FieldErrors, ProductInput, RawMaterialInput};
use planner_core::{BomLine, Product, RawMaterial};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

// ---- 請求 ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMaterialRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub stock_quantity: Option<Decimal>,
}

impl RawMaterialRequest {
    pub fn into_input(self) -> ApiResult<RawMaterialInput> {
        let mut errors = FieldErrors::new();
        let stock_quantity = required(self.stock_quantity, "stockQuantity", &mut errors);

        match stock_quantity {
            Some(stock_quantity) if errors.is_empty() => {
                Ok(RawMaterialInput::new(self.name, stock_quantity))
            }
            _ => {
                check_raw_material_name(&self.name, &mut errors);
                Err(CatalogError::Validation(errors).into())
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BomLineRequest {
    pub raw_material_id: Option<i64>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub required_quantity: Option<Decimal>,
}

impl BomLineRequest {
    pub fn into_input(self) -> ApiResult<BomLineInput> {
        let mut errors = FieldErrors::new();
        let line = self.check("", &mut errors);
        line.ok_or_else(|| CatalogError::Validation(errors).into())
    }

    fn check(&self, prefix: &str, errors: &mut FieldErrors) -> Option<BomLineInput> {
        let id = required(
            self.raw_material_id,
            &format!("{}rawMaterialId", prefix),
            errors,
        );
        let quantity = required(
            self.required_quantity,
            &format!("{}requiredQuantity", prefix),
            errors,
        );
        Some(BomLineInput::new(id?, quantity?))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub value: Option<Decimal>,

    /// 省略時（更新）保留原有物料清單
    pub raw_materials: Option<Vec<BomLineRequest>>,
}

impl ProductRequest {
    pub fn into_input(self) -> ApiResult<ProductInput> {
        let mut errors = FieldErrors::new();
        let value = required(self.value, "value", &mut errors);

        let lines: Option<Vec<BomLineInput>> = self.raw_materials.as_ref().map(|lines| {
            lines
                .iter()
                .enumerate()
                .filter_map(|(i, line)| line.check(&format!("rawMaterials[{}].", i), &mut errors))
                .collect()
        });

        match value {
            Some(value) if errors.is_empty() => {
                let input = ProductInput::new(self.name, value);
                Ok(match lines {
                    Some(lines) => input.with_bill_of_materials(lines),
                    None => input,
                })
            }
            _ => {
                check_product_name(&self.name, &mut errors);
                Err(CatalogError::Validation(errors).into())
            }
        }
    }
}

/// 修改用量請求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredQuantityRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub required_quantity: Option<Decimal>,
}

impl RequiredQuantityRequest {
    pub fn into_quantity(self) -> ApiResult<Decimal> {
        let mut errors = FieldErrors::new();
        required(self.required_quantity, "requiredQuantity", &mut errors)
            .ok_or_else(|| CatalogError::Validation(errors).into())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

fn required<T>(value: Option<T>, field: &str, errors: &mut FieldErrors) -> Option<T> {
    if value.is_none() {
        errors.insert(field.to_string(), "此欄位為必填".to_string());
    }
    value
}

// ---- 回應 ----

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialResponse {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub stock_quantity: Decimal,
}

impl From<RawMaterial> for RawMaterialResponse {
    fn from(material: RawMaterial) -> Self {
        Self {
            id: material.id,
            name: material.name,
            stock_quantity: material.stock_quantity,
        }
    }
}

/// 產品的一行物料清單
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRawMaterialResponse {
    pub raw_material_id: i64,
    pub raw_material_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub required_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub stock_quantity: Decimal,
}

impl From<BomLine> for ProductRawMaterialResponse {
    fn from(line: BomLine) -> Self {
        Self {
            raw_material_id: line.raw_material_id,
            raw_material_name: line.raw_material_name,
            required_quantity: line.required_quantity,
            stock_quantity: line.stock_quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    pub raw_materials: Vec<ProductRawMaterialResponse>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            value: product.value,
            raw_materials: product
                .bill_of_materials
                .into_iter()
                .map(ProductRawMaterialResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
