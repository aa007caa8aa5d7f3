//! 目錄寫入驗證

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use crate::input::{BomLineInput, ProductInput, RawMaterialInput};
use crate::CatalogError;

/// 欄位 → 錯誤訊息
pub type FieldErrors = BTreeMap<String, String>;

/// 驗證原物料參數
pub fn validate_raw_material(input: &RawMaterialInput) -> crate::Result<()> {
    let mut errors = FieldErrors::new();

    check_raw_material_name(&input.name, &mut errors);
    if input.stock_quantity < Decimal::ZERO {
        errors.insert("stockQuantity".to_string(), "庫存數量不可為負".to_string());
    }

    finish(errors)
}

/// 驗證產品參數（含物料清單）
pub fn validate_product(input: &ProductInput) -> crate::Result<()> {
    let mut errors = FieldErrors::new();

    check_product_name(&input.name, &mut errors);
    if input.value <= Decimal::ZERO {
        errors.insert("value".to_string(), "產品價值必須大於 0".to_string());
    }

    if let Some(lines) = &input.bill_of_materials {
        let mut seen = HashSet::new();
        for (index, line) in lines.iter().enumerate() {
            check_bom_line(&format!("rawMaterials[{}]", index), line, &mut errors);
            if !seen.insert(line.raw_material_id) {
                errors.insert(
                    format!("rawMaterials[{}].rawMaterialId", index),
                    format!("原物料 {} 重複", line.raw_material_id),
                );
            }
        }
    }

    finish(errors)
}

/// 驗證單一物料清單行
pub fn validate_bom_line(line: &BomLineInput) -> crate::Result<()> {
    validate_required_quantity(line.required_quantity)
}

/// 驗證用量
pub fn validate_required_quantity(required_quantity: Decimal) -> crate::Result<()> {
    if required_quantity <= Decimal::ZERO {
        return Err(CatalogError::invalid_field(
            "requiredQuantity",
            "需求量必須大於 0",
        ));
    }
    Ok(())
}

/// 原物料名稱不可空白
pub fn check_raw_material_name(name: &str, errors: &mut FieldErrors) {
    check_name(name, "原物料名稱為必填", errors);
}

/// 產品名稱不可空白
pub fn check_product_name(name: &str, errors: &mut FieldErrors) {
    check_name(name, "產品名稱為必填", errors);
}

fn check_name(name: &str, message: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.insert("name".to_string(), message.to_string());
    }
}

fn check_bom_line(prefix: &str, line: &BomLineInput, errors: &mut FieldErrors) {
    if line.required_quantity <= Decimal::ZERO {
        errors.insert(
            format!("{}.requiredQuantity", prefix),
            "需求量必須大於 0".to_string(),
        );
    }
}

fn finish(errors: FieldErrors) -> crate::Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Validation(errors))
    }
}
