//! 目錄寫入參數

use rust_decimal::Decimal;

/// 原物料新增/更新參數
#[derive(Debug, Clone, PartialEq)]
pub struct RawMaterialInput {
    pub name: String,
    pub stock_quantity: Decimal,
}

impl RawMaterialInput {
    pub fn new(name: impl Into<String>, stock_quantity: Decimal) -> Self {
        Self {
            name: name.into(),
            stock_quantity,
        }
    }
}

/// 物料清單行參數
#[derive(Debug, Clone, PartialEq)]
pub struct BomLineInput {
    pub raw_material_id: i64,
    pub required_quantity: Decimal,
}

impl BomLineInput {
    pub fn new(raw_material_id: i64, required_quantity: Decimal) -> Self {
        Self {
            raw_material_id,
            required_quantity,
        }
    }
}

/// 產品新增/更新參數
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub value: Decimal,

    /// 更新時 `None` 表示保留原有物料清單
    pub bill_of_materials: Option<Vec<BomLineInput>>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
            bill_of_materials: None,
        }
    }

    /// 建構器模式：設置物料清單
    pub fn with_bill_of_materials(mut self, lines: Vec<BomLineInput>) -> Self {
        self.bill_of_materials = Some(lines);
        self
    }
}
