//! 產品與物料清單模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 產品（已解析物料清單）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: i64,

    /// 產品名稱
    pub name: String,

    /// 單位價值
    pub value: Decimal,

    /// 物料清單（每單位用量）
    pub bill_of_materials: Vec<BomLine>,
}

impl Product {
    /// 創建沒有物料清單的產品
    pub fn new(id: i64, name: impl Into<String>, value: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            value,
            bill_of_materials: Vec::new(),
        }
    }

    /// 建構器模式：添加物料清單行
    pub fn with_bom_line(mut self, line: BomLine) -> Self {
        self.bill_of_materials.push(line);
        self
    }

    /// 建構器模式：設置整份物料清單
    pub fn with_bill_of_materials(mut self, lines: Vec<BomLine>) -> Self {
        self.bill_of_materials = lines;
        self
    }

    /// 檢查是否有物料清單
    pub fn has_bill_of_materials(&self) -> bool {
        !self.bill_of_materials.is_empty()
    }

    /// 會限制產量的物料清單行（用量 > 0）
    pub fn constraining_lines(&self) -> impl Iterator<Item = &BomLine> {
        self.bill_of_materials.iter().filter(|line| line.is_constraining())
    }

    /// 用量 <= 0 的物料清單行
    pub fn malformed_lines(&self) -> impl Iterator<Item = &BomLine> {
        self.bill_of_materials
            .iter()
            .filter(|line| !line.is_constraining())
    }
}

/// 物料清單行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    /// 原物料ID
    pub raw_material_id: i64,

    /// 原物料名稱
    pub raw_material_name: String,

    /// 每單位需求量
    pub required_quantity: Decimal,

    /// 讀取目錄時該原物料的現有庫存
    pub stock_quantity: Decimal,
}

impl BomLine {
    /// 創建新的物料清單行
    pub fn new(raw_material_id: i64, required_quantity: Decimal, stock_quantity: Decimal) -> Self {
        Self {
            raw_material_id,
            raw_material_name: String::new(),
            required_quantity,
            stock_quantity,
        }
    }

    /// 建構器模式：設置原物料名稱
    pub fn with_raw_material_name(mut self, name: impl Into<String>) -> Self {
        self.raw_material_name = name.into();
        self
    }

    /// 用量 > 0 才會限制產量
    pub fn is_constraining(&self) -> bool {
        self.required_quantity > Decimal::ZERO
    }
}
