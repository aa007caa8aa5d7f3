//! 記憶體目錄儲存

use planner_core::{sort_by_value_desc, BomLine, CatalogProvider, Product, RawMaterial};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::input::{BomLineInput, ProductInput, RawMaterialInput};
use crate::validation;
use crate::CatalogError;

/// 產品紀錄（物料清單只存原物料ID與用量）
#[derive(Debug, Clone)]
struct ProductRecord {
    id: i64,
    name: String,
    value: Decimal,
    lines: Vec<BomLineInput>,
}

#[derive(Debug, Default)]
struct CatalogState {
    raw_materials: BTreeMap<i64, RawMaterial>,
    products: BTreeMap<i64, ProductRecord>,
    last_raw_material_id: i64,
    last_product_id: i64,
}

impl CatalogState {
    /// 將物料清單解析為帶有原物料名稱與現有庫存的產品
    fn resolve(&self, record: &ProductRecord) -> Product {
        let lines = record
            .lines
            .iter()
            .map(|line| {
                let (name, stock) = self
                    .raw_materials
                    .get(&line.raw_material_id)
                    .map(|m| (m.name.clone(), m.stock_quantity))
                    .unwrap_or_else(|| (String::new(), Decimal::ZERO));
                BomLine::new(line.raw_material_id, line.required_quantity, stock)
                    .with_raw_material_name(name)
            })
            .collect();

        Product::new(record.id, record.name.clone(), record.value).with_bill_of_materials(lines)
    }

    fn raw_material_name_taken(&self, name: &str, exclude: Option<i64>) -> bool {
        let name = name.trim().to_lowercase();
        self.raw_materials
            .values()
            .any(|m| Some(m.id) != exclude && m.name.to_lowercase() == name)
    }

    fn product_name_taken(&self, name: &str, exclude: Option<i64>) -> bool {
        let name = name.trim().to_lowercase();
        self.products
            .values()
            .any(|p| Some(p.id) != exclude && p.name.to_lowercase() == name)
    }

    fn is_raw_material_referenced(&self, raw_material_id: i64) -> bool {
        self.products
            .values()
            .any(|p| p.lines.iter().any(|l| l.raw_material_id == raw_material_id))
    }

    fn ensure_raw_material(&self, raw_material_id: i64) -> crate::Result<()> {
        if self.raw_materials.contains_key(&raw_material_id) {
            Ok(())
        } else {
            Err(CatalogError::not_found(format!(
                "找不到原物料: {}",
                raw_material_id
            )))
        }
    }

    fn product_record(&self, id: i64) -> crate::Result<&ProductRecord> {
        self.products
            .get(&id)
            .ok_or_else(|| CatalogError::not_found(format!("找不到產品: {}", id)))
    }

    fn product_record_mut(&mut self, id: i64) -> crate::Result<&mut ProductRecord> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(format!("找不到產品: {}", id)))
    }
}

/// 記憶體目錄
///
/// 讀取時才解析物料清單，因此產品永遠帶著原物料的最新庫存。
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> crate::Result<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|_| CatalogError::Unavailable("目錄鎖已損毀".to_string()))
    }

    fn write(&self) -> crate::Result<RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|_| CatalogError::Unavailable("目錄鎖已損毀".to_string()))
    }

    // ---- 原物料 ----

    /// 依名稱排序列出原物料
    pub fn list_raw_materials(&self) -> crate::Result<Vec<RawMaterial>> {
        let state = self.read()?;
        let mut materials: Vec<RawMaterial> = state.raw_materials.values().cloned().collect();
        materials.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(materials)
    }

    pub fn raw_material(&self, id: i64) -> crate::Result<RawMaterial> {
        self.read()?
            .raw_materials
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("找不到原物料: {}", id)))
    }

    /// 名稱包含關鍵字的原物料（不分大小寫，空白關鍵字回傳全部）
    pub fn search_raw_materials(&self, term: &str) -> crate::Result<Vec<RawMaterial>> {
        let term = term.trim();
        Ok(self
            .list_raw_materials()?
            .into_iter()
            .filter(|m| term.is_empty() || m.name_contains(term))
            .collect())
    }

    pub fn create_raw_material(&self, input: RawMaterialInput) -> crate::Result<RawMaterial> {
        validation::validate_raw_material(&input)?;

        let mut state = self.write()?;
        if state.raw_material_name_taken(&input.name, None) {
            return Err(CatalogError::business(format!(
                "原物料名稱 '{}' 已存在",
                input.name
            )));
        }

        state.last_raw_material_id += 1;
        let material = RawMaterial::new(
            state.last_raw_material_id,
            input.name.trim(),
            input.stock_quantity,
        );
        state.raw_materials.insert(material.id, material.clone());

        tracing::debug!("新增原物料 {} ({})", material.id, material.name);
        Ok(material)
    }

    pub fn update_raw_material(
        &self,
        id: i64,
        input: RawMaterialInput,
    ) -> crate::Result<RawMaterial> {
        validation::validate_raw_material(&input)?;

        let mut state = self.write()?;
        state.ensure_raw_material(id)?;
        if state.raw_material_name_taken(&input.name, Some(id)) {
            return Err(CatalogError::business(format!(
                "原物料名稱 '{}' 已存在",
                input.name
            )));
        }

        let material = RawMaterial::new(id, input.name.trim(), input.stock_quantity);
        state.raw_materials.insert(id, material.clone());
        Ok(material)
    }

    /// 刪除原物料（仍被任何產品引用時拒絕）
    pub fn delete_raw_material(&self, id: i64) -> crate::Result<()> {
        let mut state = self.write()?;
        state.ensure_raw_material(id)?;
        if state.is_raw_material_referenced(id) {
            return Err(CatalogError::business("原物料仍被產品引用，無法刪除"));
        }

        state.raw_materials.remove(&id);
        tracing::debug!("刪除原物料 {}", id);
        Ok(())
    }

    // ---- 產品 ----

    /// 依ID排序列出產品
    pub fn list_products(&self) -> crate::Result<Vec<Product>> {
        let state = self.read()?;
        Ok(state.products.values().map(|p| state.resolve(p)).collect())
    }

    pub fn product(&self, id: i64) -> crate::Result<Product> {
        let state = self.read()?;
        let record = state.product_record(id)?;
        Ok(state.resolve(record))
    }

    pub fn create_product(&self, input: ProductInput) -> crate::Result<Product> {
        validation::validate_product(&input)?;

        let mut state = self.write()?;
        if state.product_name_taken(&input.name, None) {
            return Err(CatalogError::business(format!(
                "產品名稱 '{}' 已存在",
                input.name
            )));
        }

        let lines = input.bill_of_materials.unwrap_or_default();
        for line in &lines {
            state.ensure_raw_material(line.raw_material_id)?;
        }

        state.last_product_id += 1;
        let record = ProductRecord {
            id: state.last_product_id,
            name: input.name.trim().to_string(),
            value: input.value,
            lines,
        };
        let product = state.resolve(&record);
        state.products.insert(record.id, record);

        tracing::debug!("新增產品 {} ({})", product.id, product.name);
        Ok(product)
    }

    /// 更新產品；提供物料清單時整份取代，否則保留原清單
    pub fn update_product(&self, id: i64, input: ProductInput) -> crate::Result<Product> {
        validation::validate_product(&input)?;

        let mut state = self.write()?;
        state.product_record(id)?;
        if state.product_name_taken(&input.name, Some(id)) {
            return Err(CatalogError::business(format!(
                "產品名稱 '{}' 已存在",
                input.name
            )));
        }
        if let Some(lines) = &input.bill_of_materials {
            for line in lines {
                state.ensure_raw_material(line.raw_material_id)?;
            }
        }

        let record = state.product_record_mut(id)?;
        record.name = input.name.trim().to_string();
        record.value = input.value;
        if let Some(lines) = input.bill_of_materials {
            record.lines = lines;
        }

        let record = state.product_record(id)?;
        Ok(state.resolve(record))
    }

    pub fn delete_product(&self, id: i64) -> crate::Result<()> {
        let mut state = self.write()?;
        state.product_record(id)?;
        state.products.remove(&id);
        tracing::debug!("刪除產品 {}", id);
        Ok(())
    }

    /// 為產品新增一行物料清單（同一原物料只能關聯一次）
    pub fn add_bom_line(&self, product_id: i64, line: BomLineInput) -> crate::Result<Product> {
        validation::validate_bom_line(&line)?;

        let mut state = self.write()?;
        let record = state.product_record(product_id)?;
        if record
            .lines
            .iter()
            .any(|l| l.raw_material_id == line.raw_material_id)
        {
            return Err(CatalogError::business("此原物料已與產品關聯"));
        }
        state.ensure_raw_material(line.raw_material_id)?;

        state.product_record_mut(product_id)?.lines.push(line);
        let record = state.product_record(product_id)?;
        Ok(state.resolve(record))
    }

    /// 修改產品對某原物料的用量
    pub fn update_bom_line(
        &self,
        product_id: i64,
        raw_material_id: i64,
        required_quantity: Decimal,
    ) -> crate::Result<Product> {
        validation::validate_required_quantity(required_quantity)?;

        let mut state = self.write()?;
        let line = state
            .product_record_mut(product_id)?
            .lines
            .iter_mut()
            .find(|l| l.raw_material_id == raw_material_id)
            .ok_or_else(|| CatalogError::not_found("找不到原物料關聯"))?;
        line.required_quantity = required_quantity;

        let record = state.product_record(product_id)?;
        Ok(state.resolve(record))
    }

    /// 移除產品與某原物料的關聯
    pub fn remove_bom_line(&self, product_id: i64, raw_material_id: i64) -> crate::Result<Product> {
        let mut state = self.write()?;
        let record = state.product_record_mut(product_id)?;
        let before = record.lines.len();
        record.lines.retain(|l| l.raw_material_id != raw_material_id);
        if record.lines.len() == before {
            return Err(CatalogError::not_found("找不到原物料關聯"));
        }

        let record = state.product_record(product_id)?;
        Ok(state.resolve(record))
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn products_by_value_desc(&self) -> planner_core::Result<Vec<Product>> {
        let mut products = self.list_products()?;
        sort_by_value_desc(&mut products);
        Ok(products)
    }

    fn raw_materials(&self) -> planner_core::Result<Vec<RawMaterial>> {
        Ok(self.list_raw_materials()?)
    }
}
