//! 產品目錄提供者介面

use std::sync::Arc;

use crate::{Product, RawMaterial};

/// 產品目錄提供者
///
/// 實作必須保證：
/// - 產品按價值由高到低排序，價值相同者保持原相對順序
/// - 每一行物料清單都帶有所引用原物料的名稱與現有庫存
///
/// 讀取失敗以 [`crate::PlanError::CatalogUnavailable`] 回報。
pub trait CatalogProvider: Send + Sync {
    /// 讀取按價值遞減排序的產品（含已解析的物料清單）
    fn products_by_value_desc(&self) -> crate::Result<Vec<Product>>;

    /// 讀取所有原物料
    fn raw_materials(&self) -> crate::Result<Vec<RawMaterial>>;
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    fn products_by_value_desc(&self) -> crate::Result<Vec<Product>> {
        (**self).products_by_value_desc()
    }

    fn raw_materials(&self) -> crate::Result<Vec<RawMaterial>> {
        (**self).raw_materials()
    }
}

/// 按價值遞減排序（穩定排序）
pub fn sort_by_value_desc(products: &mut [Product]) {
    products.sort_by(|a, b| b.value.cmp(&a.value));
}

/// 固定內容的產品目錄
///
/// 物料清單行的庫存直接取自建構時給定的產品。
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    raw_materials: Vec<RawMaterial>,
}

impl StaticCatalog {
    /// 創建目錄，產品會先按價值排序
    pub fn new(mut products: Vec<Product>, raw_materials: Vec<RawMaterial>) -> Self {
        sort_by_value_desc(&mut products);
        Self {
            products,
            raw_materials,
        }
    }

    /// 只有產品的目錄
    pub fn from_products(products: Vec<Product>) -> Self {
        Self::new(products, Vec::new())
    }
}

impl CatalogProvider for StaticCatalog {
    fn products_by_value_desc(&self) -> crate::Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn raw_materials(&self) -> crate::Result<Vec<RawMaterial>> {
        Ok(self.raw_materials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case(vec![100, 150, 50], vec![2, 1, 3])]
    #[case(vec![100, 100, 200], vec![3, 1, 2])]
    #[case(vec![10, 10, 10], vec![1, 2, 3])]
    fn test_sort_by_value_desc_is_stable(#[case] values: Vec<i64>, #[case] expected_ids: Vec<i64>) {
        let mut products: Vec<Product> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Product::new(i as i64 + 1, format!("P{}", i + 1), Decimal::from(v)))
            .collect();

        sort_by_value_desc(&mut products);

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected_ids);
    }

    #[test]
    fn test_static_catalog_through_arc() {
        let catalog = Arc::new(StaticCatalog::from_products(vec![
            Product::new(1, "A", Decimal::from(100)),
            Product::new(2, "B", Decimal::from(150)),
        ]));

        let products = catalog.products_by_value_desc().unwrap();
        assert_eq!(products[0].id, 2);
        assert!(catalog.raw_materials().unwrap().is_empty());
    }
}
