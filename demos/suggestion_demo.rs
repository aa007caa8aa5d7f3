//! 生產建議範例
//!
//! 建立一個小型家具目錄，計算生產建議並列出結果。

use planner::{
    BomLineInput, InMemoryCatalog, PlannerConfig, ProductInput, ProductionPlanner,
    RawMaterialInput,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("===== 生產建議範例 =====\n");

    // 步驟 1: 原物料庫存
    println!("[1] 建立原物料");
    let catalog = InMemoryCatalog::new();
    let wood = catalog.create_raw_material(RawMaterialInput::new("Wood", Decimal::from(120)))?;
    let steel = catalog.create_raw_material(RawMaterialInput::new("Steel", Decimal::from(40)))?;
    let glue = catalog.create_raw_material(RawMaterialInput::new("Glue", Decimal::from_str("7.5")?))?;
    for material in catalog.list_raw_materials()? {
        println!("    {:<8} 庫存 {}", material.name, material.stock_quantity);
    }
    println!();

    // 步驟 2: 產品與物料清單
    println!("[2] 建立產品");
    catalog.create_product(
        ProductInput::new("Table", Decimal::from_str("450.00")?).with_bill_of_materials(vec![
            BomLineInput::new(wood.id, Decimal::from(30)),
            BomLineInput::new(steel.id, Decimal::from(8)),
            BomLineInput::new(glue.id, Decimal::from_str("1.5")?),
        ]),
    )?;
    catalog.create_product(
        ProductInput::new("Chair", Decimal::from_str("120.00")?).with_bill_of_materials(vec![
            BomLineInput::new(wood.id, Decimal::from(8)),
            BomLineInput::new(glue.id, Decimal::from_str("0.5")?),
        ]),
    )?;
    catalog.create_product(
        ProductInput::new("Shelf", Decimal::from_str("80.00")?)
            .with_bill_of_materials(vec![BomLineInput::new(steel.id, Decimal::from(5))]),
    )?;
    for product in catalog.list_products()? {
        println!("    {:<6} 價值 {}", product.name, product.value);
    }
    println!();

    // 步驟 3: 計算
    println!("[3] 計算生產建議");
    let planner = ProductionPlanner::new(catalog, PlannerConfig::default());
    let result = planner.suggest()?;
    println!("    計算輪數: {}", result.passes);
    for warning in &result.warnings {
        println!("    警告: {}", warning.message);
    }
    println!();

    println!("[4] 結果");
    for item in &result.suggestion.items {
        println!(
            "    {:<6} x {:>3} = {}",
            item.product_name, item.quantity, item.subtotal
        );
    }
    println!("    總價值: {}", result.suggestion.total_value);

    Ok(())
}
