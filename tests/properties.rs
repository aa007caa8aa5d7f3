//! 生產建議的性質測試

use planner::{
    sort_by_value_desc, AllocationEngine, BomLine, FeasibilityCalculator, PlannerConfig, Product,
    ProductionSuggestion, StockSnapshot,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

const MATERIALS: usize = 4;

/// 隨機目錄：每種原物料的庫存相同地帶在所有引用它的物料清單行上，同一原物料可出現多行
fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
    let stocks = prop::collection::vec(0i64..2000, MATERIALS);
    let products = prop::collection::vec(
        (
            1i64..100_000,
            prop::collection::vec((0..MATERIALS, 0i64..60), 0..7),
        ),
        0..7,
    );

    (stocks, products).prop_map(|(stocks, specs)| {
        let mut products: Vec<Product> = specs
            .into_iter()
            .enumerate()
            .map(|(index, (value, requirements))| {
                let lines = requirements
                    .into_iter()
                    .map(|(material, required)| {
                        BomLine::new(
                            material as i64 + 1,
                            Decimal::new(required, 1),
                            Decimal::new(stocks[material], 1),
                        )
                    })
                    .collect();
                Product::new(index as i64 + 1, format!("P{}", index + 1), Decimal::new(value, 2))
                    .with_bill_of_materials(lines)
            })
            .collect();
        sort_by_value_desc(&mut products);
        products
    })
}

/// 各原物料被建議消耗的總量
fn consumption(products: &[Product], quantities: &HashMap<i64, u128>) -> HashMap<i64, Decimal> {
    let mut used = HashMap::new();
    for product in products {
        let units = quantities.get(&product.id).copied().unwrap_or(0);
        for line in product.constraining_lines() {
            *used.entry(line.raw_material_id).or_insert(Decimal::ZERO) +=
                line.required_quantity * Decimal::from(units);
        }
    }
    used
}

fn planned_quantities(suggestion: &ProductionSuggestion) -> HashMap<i64, u128> {
    suggestion
        .items
        .iter()
        .map(|item| (item.product_id, item.quantity))
        .collect()
}

fn engine() -> AllocationEngine {
    AllocationEngine::new(PlannerConfig::default())
}

proptest! {
    #[test]
    fn prop_totals_are_exact(products in catalog_strategy()) {
        let suggestion = engine().suggest(&products).unwrap().suggestion;

        let mut total = Decimal::ZERO;
        for item in &suggestion.items {
            prop_assert!(item.quantity > 0);
            prop_assert_eq!(item.subtotal, item.product_value * Decimal::from(item.quantity));
            total += item.subtotal;
        }
        prop_assert_eq!(suggestion.total_value, total);
    }

    #[test]
    fn prop_consumption_within_initial_stock(products in catalog_strategy()) {
        let initial = StockSnapshot::initialize(&products);
        let suggestion = engine().suggest(&products).unwrap().suggestion;
        let quantities = planned_quantities(&suggestion);

        for (material, used) in consumption(&products, &quantities) {
            prop_assert!(used <= initial.available(material));
        }
    }

    #[test]
    fn prop_no_product_can_use_leftover_stock(products in catalog_strategy()) {
        let mut remaining = StockSnapshot::initialize(&products);
        let suggestion = engine().suggest(&products).unwrap().suggestion;
        let quantities = planned_quantities(&suggestion);
        for (material, used) in consumption(&products, &quantities) {
            remaining.deduct(material, used);
        }

        for product in &products {
            prop_assert_eq!(FeasibilityCalculator::max_units(product, &remaining).unwrap(), 0);
        }
    }

    #[test]
    fn prop_same_input_same_output(products in catalog_strategy()) {
        let first = engine().suggest(&products).unwrap().suggestion;
        let second = engine().suggest(&products).unwrap().suggestion;

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_highest_value_product_takes_its_standalone_maximum(products in catalog_strategy()) {
        let initial = StockSnapshot::initialize(&products);
        let suggestion = engine().suggest(&products).unwrap().suggestion;

        if let Some(first) = products.first() {
            let standalone = FeasibilityCalculator::max_units(first, &initial).unwrap();
            let planned = suggestion.item(first.id).map(|i| i.quantity).unwrap_or(0);
            prop_assert_eq!(planned, standalone);
        }
    }

    #[test]
    fn prop_terminates_within_two_passes(products in catalog_strategy()) {
        let result = engine().suggest(&products).unwrap();

        prop_assert!(result.passes >= 1);
        prop_assert!(result.passes <= 2);
    }
}
