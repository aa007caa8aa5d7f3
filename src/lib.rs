//! # Planner
//!
//! 生產建議：在有限的原物料庫存下，依產品價值由高到低決定各產品的建議產量。
//!
//! ```
//! use planner::{AllocationEngine, BomLine, PlannerConfig, Product};
//! use rust_decimal::Decimal;
//!
//! let products = vec![Product::new(1, "Product A", Decimal::new(10000, 2))
//!     .with_bom_line(BomLine::new(1, Decimal::from(10), Decimal::from(100)))];
//!
//! let result = AllocationEngine::new(PlannerConfig::default())
//!     .suggest(&products)
//!     .unwrap();
//! assert_eq!(result.suggestion.total_value, Decimal::new(100000, 2));
//! ```

pub use planner_calc::{
    AllocationEngine, FeasibilityCalculator, PlanResult, PlanWarning, ProductionPlanner,
    StockSnapshot, SuggestionAssembler, WarningSeverity,
};
pub use planner_catalog::{
    BomLineInput, CatalogError, InMemoryCatalog, ProductInput, RawMaterialInput, SeedDocument,
};
pub use planner_core::{
    sort_by_value_desc, BomLine, CatalogProvider, PlanError, PlannerConfig, Product, ProductionItem,
    ProductionSuggestion, RawMaterial, StaticCatalog,
};
