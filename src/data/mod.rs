/// Data layer: core types, loading, classification and statistics.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Dataset (dtypes inferred once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Column>, row-major cells
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ classify  │   │  stats    │  describe, corr, value counts, crosstab
///   └──────────┘   └──────────┘
/// ```

pub mod classify;
pub mod loader;
pub mod model;
pub mod stats;
