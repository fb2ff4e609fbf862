/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRow → DataStore
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ DataStore  │  Vec<Record>, YearRange (immutable)
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  year threshold + scene → AggregatedSeries
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
