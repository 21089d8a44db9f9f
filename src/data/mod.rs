/// Data layer: core types, loading, and the recorded/hidden series split.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet (or a URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → RescueDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ RescueDataset  │  Vec<RescueRecord>, class index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  partition one class around the pivot → SeriesSplit
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod split;
