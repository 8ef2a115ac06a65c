// Migration pipeline: reference data, per-record enrichment, aggregation

pub mod migration;
pub mod processing;
pub mod reference;

pub use migration::{Migration, MigrationOutcome, OutputDocument};
