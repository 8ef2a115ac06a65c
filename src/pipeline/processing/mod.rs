// Per-record enrichment steps and the corpus-wide reduction

pub mod activities;
pub mod aggregate;
pub mod certification;
pub mod enhanced;
pub mod enrich;
pub mod esg;
pub mod extract;
pub mod geo;
pub mod risk;
pub mod security;
pub mod traceability;
