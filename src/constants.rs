/// Version stamps and fixed labels written into every migrated document.

// Output schema and migration tool versions
pub const SCHEMA_VERSION: &str = "2.0.0";
pub const MIGRATION_VERSION: &str = "1.0.0";

// Default file names used when the CLI positional arguments are omitted
pub const DEFAULT_INPUT_FILE: &str = "cooperatives_cote_ivoire.json";
pub const DEFAULT_OUTPUT_FILE: &str = "cooperatives_enhanced.json";
pub const DEFAULT_CONFIG_FILE: &str = "coop_migrate.toml";

// Document-level defaults
pub const DEFAULT_COUNTRY: &str = "Côte d'Ivoire";
pub const DEFAULT_SOURCE: &str = "AgroSoluce Platform";
pub const DEFAULT_DATA_YEAR: i32 = 2017;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Founding year used when the registration number carries no parseable year
pub const DEFAULT_FOUNDED_YEAR: i32 = 2017;

// Traceability entry appended by this migration
pub const TRACE_EVENT: &str = "Data enhanced for AgroSoluce platform";
pub const TRACE_EVENT_TYPE: &str = "enhancement";
pub const TRACE_PERFORMED_BY: &str = "system_migration";
/// Number of hex characters of the SHA-256 digest kept in `dataHash`
pub const TRACE_HASH_LEN: usize = 16;

// Per-record metadata stamps
pub const DATA_QUALITY_ENHANCED: &str = "enhanced";
pub const VERIFICATION_PENDING_REVIEW: &str = "pending_review";

pub const STATUS_VERIFIED: &str = "verified";
pub const STATUS_PENDING: &str = "pending";

/// Days until the next security assessment / risk review
pub const REVIEW_INTERVAL_DAYS: i64 = 180;
