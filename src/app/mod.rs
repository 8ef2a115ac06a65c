pub mod migrate_use_case;
pub mod ports;
