//! The fixed step sequence: validate -> fetch -> metadata -> convert ->
//! dedup -> save. Grounded on `original_source/src/docpull/pipeline/steps/`'s
//! one-module-per-step layout.

pub mod convert;
pub mod dedup;
pub mod fetch;
pub mod metadata;
pub mod save;
pub mod save_json;
pub mod save_sqlite;
pub mod validate;
