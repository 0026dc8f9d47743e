//! SQLite persistence for papers, undelivered strings and bill records.
//!
//! # Example
//!
//! ```no_run
//! use npbc_core::store::BillDb;
//! use std::path::Path;
//!
//! let db = BillDb::open(Path::new("npbc.db")).unwrap();
//! for paper in db.list_papers().unwrap() {
//!     println!("{}: {}", paper.key, paper.name);
//! }
//! ```

pub mod db;
pub mod schema;
pub mod types;

pub use db::{BillDb, StoreError};
pub use schema::{SCHEMA_VERSION, SchemaError};
pub use types::{CostRecord, UndeliveredRecord, UndeliveredStrings};
