// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point.  Re-export everything for both `main.rs` and
// integration tests.

mod macros;

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod logging;

pub use bootstrap::{BuriedPoint, SetupError};
pub use db::{Data, Database, OpenError, StoreError, StoreResult};
pub use logging::Diagnostics;

#[doc(hidden)]
pub use log as __log;
