//! Read access to the club's records.
//!
//! The statistics engine talks to storage only through [`RecordStore`]. Production
//! uses [`PgRecordStore`]; tests seed an [`InMemoryStore`] (feature `test-support`).

pub mod postgres;
mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use postgres::PgRecordStore;
pub use store::RecordStore;

#[cfg(any(test, feature = "test-support"))]
pub use memory::{InMemoryStore, Records};
