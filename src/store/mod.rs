//! Flat-file customer store
//!
//! The store has exactly two primitives:
//!
//! - `load_all`: read every record, in file order
//! - `save_all`: replace the whole record set
//!
//! There is no index and no cache. Every call pays for the full file,
//! which is fine for the small record counts this service targets.
//! Composite operations (find, insert, update, delete) live in
//! [`crate::registry`].

mod errors;
mod file;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::FlatFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::customer::Customer;

/// How `load_all` treats lines that do not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Drop the line with a warning and keep going.
    ///
    /// Dropped lines are not carried over: the next `save_all` of the
    /// loaded set removes them from the file for good.
    #[default]
    Lenient,
    /// Fail the load with the offending line number
    Strict,
}

/// Whole-set persistence of customer records.
pub trait CustomerStore: Send {
    /// Reads every stored record, in storage order.
    fn load_all(&self) -> StoreResult<Vec<Customer>>;

    /// Replaces the stored record set with `customers`.
    fn save_all(&mut self, customers: &[Customer]) -> StoreResult<()>;
}
