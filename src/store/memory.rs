//! In-memory store

use crate::customer::Customer;

use super::{CustomerStore, StoreResult};

/// A store that keeps the record set in memory.
///
/// Same whole-set semantics as the file store, without the file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    customers: Vec<Customer>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with `customers`
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self { customers }
    }
}

impl CustomerStore for MemoryStore {
    fn load_all(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    fn save_all(&mut self, customers: &[Customer]) -> StoreResult<()> {
        self.customers = customers.to_vec();
        Ok(())
    }
}
