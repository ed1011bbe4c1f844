//! Customer registry
//!
//! The registry turns the store's two primitives into keyed operations:
//!
//! - `find`:   load, linear scan by CPF
//! - `insert`: validate, load, reject duplicates, append, save
//! - `update`: validate, load, locate, apply patch, save
//! - `delete`: validate, load, locate, remove, save
//!
//! Every operation holds the registry mutex from load to save, so two
//! read-mutate-write sequences in the same process can never interleave
//! and lose an update. Separate processes sharing one data file are not
//! coordinated.
//!
//! Keys are compared in normalized form: `"111.444.777-35"` finds the
//! record stored as `"11144477735"`.

mod errors;

pub use errors::{RegistryError, RegistryResult};

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::cpf::Cpf;
use crate::customer::{Customer, CustomerPatch};
use crate::observability::Event;
use crate::store::CustomerStore;

/// Serialized access to a customer store.
pub struct CustomerRegistry {
    store: Mutex<Box<dyn CustomerStore>>,
}

impl CustomerRegistry {
    /// Wraps `store`. The registry becomes its only user.
    pub fn new(store: impl CustomerStore + 'static) -> Self {
        let store: Box<dyn CustomerStore> = Box::new(store);
        Self {
            store: Mutex::new(store),
        }
    }

    /// All customers, in storage order.
    pub fn list(&self) -> RegistryResult<Vec<Customer>> {
        let customers = self.lock().load_all()?;
        Ok(customers)
    }

    /// The customer keyed by `key`.
    pub fn find(&self, key: &str) -> RegistryResult<Customer> {
        let cpf = parse_key(key)?;
        let customers = self.lock().load_all()?;

        customers
            .into_iter()
            .find(|c| cpf.matches(&c.cpf))
            .ok_or_else(|| RegistryError::NotFound(cpf.to_string()))
    }

    /// Adds a new customer. The stored CPF is normalized.
    ///
    /// Fails with `Conflict` if the CPF is already registered; the store
    /// is left untouched in that case.
    pub fn insert(&self, mut customer: Customer) -> RegistryResult<Customer> {
        let cpf = parse_key(&customer.cpf)?;
        if let Some((field, found)) = customer.unstorable_field() {
            return Err(RegistryError::InvalidField { field, found });
        }
        customer.cpf = cpf.to_string();

        let mut store = self.lock();
        let mut customers = store.load_all()?;
        if customers.iter().any(|c| cpf.matches(&c.cpf)) {
            return Err(RegistryError::Conflict(cpf.to_string()));
        }

        customers.push(customer.clone());
        store.save_all(&customers)?;

        info!(
            event = %Event::CustomerInserted,
            cpf = %cpf,
            total = customers.len(),
            "customer inserted"
        );
        Ok(customer)
    }

    /// Applies `patch` to the customer keyed by `key` and returns the
    /// updated record. An empty patch leaves the file untouched.
    pub fn update(&self, key: &str, patch: &CustomerPatch) -> RegistryResult<Customer> {
        let cpf = parse_key(key)?;
        if let Some((field, found)) = patch.unstorable_field() {
            return Err(RegistryError::InvalidField { field, found });
        }

        let mut store = self.lock();
        let mut customers = store.load_all()?;
        let customer = customers
            .iter_mut()
            .find(|c| cpf.matches(&c.cpf))
            .ok_or_else(|| RegistryError::NotFound(cpf.to_string()))?;

        if patch.is_empty() {
            return Ok(customer.clone());
        }

        patch.apply_to(customer);
        let updated = customer.clone();
        store.save_all(&customers)?;

        info!(event = %Event::CustomerUpdated, cpf = %cpf, "customer updated");
        Ok(updated)
    }

    /// Removes the customer keyed by `key` and returns it.
    ///
    /// Fails with `NotFound` if absent; the store is left untouched.
    pub fn delete(&self, key: &str) -> RegistryResult<Customer> {
        let cpf = parse_key(key)?;

        let mut store = self.lock();
        let mut customers = store.load_all()?;
        let idx = customers
            .iter()
            .position(|c| cpf.matches(&c.cpf))
            .ok_or_else(|| RegistryError::NotFound(cpf.to_string()))?;

        let removed = customers.remove(idx);
        store.save_all(&customers)?;

        info!(
            event = %Event::CustomerDeleted,
            cpf = %cpf,
            remaining = customers.len(),
            "customer deleted"
        );
        Ok(removed)
    }

    // Saves are atomic renames, so a poisoned lock never guards a
    // half-written file.
    fn lock(&self) -> MutexGuard<'_, Box<dyn CustomerStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_key(key: &str) -> RegistryResult<Cpf> {
    Cpf::parse(key).ok_or_else(|| RegistryError::InvalidKey(key.to_string()))
}
