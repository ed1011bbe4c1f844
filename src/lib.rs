//! cadastro - a flat-file customer registry
//!
//! Customers are kept as `|`-delimited lines in a single text file and
//! keyed by CPF, the Brazilian taxpayer identifier. The crate provides
//! the CPF validator, the file store, a mutex-serialized registry of
//! keyed operations, and an axum JSON API on top.

pub mod cli;
pub mod cpf;
pub mod customer;
pub mod http_server;
pub mod observability;
pub mod registry;
pub mod store;
