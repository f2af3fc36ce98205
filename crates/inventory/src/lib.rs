//! Inventory domain module.
//!
//! This crate contains the business rules for warehouse stock, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage): the
//! `Warehouse` record, and the decision logic for transfers and delivery
//! settlement. Decisions produce target stock levels; persisting them
//! atomically is the store's job.

pub mod transfer;
pub mod warehouse;

pub use transfer::Transfer;
pub use warehouse::{StockLevels, Warehouse};
