//! Task management.
//!
//! Tasks belong to a project, move through a forward-only workflow
//! (`TODO` → `DOING` → `DONE`) and expose a priority score derived from their
//! category and due date. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
