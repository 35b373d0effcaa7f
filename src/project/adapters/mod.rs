//! Adapter implementations for project ports.

pub mod memory;
pub mod postgres;
