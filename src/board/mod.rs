//! Kanban task board synchronization.
//!
//! The board renders the remote task collection as three status columns,
//! turns drag-and-drop gestures into store mutations and keeps the view
//! consistent with the store while writes are in flight. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Projection, drag translation and mutation coordination in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
