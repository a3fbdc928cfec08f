//! Unit tests for the task board.
//!
//! Tests are organised by concern: domain values, projection, drag
//! translation and the in-memory adapters. Coordinator tests live next to the
//! services so they can reach crate-private state.
