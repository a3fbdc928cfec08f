//! Taskboard: a Kanban task board synchronization engine.
//!
//! This crate keeps a three-column board (scheduled, in progress, completed)
//! in step with a remote task store. It projects the task collection into
//! columns under priority and assignee filters, translates drag-and-drop
//! gestures into status changes, and coordinates every mutation so the board
//! never shows a state the store has not confirmed (or explicitly marked as
//! pending).
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the store, profiles, comments
//!   and notifications
//! - **Adapters**: In-memory implementations and the store record format
//!
//! # Modules
//!
//! - [`board`]: Task board domain, ports, adapters and services

pub mod board;
