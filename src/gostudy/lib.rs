//! # Gostudy Architecture
//!
//! Gostudy is a **UI-agnostic study library** for a catalogue of Go topics: overview
//! text, key points, an example snippet and the output that snippet prints. It pairs the
//! catalogue with a playground buffer whose "Run" button is a simulation: after a short
//! delay it reveals the topic's authored output. Nothing is ever compiled or evaluated.
//!
//! The terminal client in `cli/` is one front end; everything below it is plain Rust.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, drives the REPL     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns catalogue, session and run scheduler                │
//! │  - Normalizes selectors (3, basics/project → TopicRef)      │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure logic over Catalogue + Session                      │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (catalogue.rs, session.rs, runner.rs, format.rs)      │
//! │  - Read-only catalogue, the session state machine,          │
//! │    the simulated-run timer and the reindenter               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns `Result<CmdResult>`,
//! and never writes to stdout/stderr or exits the process. Diagnostics go through
//! `tracing`; installing a subscriber is the front end's business.
//!
//! ## One Actor, One Timer
//!
//! All session state is owned by a single [`api::StudyApi`]. The only asynchronous part is
//! the simulated-run delay, a tokio task that reports back over a channel; the owner
//! applies the completion, and a generation counter in [`session::Session`] drops any
//! completion that no longer matches the current selection.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Logic for each user action
//! - [`catalogue`]: The topic catalogue and its built-in content
//! - [`session`]: Selection, buffer and output panel state
//! - [`runner`]: Simulated-run timer
//! - [`format`]: Brace-depth reindenter
//! - [`index`]: Topic selectors (sidebar numbers and `category/topic` paths)
//! - [`model`]: Catalogue data types
//! - [`peek`]: Snippet previews for listings
//! - [`config`]: Configuration management
//! - [`init`]: Context construction from config
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod catalogue;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod index;
pub mod init;
pub mod model;
pub mod peek;
pub mod runner;
pub mod session;
