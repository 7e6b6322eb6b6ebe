//! # CLI Behavior
//!
//! This is **one possible UI client** for gostudy, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the library documentation in `lib.rs`.
//!
//! ### Naked Execution (`gostudy`)
//!
//! Running `gostudy` with no arguments defaults to `gostudy list`: the sidebar of
//! categories and numbered topics.
//!
//! ### Topic Arguments
//!
//! Anywhere a topic is expected, the sidebar number (`3`) and the path
//! (`basics/project`) are interchangeable. Omitting it means the configured start topic.
//!
//! ### Pipeable Output
//!
//! `code` prints the bare snippet and `format` prints only the reindented text, so both
//! compose with other tools: `gostudy code 7 | gostudy format`. Warnings raised while
//! starting up go to stderr.
//!
//! ### Study Session
//!
//! `gostudy study` keeps one session alive: select topics, edit or load the buffer,
//! run, format and clear, as in the web playground. See `study.rs`.

mod commands;
mod render;
pub mod setup;
mod study;
mod styles;
mod templates;

pub use commands::run;
