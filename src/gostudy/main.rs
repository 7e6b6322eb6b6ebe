//! # Gostudy CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file only
//! starts the runtime, invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! From the CLI vantage point:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/gostudy/cli/)                               │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Command selection + context wiring (commands.rs)         │
//! │  - Terminal rendering via minijinja templates (render.rs)   │
//! │  - The interactive study session (study.rs)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves selectors (3, basics/project) to topics         │
//! │  - Owns the session and the simulated-run timer             │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*)                                 │
//! │  - Pure logic over the catalogue and session                │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Runtime
//!
//! A single-threaded tokio runtime is enough: the only concurrent work is the run
//! timer, which has to tick while the study session waits on stdin.
//!
//! ## Testing Approach
//!
//! - **Commands and session**: unit tests of the state machine and each action.
//! - **API**: paused-clock tokio tests for the run timer and navigation races.
//! - **CLI**: parser tests in `setup.rs`, template tests in `render.rs`, and
//!   end-to-end runs of the binary in `tests/`.

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
