//! # Coinsieve CLI
//!
//! A thin command line client over the `coinsieve` library. The binary only
//! invokes `cli::run()` and handles process termination; everything the CLI
//! does is in `src/cli/`.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/coinsieve-cli/src/cli/)                  │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/coinsieve/)                                │
//! │  - FilterStore setters, engine, persistence                 │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to the code plus integration tests.
//! - **CLI**: rendering is tested with canned data in `render.rs`; end-to-end
//!   behavior runs the binary with `assert_cmd` against a temporary data
//!   directory (`tests/cli_e2e.rs`).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
