//! # Videoprof CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/videoprof/cli/)                             │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging, config, cache wiring + dispatch (commands.rs)   │
//! │  - colored terminal rendering of reports (render.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                   videoprof library (api.rs)
//! ```
//!
//! Rendering is tested on canned report rows; the binary itself is exercised
//! end to end in `tests/cli.rs`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
