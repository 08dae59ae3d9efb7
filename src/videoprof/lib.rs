//! # Videoprof Architecture
//!
//! Videoprof profiles a video collection: every file's technical metadata is
//! classified against user-configured quality preferences, and the results are
//! tallied per attribute, per file and per directory.
//!
//! Like the rest of our tools, it is a library that happens to have a CLI
//! client, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, sets up logging, renders reports       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns attributes, cache store and extractor               │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - scan: discover files and directory groups                │
//! │  - analyze: classify every file                             │
//! │  - report: aggregate qualities into rows                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Classification core                                        │
//! │  - attribute.rs, preference.rs, level.rs, quality.rs        │
//! │  - video.rs ties a file to its qualities                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Metadata Layer                                             │
//! │  - tracks.rs: Extractor trait, mediainfo normalization      │
//! │  - store/: CacheStore trait, SqliteStore, InMemoryStore     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification in one paragraph
//!
//! An [`attribute::Attribute`] reads one field of one track type (or
//! concatenates several child attributes) and renders it into a string. The
//! first [`preference::Preference`] whose pattern matches that string wins.
//! When none matches, a new preference is created on the spot from the value
//! itself, so unseen values still show up in the summary. Each winning
//! preference is recorded on the file as a [`quality::Quality`].
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code returns regular Rust types and never writes to
//! stdout/stderr or exits the process. Diagnostics go through `tracing`; the
//! binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests next to the code, using
//!    [`store::memory::InMemoryStore`] and closure extractors so no test needs
//!    mediainfo installed.
//! 2. **API** (`api.rs`): end to end over the bundled configuration.
//! 3. **CLI** (`tests/`): the binary is exercised with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - **[`api`]**: facade used by the CLI
//! - **[`commands`]**: scan, analyze and report
//! - **[`attribute`]**, **[`preference`]**, **[`level`]**, **[`quality`]**:
//!   the classification model
//! - **[`video`]**: a file and its qualities
//! - **[`tracks`]**: metadata records and extraction
//! - **[`store`]**: the metadata cache
//! - **[`config`]**: JSON configuration and the bundled default
//! - **[`error`]**: error types

pub mod api;
pub mod attribute;
pub mod commands;
pub mod config;
pub mod error;
pub mod level;
pub mod preference;
pub mod quality;
pub mod store;
pub mod tracks;
pub mod video;
