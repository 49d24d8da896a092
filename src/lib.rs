//! mypy-config core library.
//!
//! This crate exposes programmatic APIs for generating and validating the
//! mypy.ini static-analysis configuration from a strict-typing declaration
//! list, a built-in ignore table, and the repository layout.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery, effective configuration resolution, and the shared
//!   validation context (error sink plus render cache).
//! - `settings`: Immutable tables: ignore list, general/strict option sets.
//! - `fsx`: Filesystem existence predicates behind a testable trait.
//! - `mypy`: The reconciler: classify, validate, render, drift check, write.
//! - `models`: Issue and result structs shared by printers.
//! - `output`: Human/JSON printers for validate/generate.
pub mod cli;
pub mod config;
pub mod fsx;
pub mod models;
pub mod mypy;
pub mod output;
pub mod settings;
