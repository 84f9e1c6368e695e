//! Hookdoc core library — structured documentation extraction for PHP
//! source trees.
//!
//! This crate parses a project once, recognizes hook registration call
//! sites (`apply_filters`, `do_action` and their ref-array/deprecated
//! variants) alongside the declared entities, and exports one canonical
//! record per file: docblock, includes, constants, hooks, functions and
//! classes, shaped for downstream documentation renderers.
//!
//! The typical entry point is [`export_project`], which enumerates the
//! `.php` files under a root directory, parses each of them, and returns
//! the serialized-ready [`models::FileRecord`] list.

pub mod docblock;
pub mod errors;
pub mod export;
pub mod extractor;
pub mod models;

pub use errors::{HookdocError, HookdocResult};
pub use extractor::pipeline::{export_files, export_project, parse_project, write_export};
