//! Filesystem utilities for stack-maint.
//!
//! Both commands rewrite a whole file in place; the write goes through a
//! temporary sibling so an interrupted run never leaves a truncated file.

pub mod atomic;

pub use atomic::{atomic_write_file, read_file};
