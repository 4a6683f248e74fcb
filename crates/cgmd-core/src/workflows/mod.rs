//! # Workflows Module
//!
//! The highest-level, user-facing layer: complete simulation runs built on
//! top of the `engine` and `config` layers, with progress reporting and
//! per-sample observation hooks for trajectory and energy output.

pub mod simulate;
