//! # Core Module
//!
//! This module provides the fundamental building blocks for coarse-grained
//! molecular dynamics, serving as the computational foundation of the library.
//!
//! ## Overview
//!
//! The core module implements the essential data structures and pure functions
//! required to describe a particle system and its force field. It carries no
//! simulation state of its own; everything here is either a value type or a
//! stateless computation over value types.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the model:
//!
//! - **Particle Representation** ([`models`]) - Particles, the particle store,
//!   and the rectangular boundary box
//! - **Force Field** ([`forcefield`]) - Potential energy functions, their
//!   analytic derivatives, and the typed potential terms bound to interactions
//! - **Geometry** ([`utils`]) - Bend-angle and dihedral-angle computations
//!   shared by the interaction managers

pub mod forcefield;
pub mod models;
pub mod utils;
