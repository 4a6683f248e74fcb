//! # Engine Module
//!
//! This module implements the stateful simulation machinery: interaction
//! managers that turn declared potentials into per-particle forces, the
//! stochastic integrator, the boundary manager, and the simulation state that
//! ties them together.
//!
//! ## Overview
//!
//! One simulation step is a fixed pipeline over the particle store: force
//! accumulators are cleared, every interaction manager adds its contribution
//! in declaration order, the integrator consumes the aggregate force together
//! with friction and thermal noise, and the boundary manager corrects
//! particles that left the box. Integration never observes a partially
//! accumulated force; the ordering is a hard barrier enforced by
//! [`simulation::SimulationState::step`].
//!
//! ## Architecture
//!
//! - **Interaction Managers** ([`interactions`]) - Bonded (bond length, bond
//!   angle, dihedral angle) and non-bonded (Lennard-Jones, excluded volume)
//!   force evaluation over immutable bindings
//! - **Stochastic Integration** ([`integrator`]) - Underdamped Langevin
//!   dynamics with per-particle friction and thermal noise
//! - **Boundary Handling** ([`boundary`]) - Reflecting and periodic
//!   rectangular boxes
//! - **State** ([`simulation`]) - The explicit simulation state value and the
//!   per-step pipeline
//! - **Progress Reporting** ([`progress`]) - Callback-based progress events
//!   for long runs
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod boundary;
pub mod error;
pub mod integrator;
pub mod interactions;
pub mod progress;
pub mod simulation;
