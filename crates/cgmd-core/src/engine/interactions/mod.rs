//! Interaction managers. Each manager owns an immutable list of
//! (potential, particle-tuple) bindings of one interaction class and knows how
//! to add the resulting forces into the particle store's accumulators and how
//! to report its total potential energy.

mod angle;
mod bond;
mod dihedral;
mod nonbonded;

pub use angle::{AngleBinding, BondAngleInteraction};
pub use bond::{BondBinding, BondLengthInteraction};
pub use dihedral::{DihedralAngleInteraction, DihedralBinding};
pub use nonbonded::{ExcludedVolumeInteraction, LennardJonesInteraction, NonBondedPair};
pub(crate) use nonbonded::canonical_pair;

use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use crate::engine::error::EngineError;
use nalgebra::Vector3;

pub(crate) fn apply_force(
    system: &mut ParticleSystem,
    id: ParticleId,
    force: Vector3<f64>,
) -> Result<(), EngineError> {
    system
        .particle_mut(id)
        .ok_or(EngineError::ParticleNotFound(id))?
        .force += force;
    Ok(())
}

/// A force-field component evaluated once per step.
///
/// Implementations must be pure with respect to everything except the force
/// accumulators: `accumulate_forces` only ever adds into `Particle::force`,
/// and `potential_energy` does not mutate the system at all. The simulation
/// state applies managers in declaration order, which keeps force summation
/// deterministic.
pub trait InteractionManager {
    /// Human-readable class name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Number of bindings (or eligible pairs) this manager evaluates per step.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds this manager's forces into the per-particle accumulators.
    fn accumulate_forces(&self, system: &mut ParticleSystem) -> Result<(), EngineError>;

    /// Total potential energy of this manager's bindings at the current
    /// positions.
    fn potential_energy(&self, system: &ParticleSystem) -> Result<f64, EngineError>;
}
