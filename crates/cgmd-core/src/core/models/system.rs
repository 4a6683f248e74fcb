use super::ids::ParticleId;
use super::particle::Particle;
use slotmap::{SecondaryMap, SlotMap};

/// The particle store for one simulation.
///
/// This struct is the central mutable data structure of the engine. Particles
/// are registered once during construction and are never created or destroyed
/// afterwards; their identity is a stable [`ParticleId`]. The store also
/// remembers declaration order, which fixes the iteration order of the
/// integrator and keeps force summation deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    /// Primary storage for particles using a slot map for typed ID management.
    particles: SlotMap<ParticleId, Particle>,
    /// Particle IDs in declaration order.
    order: Vec<ParticleId>,
    /// Reverse lookup from particle ID to declaration index, for diagnostics.
    indices: SecondaryMap<ParticleId, usize>,
}

impl ParticleSystem {
    /// Creates a new, empty particle system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a particle and returns its stable ID.
    ///
    /// Declaration order is preserved: the first particle added is index 0.
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = self.particles.insert(particle);
        self.indices.insert(id, self.order.len());
        self.order.push(id);
        id
    }

    /// Retrieves an immutable reference to a particle by its ID.
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// Retrieves a mutable reference to a particle by its ID.
    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id)
    }

    /// The declaration index of a particle, if it belongs to this store.
    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.indices.get(id).copied()
    }

    /// Particle IDs in declaration order.
    pub fn ids(&self) -> &[ParticleId] {
        &self.order
    }

    /// Returns an iterator over all particles in declaration order.
    pub fn particles_iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.order.iter().map(|&id| (id, &self.particles[id]))
    }

    /// Returns a mutable iterator over all particles.
    pub fn particles_iter_mut(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> {
        self.particles.iter_mut()
    }

    /// The number of particles in the store.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Zeroes every force accumulator. Called at the start of each step,
    /// before any interaction manager runs.
    pub fn clear_forces(&mut self) {
        for particle in self.particles.values_mut() {
            particle.force = nalgebra::Vector3::zeros();
        }
    }

    /// Total kinetic energy `sum(m v^2) / 2` over all particles.
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .values()
            .map(|p| 0.5 * p.mass * p.velocity.norm_squared())
            .sum()
    }

    /// Total linear momentum over all particles.
    pub fn total_momentum(&self) -> nalgebra::Vector3<f64> {
        self.particles
            .values()
            .map(|p| p.mass * p.velocity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn system_with_two_particles() -> (ParticleSystem, ParticleId, ParticleId) {
        let mut system = ParticleSystem::new();
        let a = system.add_particle(Particle::new(1.0, Point3::origin()));
        let b = system.add_particle(Particle::new(2.0, Point3::new(1.0, 0.0, 0.0)));
        (system, a, b)
    }

    #[test]
    fn add_particle_preserves_declaration_order() {
        let (system, a, b) = system_with_two_particles();
        assert_eq!(system.len(), 2);
        assert_eq!(system.ids(), &[a, b]);
        assert_eq!(system.index_of(a), Some(0));
        assert_eq!(system.index_of(b), Some(1));
    }

    #[test]
    fn particles_iter_follows_declaration_order() {
        let (system, a, b) = system_with_two_particles();
        let ids: Vec<_> = system.particles_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn clear_forces_zeroes_all_accumulators() {
        let (mut system, a, b) = system_with_two_particles();
        system.particle_mut(a).unwrap().force = Vector3::new(1.0, 2.0, 3.0);
        system.particle_mut(b).unwrap().force = Vector3::new(-1.0, 0.0, 0.5);

        system.clear_forces();

        assert_eq!(system.particle(a).unwrap().force, Vector3::zeros());
        assert_eq!(system.particle(b).unwrap().force, Vector3::zeros());
    }

    #[test]
    fn kinetic_energy_sums_over_particles() {
        let (mut system, a, b) = system_with_two_particles();
        system.particle_mut(a).unwrap().velocity = Vector3::new(2.0, 0.0, 0.0);
        system.particle_mut(b).unwrap().velocity = Vector3::new(0.0, 1.0, 0.0);

        // 0.5 * 1 * 4 + 0.5 * 2 * 1
        assert_eq!(system.kinetic_energy(), 3.0);
    }

    #[test]
    fn total_momentum_weights_velocity_by_mass() {
        let (mut system, a, b) = system_with_two_particles();
        system.particle_mut(a).unwrap().velocity = Vector3::new(2.0, 0.0, 0.0);
        system.particle_mut(b).unwrap().velocity = Vector3::new(-1.0, 0.0, 0.0);

        assert_eq!(system.total_momentum(), Vector3::zeros());
    }

    #[test]
    fn unknown_id_yields_none() {
        let (system, _, _) = system_with_two_particles();
        let foreign = ParticleSystem::new();
        assert!(foreign.particle(system.ids()[0]).is_none());
        assert_eq!(foreign.index_of(system.ids()[0]), None);
    }
}
