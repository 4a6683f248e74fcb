use super::{InteractionManager, apply_force};
use crate::core::forcefield::potentials;
use crate::core::models::ids::ParticleId;
use crate::core::models::particle::NonBondedParam;
use crate::core::models::system::ParticleSystem;
use crate::core::utils::geometry::DISTANCE_EPSILON;
use crate::engine::error::EngineError;
use std::collections::HashSet;

/// A pre-mixed non-bonded pair. Pairs are enumerated once at construction;
/// the per-step loop never searches or re-mixes parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonBondedPair {
    pub ids: (ParticleId, ParticleId),
    /// Contact distance: the sum of the two particle radii.
    pub sigma: f64,
    /// Geometric mean of the two scaled well depths.
    pub epsilon: f64,
}

pub(crate) fn canonical_pair(a: ParticleId, b: ParticleId) -> (ParticleId, ParticleId) {
    if a <= b { (a, b) } else { (b, a) }
}

fn eligible_pairs<F>(
    system: &ParticleSystem,
    exclusions: &HashSet<(ParticleId, ParticleId)>,
    param_of: F,
) -> Vec<NonBondedPair>
where
    F: Fn(&NonBondedParam) -> Option<(f64, f64)>,
{
    let ids = system.ids();
    let mut pairs = Vec::new();
    for (pos, &id_a) in ids.iter().enumerate() {
        let Some((radius_a, epsilon_a)) = system
            .particle(id_a)
            .and_then(|p| param_of(&p.nonbonded))
        else {
            continue;
        };
        for &id_b in &ids[pos + 1..] {
            let Some((radius_b, epsilon_b)) = system
                .particle(id_b)
                .and_then(|p| param_of(&p.nonbonded))
            else {
                continue;
            };
            if exclusions.contains(&canonical_pair(id_a, id_b)) {
                continue;
            }
            pairs.push(NonBondedPair {
                ids: (id_a, id_b),
                sigma: radius_a + radius_b,
                epsilon: (epsilon_a * epsilon_b).sqrt(),
            });
        }
    }
    pairs
}

fn accumulate_pairwise(
    system: &mut ParticleSystem,
    pairs: &[NonBondedPair],
    potential: &'static str,
    derivative: impl Fn(f64, f64, f64) -> f64,
) -> Result<(), EngineError> {
    for pair in pairs {
        let (id_a, id_b) = pair.ids;
        let p_a = system
            .particle(id_a)
            .ok_or(EngineError::ParticleNotFound(id_a))?
            .position;
        let p_b = system
            .particle(id_b)
            .ok_or(EngineError::ParticleNotFound(id_b))?
            .position;

        let r = p_b - p_a;
        let dist = r.norm();
        if dist < DISTANCE_EPSILON {
            return Err(EngineError::DegenerateGeometry {
                interaction: "NonBonded",
                potential,
                particles: vec![id_a, id_b],
            });
        }

        let coef = -derivative(dist, pair.sigma, pair.epsilon);
        let force_a = r * (-coef / dist);
        apply_force(system, id_a, force_a)?;
        apply_force(system, id_b, -force_a)?;
    }
    Ok(())
}

fn pairwise_energy(
    system: &ParticleSystem,
    pairs: &[NonBondedPair],
    potential: &'static str,
    energy_fn: impl Fn(f64, f64, f64) -> f64,
) -> Result<f64, EngineError> {
    let mut energy = 0.0;
    for pair in pairs {
        let (id_a, id_b) = pair.ids;
        let p_a = system
            .particle(id_a)
            .ok_or(EngineError::ParticleNotFound(id_a))?
            .position;
        let p_b = system
            .particle(id_b)
            .ok_or(EngineError::ParticleNotFound(id_b))?
            .position;

        let dist = (p_b - p_a).norm();
        if dist < DISTANCE_EPSILON {
            return Err(EngineError::DegenerateGeometry {
                interaction: "NonBonded",
                potential,
                particles: vec![id_a, id_b],
            });
        }
        energy += energy_fn(dist, pair.sigma, pair.epsilon);
    }
    Ok(energy)
}

/// Lennard-Jones 12-6 forces between every eligible particle pair.
#[derive(Debug, Clone, Default)]
pub struct LennardJonesInteraction {
    pairs: Vec<NonBondedPair>,
}

impl LennardJonesInteraction {
    /// Enumerates every pair whose particles both carry Lennard-Jones
    /// parameters, skipping excluded (bonded or chain-end) pairs.
    pub fn from_system(
        system: &ParticleSystem,
        exclusions: &HashSet<(ParticleId, ParticleId)>,
    ) -> Self {
        let pairs = eligible_pairs(system, exclusions, |param| match *param {
            NonBondedParam::LennardJones {
                radius,
                epsilon_scaled,
            } => Some((radius, epsilon_scaled)),
            _ => None,
        });
        Self { pairs }
    }

    pub fn pairs(&self) -> &[NonBondedPair] {
        &self.pairs
    }
}

impl InteractionManager for LennardJonesInteraction {
    fn name(&self) -> &'static str {
        "LennardJones"
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn accumulate_forces(&self, system: &mut ParticleSystem) -> Result<(), EngineError> {
        accumulate_pairwise(
            system,
            &self.pairs,
            "LennardJones",
            potentials::lennard_jones_derivative,
        )
    }

    fn potential_energy(&self, system: &ParticleSystem) -> Result<f64, EngineError> {
        pairwise_energy(
            system,
            &self.pairs,
            "LennardJones",
            potentials::lennard_jones_energy,
        )
    }
}

/// Purely repulsive excluded-volume forces between every eligible particle
/// pair.
#[derive(Debug, Clone, Default)]
pub struct ExcludedVolumeInteraction {
    pairs: Vec<NonBondedPair>,
}

impl ExcludedVolumeInteraction {
    /// Enumerates every pair whose particles both carry excluded-volume
    /// parameters, skipping excluded (bonded or chain-end) pairs.
    pub fn from_system(
        system: &ParticleSystem,
        exclusions: &HashSet<(ParticleId, ParticleId)>,
    ) -> Self {
        let pairs = eligible_pairs(system, exclusions, |param| match *param {
            NonBondedParam::ExcludedVolume {
                radius,
                epsilon_scaled,
            } => Some((radius, epsilon_scaled)),
            _ => None,
        });
        Self { pairs }
    }

    pub fn pairs(&self) -> &[NonBondedPair] {
        &self.pairs
    }
}

impl InteractionManager for ExcludedVolumeInteraction {
    fn name(&self) -> &'static str {
        "ExcludedVolume"
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn accumulate_forces(&self, system: &mut ParticleSystem) -> Result<(), EngineError> {
        accumulate_pairwise(
            system,
            &self.pairs,
            "ExcludedVolume",
            potentials::excluded_volume_derivative,
        )
    }

    fn potential_energy(&self, system: &ParticleSystem) -> Result<f64, EngineError> {
        pairwise_energy(
            system,
            &self.pairs,
            "ExcludedVolume",
            potentials::excluded_volume_energy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::Particle;
    use nalgebra::Point3;

    fn lj_particle(pos: [f64; 3], radius: f64, epsilon: f64) -> Particle {
        let mut particle = Particle::new(1.0, Point3::new(pos[0], pos[1], pos[2]));
        particle.nonbonded = NonBondedParam::LennardJones {
            radius,
            epsilon_scaled: epsilon,
        };
        particle
    }

    fn ev_particle(pos: [f64; 3], radius: f64, epsilon: f64) -> Particle {
        let mut particle = Particle::new(1.0, Point3::new(pos[0], pos[1], pos[2]));
        particle.nonbonded = NonBondedParam::ExcludedVolume {
            radius,
            epsilon_scaled: epsilon,
        };
        particle
    }

    #[test]
    fn pair_enumeration_mixes_radii_additively_and_epsilon_geometrically() {
        let mut system = ParticleSystem::new();
        system.add_particle(lj_particle([0.0, 0.0, 0.0], 0.5, 1.0));
        system.add_particle(lj_particle([3.0, 0.0, 0.0], 0.7, 4.0));

        let manager = LennardJonesInteraction::from_system(&system, &HashSet::new());

        assert_eq!(manager.len(), 1);
        let pair = manager.pairs()[0];
        assert_eq!(pair.sigma, 1.2);
        assert_eq!(pair.epsilon, 2.0);
    }

    #[test]
    fn particles_without_matching_params_are_not_paired() {
        let mut system = ParticleSystem::new();
        system.add_particle(lj_particle([0.0, 0.0, 0.0], 0.5, 1.0));
        system.add_particle(ev_particle([2.0, 0.0, 0.0], 0.5, 1.0));
        system.add_particle(Particle::new(1.0, Point3::new(4.0, 0.0, 0.0)));

        let lj = LennardJonesInteraction::from_system(&system, &HashSet::new());
        let ev = ExcludedVolumeInteraction::from_system(&system, &HashSet::new());

        assert!(lj.is_empty());
        assert!(ev.is_empty());
    }

    #[test]
    fn excluded_pairs_are_skipped_regardless_of_ordering() {
        let mut system = ParticleSystem::new();
        let a = system.add_particle(lj_particle([0.0, 0.0, 0.0], 0.5, 1.0));
        let b = system.add_particle(lj_particle([2.0, 0.0, 0.0], 0.5, 1.0));
        let c = system.add_particle(lj_particle([4.0, 0.0, 0.0], 0.5, 1.0));

        let mut exclusions = HashSet::new();
        exclusions.insert(canonical_pair(b, a));

        let manager = LennardJonesInteraction::from_system(&system, &exclusions);
        let pairs: Vec<_> = manager.pairs().iter().map(|p| p.ids).collect();
        assert_eq!(pairs, vec![(a, c), (b, c)]);
    }

    #[test]
    fn lennard_jones_forces_are_equal_and_opposite() {
        let mut system = ParticleSystem::new();
        let a = system.add_particle(lj_particle([0.0, 0.0, 0.0], 0.5, 2.0));
        let b = system.add_particle(lj_particle([0.9, 0.0, 0.0], 0.5, 2.0));
        let manager = LennardJonesInteraction::from_system(&system, &HashSet::new());

        manager.accumulate_forces(&mut system).unwrap();

        let force_a = system.particle(a).unwrap().force;
        let force_b = system.particle(b).unwrap().force;
        assert_eq!(force_a, -force_b);
        // Overlapping below sigma: strongly repulsive.
        assert!(force_a.x < 0.0);
    }

    #[test]
    fn lennard_jones_attracts_beyond_its_minimum() {
        let mut system = ParticleSystem::new();
        let a = system.add_particle(lj_particle([0.0, 0.0, 0.0], 0.5, 2.0));
        system.add_particle(lj_particle([1.5, 0.0, 0.0], 0.5, 2.0));
        let manager = LennardJonesInteraction::from_system(&system, &HashSet::new());

        manager.accumulate_forces(&mut system).unwrap();

        assert!(system.particle(a).unwrap().force.x > 0.0);
    }

    #[test]
    fn excluded_volume_always_pushes_apart() {
        for dist in [0.8, 1.2, 2.0] {
            let mut system = ParticleSystem::new();
            let a = system.add_particle(ev_particle([0.0, 0.0, 0.0], 0.5, 1.0));
            let b = system.add_particle(ev_particle([dist, 0.0, 0.0], 0.5, 1.0));
            let manager = ExcludedVolumeInteraction::from_system(&system, &HashSet::new());

            manager.accumulate_forces(&mut system).unwrap();

            assert!(system.particle(a).unwrap().force.x < 0.0);
            assert!(system.particle(b).unwrap().force.x > 0.0);
        }
    }

    #[test]
    fn coincident_pair_fails_fast_with_degenerate_geometry() {
        let mut system = ParticleSystem::new();
        system.add_particle(lj_particle([1.0, 1.0, 1.0], 0.5, 1.0));
        system.add_particle(lj_particle([1.0, 1.0, 1.0], 0.5, 1.0));
        let manager = LennardJonesInteraction::from_system(&system, &HashSet::new());

        let result = manager.accumulate_forces(&mut system);
        assert!(matches!(
            result,
            Err(EngineError::DegenerateGeometry {
                interaction: "NonBonded",
                potential: "LennardJones",
                ..
            })
        ));
    }

    #[test]
    fn potential_energy_recovers_well_depth_at_contact_minimum() {
        let r_min = 2.0f64.powf(1.0 / 6.0);
        let mut system = ParticleSystem::new();
        system.add_particle(lj_particle([0.0, 0.0, 0.0], 0.5, 2.0));
        system.add_particle(lj_particle([r_min, 0.0, 0.0], 0.5, 2.0));
        let manager = LennardJonesInteraction::from_system(&system, &HashSet::new());

        let energy = manager.potential_energy(&system).unwrap();
        assert!((energy + 2.0).abs() < 1e-9);
    }
}
