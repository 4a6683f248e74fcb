use super::{InteractionManager, apply_force};
use crate::core::forcefield::term::AnglePotential;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use crate::core::utils::geometry::{self, BendGeometry, DISTANCE_EPSILON};
use crate::engine::error::EngineError;

/// One bond-angle term bound to an ordered particle triplet (angle at the
/// middle particle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBinding {
    pub potential: AnglePotential,
    pub triplet: [ParticleId; 3],
}

/// Applies bond-angle potentials to all bound triplets.
#[derive(Debug, Clone, Default)]
pub struct BondAngleInteraction {
    bindings: Vec<AngleBinding>,
}

impl BondAngleInteraction {
    pub fn new(bindings: Vec<AngleBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[AngleBinding] {
        &self.bindings
    }

    fn geometry(
        &self,
        binding: &AngleBinding,
        system: &ParticleSystem,
    ) -> Result<BendGeometry, EngineError> {
        let [id_i, id_j, id_k] = binding.triplet;
        let p_i = system
            .particle(id_i)
            .ok_or(EngineError::ParticleNotFound(id_i))?
            .position;
        let p_j = system
            .particle(id_j)
            .ok_or(EngineError::ParticleNotFound(id_j))?
            .position;
        let p_k = system
            .particle(id_k)
            .ok_or(EngineError::ParticleNotFound(id_k))?
            .position;

        geometry::bend_angle(&p_i, &p_j, &p_k).ok_or(EngineError::DegenerateGeometry {
            interaction: "BondAngle",
            potential: binding.potential.name(),
            particles: binding.triplet.to_vec(),
        })
    }
}

impl InteractionManager for BondAngleInteraction {
    fn name(&self) -> &'static str {
        "BondAngle"
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn accumulate_forces(&self, system: &mut ParticleSystem) -> Result<(), EngineError> {
        for binding in &self.bindings {
            let bend = self.geometry(binding, system)?;
            let coef = binding.potential.force_coef(bend.theta);

            let len_i = bend.arm_i.norm();
            let len_k = bend.arm_k.norm();
            let unit_i = bend.arm_i / len_i;
            let unit_k = bend.arm_k / len_k;

            // In-plane directions perpendicular to each arm; their norm equals
            // sin(theta), so the torque direction is undefined for collinear
            // triplets and the angular force vanishes there.
            let dir_i = unit_i * bend.cos_theta - unit_k;
            let dir_k = unit_k * bend.cos_theta - unit_i;
            let sin_theta = dir_i.norm();
            if sin_theta < DISTANCE_EPSILON {
                continue;
            }

            let force_i = dir_i * (coef / (len_i * sin_theta));
            let force_k = dir_k * (coef / (len_k * sin_theta));
            let force_j = -(force_i + force_k);

            let [id_i, id_j, id_k] = binding.triplet;
            apply_force(system, id_i, force_i)?;
            apply_force(system, id_j, force_j)?;
            apply_force(system, id_k, force_k)?;
        }
        Ok(())
    }

    fn potential_energy(&self, system: &ParticleSystem) -> Result<f64, EngineError> {
        let mut energy = 0.0;
        for binding in &self.bindings {
            let bend = self.geometry(binding, system)?;
            energy += binding.potential.energy(bend.theta);
        }
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::Particle;
    use nalgebra::{Point3, Vector3};
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f64 = 1e-9;

    fn triplet_system(
        p_i: Point3<f64>,
        p_j: Point3<f64>,
        p_k: Point3<f64>,
    ) -> (ParticleSystem, [ParticleId; 3]) {
        let mut system = ParticleSystem::new();
        let i = system.add_particle(Particle::new(1.0, p_i));
        let j = system.add_particle(Particle::new(1.0, p_j));
        let k = system.add_particle(Particle::new(1.0, p_k));
        (system, [i, j, k])
    }

    fn net_force(system: &ParticleSystem) -> Vector3<f64> {
        system.particles_iter().map(|(_, p)| p.force).sum()
    }

    #[test]
    fn net_force_over_triplet_is_zero() {
        let (mut system, triplet) = triplet_system(
            Point3::new(1.0, 0.2, -0.3),
            Point3::origin(),
            Point3::new(-0.4, 1.1, 0.5),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(FRAC_PI_2, 5.0, 1.0),
            triplet,
        }]);

        manager.accumulate_forces(&mut system).unwrap();

        assert!(net_force(&system).norm() < TOLERANCE);
    }

    #[test]
    fn vertex_reaction_force_balances_outer_forces() {
        let (mut system, triplet) = triplet_system(
            Point3::new(1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(PI / 3.0, 5.0, 1.0),
            triplet,
        }]);

        manager.accumulate_forces(&mut system).unwrap();

        let [i, j, k] = triplet;
        let force_i = system.particle(i).unwrap().force;
        let force_j = system.particle(j).unwrap().force;
        let force_k = system.particle(k).unwrap().force;
        assert!((force_j + force_i + force_k).norm() < TOLERANCE);
        assert!(force_i.norm() > 0.0);
    }

    #[test]
    fn angle_at_equilibrium_produces_no_force() {
        let (mut system, triplet) = triplet_system(
            Point3::new(1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(FRAC_PI_2, 5.0, 1.0),
            triplet,
        }]);

        manager.accumulate_forces(&mut system).unwrap();

        for (_, particle) in system.particles_iter() {
            assert!(particle.force.norm() < TOLERANCE);
        }
    }

    #[test]
    fn wide_angle_is_pulled_closed() {
        // Angle is pi/2 but equilibrium is pi/3: i and k must move toward
        // each other.
        let (mut system, triplet) = triplet_system(
            Point3::new(1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(PI / 3.0, 5.0, 1.0),
            triplet,
        }]);

        manager.accumulate_forces(&mut system).unwrap();

        let [i, _, k] = triplet;
        let towards_k = system.particle(i).unwrap().force.y;
        let towards_i = system.particle(k).unwrap().force.x;
        assert!(towards_k > 0.0);
        assert!(towards_i > 0.0);
    }

    #[test]
    fn collinear_triplet_gets_zero_force_without_error() {
        let (mut system, triplet) = triplet_system(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(FRAC_PI_2, 5.0, 1.0),
            triplet,
        }]);

        manager.accumulate_forces(&mut system).unwrap();

        for (_, particle) in system.particles_iter() {
            assert_eq!(particle.force, Vector3::zeros());
        }
    }

    #[test]
    fn coincident_particles_fail_fast_with_degenerate_geometry() {
        let (mut system, triplet) = triplet_system(
            Point3::origin(),
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(FRAC_PI_2, 5.0, 1.0),
            triplet,
        }]);

        let result = manager.accumulate_forces(&mut system);
        assert!(matches!(
            result,
            Err(EngineError::DegenerateGeometry {
                interaction: "BondAngle",
                ..
            })
        ));
    }

    #[test]
    fn potential_energy_matches_harmonic_form() {
        let (system, triplet) = triplet_system(
            Point3::new(1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        );
        let manager = BondAngleInteraction::new(vec![AngleBinding {
            potential: AnglePotential::harmonic(PI / 3.0, 6.0, 1.0),
            triplet,
        }]);

        // 0.5 * 6 * (pi/2 - pi/3)^2
        let expected = 3.0 * (FRAC_PI_2 - PI / 3.0).powi(2);
        let energy = manager.potential_energy(&system).unwrap();
        assert!((energy - expected).abs() < TOLERANCE);
    }
}
