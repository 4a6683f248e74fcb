use super::{InteractionManager, apply_force};
use crate::core::forcefield::term::BondPotential;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use crate::core::utils::geometry::DISTANCE_EPSILON;
use crate::engine::error::EngineError;

/// One bond-length term bound to an ordered particle pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondBinding {
    pub potential: BondPotential,
    pub pair: [ParticleId; 2],
}

/// Applies bond-length potentials to all bound pairs.
#[derive(Debug, Clone, Default)]
pub struct BondLengthInteraction {
    bindings: Vec<BondBinding>,
}

impl BondLengthInteraction {
    pub fn new(bindings: Vec<BondBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[BondBinding] {
        &self.bindings
    }

    fn separation(
        &self,
        binding: &BondBinding,
        system: &ParticleSystem,
    ) -> Result<(nalgebra::Vector3<f64>, f64), EngineError> {
        let [id_a, id_b] = binding.pair;
        let a = system
            .particle(id_a)
            .ok_or(EngineError::ParticleNotFound(id_a))?;
        let b = system
            .particle(id_b)
            .ok_or(EngineError::ParticleNotFound(id_b))?;

        let r = b.position - a.position;
        let dist = r.norm();
        if dist < DISTANCE_EPSILON {
            return Err(EngineError::DegenerateGeometry {
                interaction: "BondLength",
                potential: binding.potential.name(),
                particles: binding.pair.to_vec(),
            });
        }
        Ok((r, dist))
    }
}

impl InteractionManager for BondLengthInteraction {
    fn name(&self) -> &'static str {
        "BondLength"
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn accumulate_forces(&self, system: &mut ParticleSystem) -> Result<(), EngineError> {
        for binding in &self.bindings {
            let (r, dist) = self.separation(binding, system)?;
            let coef = binding.potential.force_coef(dist);

            // F_a = -coef * r_hat, F_b = -F_a: Newton's third law holds exactly.
            let force_a = r * (-coef / dist);
            let [id_a, id_b] = binding.pair;
            apply_force(system, id_a, force_a)?;
            apply_force(system, id_b, -force_a)?;
        }
        Ok(())
    }

    fn potential_energy(&self, system: &ParticleSystem) -> Result<f64, EngineError> {
        let mut energy = 0.0;
        for binding in &self.bindings {
            let (_, dist) = self.separation(binding, system)?;
            energy += binding.potential.energy(dist);
        }
        Ok(energy)
    }
}
