use super::{InteractionManager, apply_force};
use crate::core::forcefield::term::DihedralPotential;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use crate::core::utils::geometry::{self, DihedralGeometry};
use crate::engine::error::EngineError;

/// One dihedral-angle term bound to an ordered particle quadruplet
/// (i - j - k - l along the chain).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DihedralBinding {
    pub potential: DihedralPotential,
    pub quadruplet: [ParticleId; 4],
}

/// Applies dihedral-angle potentials to all bound quadruplets.
#[derive(Debug, Clone, Default)]
pub struct DihedralAngleInteraction {
    bindings: Vec<DihedralBinding>,
}

impl DihedralAngleInteraction {
    pub fn new(bindings: Vec<DihedralBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[DihedralBinding] {
        &self.bindings
    }

    /// The (i, l) chain-end pairs of every binding. These pairs are covalently
    /// connected through the chain and must be exempted from non-bonded
    /// interactions.
    pub fn chain_end_pairs(&self) -> impl Iterator<Item = (ParticleId, ParticleId)> + '_ {
        self.bindings
            .iter()
            .map(|b| (b.quadruplet[0], b.quadruplet[3]))
    }

    fn geometry(
        &self,
        binding: &DihedralBinding,
        system: &ParticleSystem,
    ) -> Result<DihedralGeometry, EngineError> {
        let [id_i, id_j, id_k, id_l] = binding.quadruplet;
        let mut positions = [nalgebra::Point3::origin(); 4];
        for (slot, id) in positions.iter_mut().zip([id_i, id_j, id_k, id_l]) {
            *slot = system
                .particle(id)
                .ok_or(EngineError::ParticleNotFound(id))?
                .position;
        }

        geometry::dihedral_angle(&positions[0], &positions[1], &positions[2], &positions[3]).ok_or(
            EngineError::DegenerateGeometry {
                interaction: "DihedralAngle",
                potential: binding.potential.name(),
                particles: binding.quadruplet.to_vec(),
            },
        )
    }
}

impl InteractionManager for DihedralAngleInteraction {
    fn name(&self) -> &'static str {
        "DihedralAngle"
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn accumulate_forces(&self, system: &mut ParticleSystem) -> Result<(), EngineError> {
        for binding in &self.bindings {
            let geo = self.geometry(binding, system)?;
            let coef = binding.potential.force_coef(geo.phi);

            let r_jk_len = geo.r_jk.norm();
            let r_jk_lensq = r_jk_len * r_jk_len;

            // Exact gradients of phi for the outer particles: the torque each
            // one exerts is normal to its own bond plane.
            let force_i = geo.m * (coef * r_jk_len / geo.m.norm_squared());
            let force_l = geo.n * (coef * r_jk_len / geo.n.norm_squared());

            // Lever arms projecting the outer forces onto the inner pair so
            // that both net force and net torque vanish over the quadruplet.
            let lever_ijk = geo.r_ji.dot(&geo.r_jk) / r_jk_lensq;
            let lever_jkl = geo.r_lk.dot(&geo.r_jk) / r_jk_lensq;

            let force_j = force_i * (lever_ijk - 1.0) - force_l * lever_jkl;
            let force_k = force_l * (lever_jkl - 1.0) - force_i * lever_ijk;

            let [id_i, id_j, id_k, id_l] = binding.quadruplet;
            apply_force(system, id_i, force_i)?;
            apply_force(system, id_j, force_j)?;
            apply_force(system, id_k, force_k)?;
            apply_force(system, id_l, force_l)?;
        }
        Ok(())
    }

    fn potential_energy(&self, system: &ParticleSystem) -> Result<f64, EngineError> {
        let mut energy = 0.0;
        for binding in &self.bindings {
            let geo = self.geometry(binding, system)?;
            energy += binding.potential.energy(geo.phi);
        }
        Ok(energy)
    }
}
