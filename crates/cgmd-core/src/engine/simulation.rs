use super::boundary::BoundaryManager;
use super::error::EngineError;
use super::integrator::UnderdampedLangevin;
use super::interactions::InteractionManager;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// Boltzmann constant in kcal/(mol K); with the default timescale one tau
/// corresponds to roughly 49 fs.
pub const BOLTZMANN_CONSTANT: f64 = 0.0019827;

/// Global unit-normalization constants shared by every force-field term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConstants {
    /// Time non-dimensionalization factor; every energy constant is scaled by
    /// its square at construction.
    pub timescale: f64,
    /// `BOLTZMANN_CONSTANT * timescale^2`.
    pub kb_scaled: f64,
    /// Thermostat temperature in Kelvin.
    pub temperature: f64,
}

impl SimulationConstants {
    pub fn new(timescale: f64, temperature: f64) -> Self {
        Self {
            timescale,
            kb_scaled: BOLTZMANN_CONSTANT * timescale * timescale,
            temperature,
        }
    }
}

/// The complete, explicitly passed state of one simulation.
///
/// Owns the particle store, the interaction managers in declaration order, the
/// integrator, and the optional boundary manager. [`SimulationState::step`]
/// is the only way the state advances, and it enforces the per-step pipeline:
/// forces are cleared, every manager accumulates in declaration order, then
/// the integrator runs, then the boundary correction. Interaction managers
/// never outlive the store they reference because both live and die together
/// inside this value.
pub struct SimulationState {
    system: ParticleSystem,
    interactions: Vec<Box<dyn InteractionManager>>,
    integrator: UnderdampedLangevin,
    boundary: Option<BoundaryManager>,
    constants: SimulationConstants,
    delta_t: f64,
    step_count: u64,
}

impl SimulationState {
    pub fn new(
        system: ParticleSystem,
        interactions: Vec<Box<dyn InteractionManager>>,
        integrator: UnderdampedLangevin,
        boundary: Option<BoundaryManager>,
        constants: SimulationConstants,
        delta_t: f64,
    ) -> Self {
        Self {
            system,
            interactions,
            integrator,
            boundary,
            constants,
            delta_t,
            step_count: 0,
        }
    }

    /// Advances the simulation by one timestep.
    ///
    /// Force accumulation is finalized across all managers before the
    /// integrator consumes it; integration and boundary correction never see a
    /// partially summed force.
    pub fn step(&mut self) -> Result<(), EngineError> {
        self.system.clear_forces();
        for manager in &self.interactions {
            manager.accumulate_forces(&mut self.system)?;
        }
        self.integrator.step(&mut self.system, self.delta_t);
        if let Some(boundary) = &self.boundary {
            boundary.apply(&mut self.system);
        }
        self.step_count += 1;
        trace!(step = self.step_count, "completed simulation step");
        Ok(())
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn boundary(&self) -> Option<&BoundaryManager> {
        self.boundary.as_ref()
    }

    pub fn constants(&self) -> SimulationConstants {
        self.constants
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn position(&self, id: ParticleId) -> Option<Point3<f64>> {
        self.system.particle(id).map(|p| p.position)
    }

    pub fn velocity(&self, id: ParticleId) -> Option<Vector3<f64>> {
        self.system.particle(id).map(|p| p.velocity)
    }

    /// The force accumulated for `id` during the most recent step.
    pub fn force(&self, id: ParticleId) -> Option<Vector3<f64>> {
        self.system.particle(id).map(|p| p.force)
    }

    /// Name and binding count of every interaction manager, in evaluation
    /// order.
    pub fn interaction_summary(&self) -> Vec<(&'static str, usize)> {
        self.interactions
            .iter()
            .map(|manager| (manager.name(), manager.len()))
            .collect()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.system.kinetic_energy()
    }

    /// Total potential energy over all interaction managers at the current
    /// positions.
    pub fn potential_energy(&self) -> Result<f64, EngineError> {
        let mut energy = 0.0;
        for manager in &self.interactions {
            energy += manager.potential_energy(&self.system)?;
        }
        Ok(energy)
    }

    /// Instantaneous kinetic temperature `2 E_kin / (3 N kb')`.
    pub fn instantaneous_temperature(&self) -> f64 {
        let n = self.system.len();
        if n == 0 {
            return 0.0;
        }
        2.0 * self.kinetic_energy() / (3.0 * n as f64 * self.constants.kb_scaled)
    }
}
