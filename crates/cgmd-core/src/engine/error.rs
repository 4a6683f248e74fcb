use crate::core::models::ids::ParticleId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(
        "degenerate geometry in {interaction} ({potential}) binding over particles {particles:?}: coincident or collinear positions make the interaction undefined"
    )]
    DegenerateGeometry {
        interaction: &'static str,
        potential: &'static str,
        particles: Vec<ParticleId>,
    },

    #[error("particle {0:?} not found in the system")]
    ParticleNotFound(ParticleId),
}
