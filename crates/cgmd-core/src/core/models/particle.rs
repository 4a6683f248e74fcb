use nalgebra::{Point3, Vector3};

/// Caches the non-bonded parameter set assigned to a particle.
///
/// This enum stores pre-scaled parameters for the supported non-bonded
/// potential families, allowing pair evaluation to proceed without repeated
/// lookups or rescaling. A particle with no entry in any global force-field
/// table carries `None` and participates in no non-bonded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NonBondedParam {
    /// Lennard-Jones 12-6 parameters.
    LennardJones {
        /// Half the declared sigma (sigma corresponds to the particle diameter).
        radius: f64,
        /// Well depth, pre-multiplied by the squared timescale factor.
        epsilon_scaled: f64,
    },
    /// Purely repulsive excluded-volume parameters.
    ExcludedVolume {
        /// Declared hard-core radius.
        radius: f64,
        /// Table-level repulsion strength, pre-multiplied by the squared
        /// timescale factor.
        epsilon_scaled: f64,
    },
    /// No non-bonded parameters assigned.
    #[default]
    None,
}

/// A point particle in the simulation.
///
/// This struct encapsulates the full per-particle state record: the constant
/// mass and non-bonded parameters fixed at construction, and the mutable
/// position, velocity, and per-step force accumulator advanced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Particle mass. Always strictly positive.
    pub mass: f64,
    /// Current position.
    pub position: Point3<f64>,
    /// Current velocity.
    pub velocity: Vector3<f64>,
    /// Force accumulated by the interaction managers during the current step.
    /// Cleared at the start of every step.
    pub force: Vector3<f64>,
    /// Cached non-bonded parameters, used only by the non-bonded managers.
    pub nonbonded: NonBondedParam,
}

impl Particle {
    /// Creates a new particle at rest with no non-bonded parameters.
    ///
    /// # Arguments
    ///
    /// * `mass` - The particle mass.
    /// * `position` - The initial position.
    pub fn new(mass: f64, position: Point3<f64>) -> Self {
        Self {
            mass,
            position,
            velocity: Vector3::zeros(),
            force: Vector3::zeros(),
            nonbonded: NonBondedParam::None,
        }
    }
}
