use super::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Root of the TOML input format.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub systems: Vec<SystemConfig>,
    #[serde(default)]
    pub forcefields: Vec<ForceFieldConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Time non-dimensionalization factor. Defaults to 10.0.
    pub timescale: Option<f64>,
    /// Integration timestep in scaled units. Defaults to 0.01.
    pub delta_t: Option<f64>,
    /// RNG seed; runs with the same seed reproduce bitwise.
    pub seed: Option<u64>,
    /// `Unlimited`, `Reflecting`, `Periodic` or `PeriodicCuboid`.
    pub boundary_type: Option<String>,
    pub integrator: Option<IntegratorConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IntegratorConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub gammas: Vec<GammaConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GammaConfig {
    pub index: usize,
    pub gamma: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SystemConfig {
    pub attributes: AttributesConfig,
    pub boundary_shape: Option<BoundaryShapeConfig>,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AttributesConfig {
    pub temperature: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoundaryShapeConfig {
    pub upper: [f64; 3],
    pub lower: [f64; 3],
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParticleConfig {
    /// Mass.
    pub m: f64,
    /// Initial position.
    pub pos: [f64; 3],
    /// Initial velocity; drawn from the Maxwell-Boltzmann distribution at the
    /// system temperature when absent.
    pub vel: Option<[f64; 3]>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ForceFieldConfig {
    #[serde(default)]
    pub local: Vec<LocalForceFieldConfig>,
    #[serde(default)]
    pub global: Vec<GlobalForceFieldConfig>,
}

/// One bonded interaction table: an interaction class, a potential name, and
/// one parameter set per binding.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LocalForceFieldConfig {
    pub interaction: String,
    pub potential: String,
    #[serde(default)]
    pub parameters: Vec<LocalParameterConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LocalParameterConfig {
    #[serde(default)]
    pub indices: Vec<usize>,
    /// Equilibrium value; in degrees for angle and dihedral interactions.
    pub v0: Option<f64>,
    pub k: Option<f64>,
    pub k1: Option<f64>,
    pub k3: Option<f64>,
    pub n: Option<u32>,
}

/// One non-bonded parameter table. `epsilon` at the table level is used by the
/// excluded-volume potential, which shares one repulsion strength across all
/// listed particles.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GlobalForceFieldConfig {
    pub potential: String,
    pub epsilon: Option<f64>,
    #[serde(default)]
    pub parameters: Vec<GlobalParameterConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GlobalParameterConfig {
    pub index: usize,
    /// Lennard-Jones contact diameter.
    pub sigma: Option<f64>,
    /// Excluded-volume hard-core radius.
    pub radius: Option<f64>,
    /// Lennard-Jones well depth.
    pub epsilon: Option<f64>,
}

impl InputConfig {
    /// Reads and parses an input file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Parses an input file from an in-memory TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
