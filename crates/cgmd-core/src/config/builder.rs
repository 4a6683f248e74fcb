use super::error::ConfigError;
use super::schema::{InputConfig, LocalParameterConfig, SystemConfig};
use crate::core::forcefield::term::{AnglePotential, BondPotential, DihedralPotential};
use crate::core::models::boundary::BoundaryBox;
use crate::core::models::ids::ParticleId;
use crate::core::models::particle::{NonBondedParam, Particle};
use crate::core::models::system::ParticleSystem;
use crate::engine::boundary::BoundaryManager;
use crate::engine::integrator::{UnderdampedLangevin, maxwell_boltzmann_velocity};
use crate::engine::interactions::{
    AngleBinding, BondAngleInteraction, BondBinding, BondLengthInteraction,
    DihedralAngleInteraction, DihedralBinding, ExcludedVolumeInteraction, InteractionManager,
    LennardJonesInteraction, canonical_pair,
};
use crate::engine::simulation::{SimulationConstants, SimulationState};
use nalgebra::{Point3, Vector3};
use phf::phf_map;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tracing::info;

const DEFAULT_TIMESCALE: f64 = 10.0;
const DEFAULT_DELTA_T: f64 = 0.01;

/// Supported (interaction, potential) combinations for bonded tables.
static LOCAL_VOCABULARY: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "BondLength" => &["Harmonic", "GoContact"],
    "BondAngle" => &["Harmonic"],
    "DihedralAngle" => &["ClementiDihedral", "Cosine"],
};

const AVAILABLE_COMBINATIONS: &str = "BondLength(Harmonic, GoContact), BondAngle(Harmonic), \
     DihedralAngle(ClementiDihedral, Cosine) for local tables; LennardJones, ExcludedVolume \
     for global tables";

fn exactly_one<'a, T>(tables: &'a [T], name: &'static str) -> Result<&'a T, ConfigError> {
    match tables {
        [table] => Ok(table),
        _ => Err(ConfigError::TableCount {
            table: name,
            count: tables.len(),
        }),
    }
}

fn require(value: Option<f64>, name: &'static str) -> Result<f64, ConfigError> {
    value.ok_or(ConfigError::MissingParameter(name))
}

fn resolve_tuple<const N: usize>(
    param: &LocalParameterConfig,
    interaction: &'static str,
    ids: &[ParticleId],
) -> Result<[ParticleId; N], ConfigError> {
    if param.indices.len() != N {
        return Err(ConfigError::ArityMismatch {
            interaction,
            expected: N,
            found: param.indices.len(),
        });
    }
    for (pos, index) in param.indices.iter().enumerate() {
        if param.indices[pos + 1..].contains(index) {
            return Err(ConfigError::DuplicateTupleIndex {
                interaction,
                indices: param.indices.clone(),
            });
        }
    }

    let mut tuple = [ParticleId::default(); N];
    for (slot, &index) in tuple.iter_mut().zip(&param.indices) {
        *slot = *ids.get(index).ok_or(ConfigError::IndexOutOfRange {
            index,
            count: ids.len(),
        })?;
    }
    Ok(tuple)
}

fn unsupported(interaction: &str, potential: &str) -> ConfigError {
    ConfigError::UnsupportedPotential {
        interaction: interaction.to_string(),
        potential: potential.to_string(),
        available: AVAILABLE_COMBINATIONS,
    }
}

fn build_particles(
    system_config: &SystemConfig,
    constants: &SimulationConstants,
    rng: &mut StdRng,
) -> Result<ParticleSystem, ConfigError> {
    let mut system = ParticleSystem::new();
    for (index, particle_config) in system_config.particles.iter().enumerate() {
        if particle_config.m <= 0.0 {
            return Err(ConfigError::NonPositiveMass {
                index,
                mass: particle_config.m,
            });
        }
        let mut particle = Particle::new(particle_config.m, Point3::from(particle_config.pos));
        particle.velocity = match particle_config.vel {
            Some(vel) => Vector3::from(vel),
            None => maxwell_boltzmann_velocity(
                rng,
                constants.kb_scaled,
                constants.temperature,
                particle_config.m,
            ),
        };
        system.add_particle(particle);
    }
    Ok(system)
}

fn build_gammas(config: &InputConfig, particle_count: usize) -> Result<Vec<f64>, ConfigError> {
    let integrator = config
        .simulator
        .integrator
        .as_ref()
        .ok_or(ConfigError::MissingParameter("integrator"))?;
    if integrator.kind != "UnderdampedLangevin" {
        return Err(ConfigError::UnknownIntegrator(integrator.kind.clone()));
    }
    if integrator.gammas.is_empty() {
        return Err(ConfigError::MissingParameter("gammas"));
    }

    let mut gammas: Vec<Option<f64>> = vec![None; particle_count];
    for entry in &integrator.gammas {
        let slot = gammas
            .get_mut(entry.index)
            .ok_or(ConfigError::IndexOutOfRange {
                index: entry.index,
                count: particle_count,
            })?;
        if slot.is_some() {
            return Err(ConfigError::DuplicateGamma { index: entry.index });
        }
        *slot = Some(entry.gamma);
    }
    gammas
        .into_iter()
        .enumerate()
        .map(|(index, gamma)| gamma.ok_or(ConfigError::MissingGamma { index }))
        .collect()
}

fn build_boundary(
    config: &InputConfig,
    system_config: &SystemConfig,
) -> Result<Option<BoundaryManager>, ConfigError> {
    let Some(boundary_type) = config.simulator.boundary_type.as_deref() else {
        return Ok(None);
    };
    if boundary_type == "Unlimited" {
        return Ok(None);
    }
    if !matches!(boundary_type, "Reflecting" | "Periodic" | "PeriodicCuboid") {
        return Err(ConfigError::UnknownBoundaryType(boundary_type.to_string()));
    }

    let shape = system_config
        .boundary_shape
        .as_ref()
        .ok_or(ConfigError::MissingParameter("boundary_shape"))?;
    let bbox = BoundaryBox::new(Point3::from(shape.lower), Point3::from(shape.upper))?;
    Ok(Some(match boundary_type {
        "Reflecting" => BoundaryManager::Reflecting(bbox),
        _ => BoundaryManager::Periodic(bbox),
    }))
}

/// Builds a ready-to-step simulation from a parsed input file.
///
/// All configuration errors surface here, before the first step: table
/// multiplicity, interaction vocabulary, tuple arity and distinctness,
/// particle index ranges, friction coverage, and boundary invariants. Bonded
/// managers are registered in declaration order, followed by the non-bonded
/// managers, which fixes the force summation order for reproducible runs.
pub fn build_simulation(config: &InputConfig) -> Result<SimulationState, ConfigError> {
    let system_config = exactly_one(&config.systems, "systems")?;
    let ff_config = exactly_one(&config.forcefields, "forcefields")?;

    let temperature = system_config.attributes.temperature;
    if temperature < 0.0 {
        return Err(ConfigError::InvalidTemperature(temperature));
    }
    let timescale = config.simulator.timescale.unwrap_or(DEFAULT_TIMESCALE);
    let delta_t = config.simulator.delta_t.unwrap_or(DEFAULT_DELTA_T);
    let constants = SimulationConstants::new(timescale, temperature);

    let mut rng = match config.simulator.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut system = build_particles(system_config, &constants, &mut rng)?;
    let ids: Vec<ParticleId> = system.ids().to_vec();
    info!(particles = system.len(), "system initialization finished");

    // Bonded managers, one per declared table, in declaration order. Bonded
    // pairs and dihedral chain ends are collected as non-bonded exclusions.
    let mut interactions: Vec<Box<dyn InteractionManager>> = Vec::new();
    let mut exclusions: HashSet<(ParticleId, ParticleId)> = HashSet::new();
    for local in &ff_config.local {
        let allowed = LOCAL_VOCABULARY
            .get(local.interaction.as_str())
            .ok_or_else(|| unsupported(&local.interaction, &local.potential))?;
        if !allowed.contains(&local.potential.as_str()) {
            return Err(unsupported(&local.interaction, &local.potential));
        }

        match local.interaction.as_str() {
            "BondLength" => {
                let mut bindings = Vec::with_capacity(local.parameters.len());
                for param in &local.parameters {
                    let pair: [ParticleId; 2] = resolve_tuple(param, "BondLength", &ids)?;
                    let v0 = require(param.v0, "v0")?;
                    let k = require(param.k, "k")?;
                    let potential = match local.potential.as_str() {
                        "Harmonic" => BondPotential::harmonic(v0, k, timescale),
                        _ => BondPotential::go_contact(v0, k, timescale),
                    };
                    exclusions.insert(canonical_pair(pair[0], pair[1]));
                    bindings.push(BondBinding { potential, pair });
                }
                info!(
                    potential = %local.potential,
                    bindings = bindings.len(),
                    "BondLength interaction initialization finished"
                );
                interactions.push(Box::new(BondLengthInteraction::new(bindings)));
            }
            "BondAngle" => {
                let mut bindings = Vec::with_capacity(local.parameters.len());
                for param in &local.parameters {
                    let triplet: [ParticleId; 3] = resolve_tuple(param, "BondAngle", &ids)?;
                    let v0 = require(param.v0, "v0")?;
                    let k = require(param.k, "k")?;
                    bindings.push(AngleBinding {
                        potential: AnglePotential::harmonic(v0.to_radians(), k, timescale),
                        triplet,
                    });
                }
                info!(
                    potential = %local.potential,
                    bindings = bindings.len(),
                    "BondAngle interaction initialization finished"
                );
                interactions.push(Box::new(BondAngleInteraction::new(bindings)));
            }
            _ => {
                let mut bindings = Vec::with_capacity(local.parameters.len());
                for param in &local.parameters {
                    let quadruplet: [ParticleId; 4] = resolve_tuple(param, "DihedralAngle", &ids)?;
                    let v0 = require(param.v0, "v0")?;
                    let potential = match local.potential.as_str() {
                        "ClementiDihedral" => DihedralPotential::clementi(
                            v0.to_radians(),
                            require(param.k1, "k1")?,
                            require(param.k3, "k3")?,
                            timescale,
                        ),
                        _ => DihedralPotential::cosine(
                            v0.to_radians(),
                            require(param.k, "k")?,
                            param.n.ok_or(ConfigError::MissingParameter("n"))?,
                            timescale,
                        ),
                    };
                    exclusions.insert(canonical_pair(quadruplet[0], quadruplet[3]));
                    bindings.push(DihedralBinding {
                        potential,
                        quadruplet,
                    });
                }
                info!(
                    potential = %local.potential,
                    bindings = bindings.len(),
                    "DihedralAngle interaction initialization finished"
                );
                interactions.push(Box::new(DihedralAngleInteraction::new(bindings)));
            }
        }
    }

    // Non-bonded parameters are assigned across all global tables before the
    // pair lists are enumerated, then the managers follow the bonded ones in
    // first-declaration order.
    let mut kind_order: Vec<&'static str> = Vec::new();
    for global in &ff_config.global {
        match global.potential.as_str() {
            "LennardJones" => {
                for param in &global.parameters {
                    let id = *ids.get(param.index).ok_or(ConfigError::IndexOutOfRange {
                        index: param.index,
                        count: ids.len(),
                    })?;
                    let sigma = require(param.sigma, "sigma")?;
                    let epsilon = require(param.epsilon, "epsilon")?;
                    for (name, value) in [("sigma", sigma), ("epsilon", epsilon)] {
                        if value < 0.0 {
                            return Err(ConfigError::NegativeNonBondedParameter {
                                index: param.index,
                                name,
                                value,
                            });
                        }
                    }
                    if let Some(particle) = system.particle_mut(id) {
                        // sigma corresponds to the particle diameter.
                        particle.nonbonded = NonBondedParam::LennardJones {
                            radius: sigma * 0.5,
                            epsilon_scaled: epsilon * timescale * timescale,
                        };
                    }
                }
                if !kind_order.contains(&"LennardJones") {
                    kind_order.push("LennardJones");
                }
                info!("LennardJones initialization finished");
            }
            "ExcludedVolume" => {
                let epsilon = require(global.epsilon, "epsilon")?;
                for param in &global.parameters {
                    let id = *ids.get(param.index).ok_or(ConfigError::IndexOutOfRange {
                        index: param.index,
                        count: ids.len(),
                    })?;
                    let radius = require(param.radius, "radius")?;
                    if radius < 0.0 {
                        return Err(ConfigError::NegativeNonBondedParameter {
                            index: param.index,
                            name: "radius",
                            value: radius,
                        });
                    }
                    if let Some(particle) = system.particle_mut(id) {
                        particle.nonbonded = NonBondedParam::ExcludedVolume {
                            radius,
                            epsilon_scaled: epsilon * timescale * timescale,
                        };
                    }
                }
                if !kind_order.contains(&"ExcludedVolume") {
                    kind_order.push("ExcludedVolume");
                }
                info!("ExcludedVolume initialization finished");
            }
            other => return Err(unsupported("global", other)),
        }
    }
    for kind in kind_order {
        match kind {
            "LennardJones" => {
                let manager = LennardJonesInteraction::from_system(&system, &exclusions);
                info!(pairs = manager.len(), "LennardJones pair list enumerated");
                interactions.push(Box::new(manager));
            }
            _ => {
                let manager = ExcludedVolumeInteraction::from_system(&system, &exclusions);
                info!(pairs = manager.len(), "ExcludedVolume pair list enumerated");
                interactions.push(Box::new(manager));
            }
        }
    }

    let gammas = build_gammas(config, system.len())?;
    let integrator = UnderdampedLangevin::new(
        constants.kb_scaled,
        constants.temperature,
        &system,
        &gammas,
        rng,
    );
    info!("UnderdampedLangevin initialization finished");

    let boundary = build_boundary(config, system_config)?;
    if boundary.is_some() {
        info!("boundary manager initialization finished");
    }

    Ok(SimulationState::new(
        system,
        interactions,
        integrator,
        boundary,
        constants,
        delta_t,
    ))
}
