use crate::core::models::system::ParticleSystem;
use nalgebra::Vector3;
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

/// Draws one velocity from the Maxwell-Boltzmann distribution at the given
/// temperature: each component is normal with variance `kb_scaled * T / m`.
pub fn maxwell_boltzmann_velocity(
    rng: &mut StdRng,
    kb_scaled: f64,
    temperature: f64,
    mass: f64,
) -> Vector3<f64> {
    let sigma = (kb_scaled * temperature / mass).sqrt();
    Vector3::new(
        rng.sample::<f64, _>(StandardNormal) * sigma,
        rng.sample::<f64, _>(StandardNormal) * sigma,
        rng.sample::<f64, _>(StandardNormal) * sigma,
    )
}

#[derive(Debug, Clone, Copy)]
struct LangevinCoeffs {
    inv_mass: f64,
    gamma: f64,
    /// `sqrt(2 * gamma * kb_scaled * T / m)`: the thermal noise amplitude
    /// satisfying the fluctuation-dissipation relation.
    noise_scale: f64,
}

/// Underdamped Langevin integrator.
///
/// Per particle and per axis the velocity update combines the deterministic
/// acceleration from the accumulated force, velocity-proportional friction,
/// and an independent Gaussian impulse scaled so that the stationary velocity
/// distribution satisfies `<v^2> = kb_scaled * T / m`. The position update
/// integrates the updated velocity. With `gamma = 0` the noise amplitude is
/// zero as well and the dynamics degenerate to deterministic integration.
pub struct UnderdampedLangevin {
    temperature: f64,
    coeffs: Vec<LangevinCoeffs>,
    rng: StdRng,
}

impl UnderdampedLangevin {
    /// Builds the integrator for a fixed particle population.
    ///
    /// `gammas` holds one friction coefficient per particle in declaration
    /// order; the per-particle coefficients are derived once here.
    ///
    /// # Panics
    ///
    /// Panics if `gammas.len()` differs from the particle count. The config
    /// builder guarantees full coverage before construction.
    pub fn new(
        kb_scaled: f64,
        temperature: f64,
        system: &ParticleSystem,
        gammas: &[f64],
        rng: StdRng,
    ) -> Self {
        assert_eq!(
            gammas.len(),
            system.len(),
            "one friction coefficient is required per particle"
        );
        let coeffs = system
            .particles_iter()
            .zip(gammas)
            .map(|((_, particle), &gamma)| LangevinCoeffs {
                inv_mass: 1.0 / particle.mass,
                gamma,
                noise_scale: (2.0 * gamma * kb_scaled * temperature / particle.mass).sqrt(),
            })
            .collect();
        Self {
            temperature,
            coeffs,
            rng,
        }
    }

    /// Target temperature of the thermostat.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Advances velocities and positions by one timestep, consuming the force
    /// accumulators filled by the interaction managers.
    pub fn step(&mut self, system: &mut ParticleSystem, delta_t: f64) {
        let sqrt_dt = delta_t.sqrt();
        for (index, coeffs) in self.coeffs.iter().enumerate() {
            let id = system.ids()[index];
            let noise = Vector3::new(
                self.rng.sample::<f64, _>(StandardNormal),
                self.rng.sample::<f64, _>(StandardNormal),
                self.rng.sample::<f64, _>(StandardNormal),
            ) * (coeffs.noise_scale * sqrt_dt);

            if let Some(particle) = system.particle_mut(id) {
                let accel =
                    particle.force * coeffs.inv_mass - particle.velocity * coeffs.gamma;
                particle.velocity += accel * delta_t + noise;
                particle.position += particle.velocity * delta_t;
            }
        }
    }
}
