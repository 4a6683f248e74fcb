use crate::core::models::boundary::BoundaryBox;
use crate::core::models::system::ParticleSystem;

/// Corrects particles that left the simulation box.
///
/// Applied exactly once per step, strictly after integration. Each axis is
/// treated independently and receives at most one correction per step: a
/// particle travelling more than one box length within a single timestep is
/// only folded back once (a known limitation for unreasonably fast particles;
/// with sane timesteps the correction is idempotent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryManager {
    /// Reflect the position about the violated face and invert the
    /// corresponding velocity component. A particle exactly on a face moving
    /// outward is clamped in place with its velocity negated; one moving
    /// inward is left alone.
    Reflecting(BoundaryBox),
    /// Translate the position by one box extent; velocities are untouched.
    Periodic(BoundaryBox),
}

impl BoundaryManager {
    pub fn boundary_box(&self) -> &BoundaryBox {
        match self {
            Self::Reflecting(bbox) | Self::Periodic(bbox) => bbox,
        }
    }

    pub fn apply(&self, system: &mut ParticleSystem) {
        match self {
            Self::Reflecting(bbox) => {
                let (upper, lower) = (bbox.upper(), bbox.lower());
                for (_, particle) in system.particles_iter_mut() {
                    for axis in 0..3 {
                        let p = particle.position[axis];
                        let v = particle.velocity[axis];
                        if p >= upper[axis] && v > 0.0 {
                            particle.position[axis] = 2.0 * upper[axis] - p;
                            particle.velocity[axis] = -v;
                        } else if p <= lower[axis] && v < 0.0 {
                            particle.position[axis] = 2.0 * lower[axis] - p;
                            particle.velocity[axis] = -v;
                        }
                    }
                }
            }
            Self::Periodic(bbox) => {
                let (upper, lower) = (bbox.upper(), bbox.lower());
                for (_, particle) in system.particles_iter_mut() {
                    for axis in 0..3 {
                        let extent = upper[axis] - lower[axis];
                        let p = particle.position[axis];
                        if p >= upper[axis] {
                            particle.position[axis] = p - extent;
                        } else if p < lower[axis] {
                            particle.position[axis] = p + extent;
                        }
                    }
                }
            }
        }
    }
}
