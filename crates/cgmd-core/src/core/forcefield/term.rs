use super::potentials;

/// A bond-length potential term with coefficients pre-scaled by the squared
/// timescale factor. Constructed once from raw physical constants; evaluation
/// never rescales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BondPotential {
    Harmonic { v0: f64, k_scaled: f64 },
    GoContact { v0: f64, k_scaled: f64 },
}

impl BondPotential {
    pub fn harmonic(v0: f64, k: f64, timescale: f64) -> Self {
        Self::Harmonic {
            v0,
            k_scaled: k * timescale * timescale,
        }
    }

    pub fn go_contact(v0: f64, k: f64, timescale: f64) -> Self {
        Self::GoContact {
            v0,
            k_scaled: k * timescale * timescale,
        }
    }

    pub fn energy(&self, dist: f64) -> f64 {
        match *self {
            Self::Harmonic { v0, k_scaled } => potentials::harmonic_energy(dist, v0, k_scaled),
            Self::GoContact { v0, k_scaled } => potentials::go_contact_energy(dist, v0, k_scaled),
        }
    }

    /// The force coefficient `-dU/dr` at the given separation.
    pub fn force_coef(&self, dist: f64) -> f64 {
        match *self {
            Self::Harmonic { v0, k_scaled } => -potentials::harmonic_derivative(dist, v0, k_scaled),
            Self::GoContact { v0, k_scaled } => {
                -potentials::go_contact_derivative(dist, v0, k_scaled)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Harmonic { .. } => "Harmonic",
            Self::GoContact { .. } => "GoContact",
        }
    }
}

/// A bond-angle potential term. The equilibrium angle is stored in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnglePotential {
    Harmonic { theta0: f64, k_scaled: f64 },
}

impl AnglePotential {
    pub fn harmonic(theta0: f64, k: f64, timescale: f64) -> Self {
        Self::Harmonic {
            theta0,
            k_scaled: k * timescale * timescale,
        }
    }

    pub fn energy(&self, theta: f64) -> f64 {
        match *self {
            Self::Harmonic { theta0, k_scaled } => {
                potentials::harmonic_energy(theta, theta0, k_scaled)
            }
        }
    }

    /// The force coefficient `-dU/dtheta` at the given angle.
    pub fn force_coef(&self, theta: f64) -> f64 {
        match *self {
            Self::Harmonic { theta0, k_scaled } => {
                -potentials::harmonic_derivative(theta, theta0, k_scaled)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Harmonic { .. } => "Harmonic",
        }
    }
}

/// A dihedral-angle potential term. Equilibrium angles are stored in radians.
///
/// The cosine form keeps the `half_nk = n*k*timescale^2/2` and `double_n = 2n`
/// pair as its derived constants; the force law's sine argument uses
/// `double_n`, which is what makes the stored energy and force consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DihedralPotential {
    Clementi {
        phi0: f64,
        k1_scaled: f64,
        k3_scaled: f64,
    },
    Cosine {
        phi0: f64,
        n: f64,
        half_nk: f64,
        double_n: f64,
    },
}

impl DihedralPotential {
    pub fn clementi(phi0: f64, k1: f64, k3: f64, timescale: f64) -> Self {
        let ts2 = timescale * timescale;
        Self::Clementi {
            phi0,
            k1_scaled: k1 * ts2,
            k3_scaled: k3 * ts2,
        }
    }

    pub fn cosine(phi0: f64, k: f64, n: u32, timescale: f64) -> Self {
        let n = f64::from(n);
        Self::Cosine {
            phi0,
            n,
            half_nk: 0.5 * n * k * timescale * timescale,
            double_n: 2.0 * n,
        }
    }

    pub fn energy(&self, phi: f64) -> f64 {
        match *self {
            Self::Clementi {
                phi0,
                k1_scaled,
                k3_scaled,
            } => potentials::clementi_dihedral_energy(phi, phi0, k1_scaled, k3_scaled),
            Self::Cosine {
                phi0, n, half_nk, ..
            } => potentials::cosine_dihedral_energy(phi, phi0, half_nk, n),
        }
    }

    /// The force coefficient `-dU/dphi` at the given dihedral angle.
    pub fn force_coef(&self, phi: f64) -> f64 {
        match *self {
            Self::Clementi {
                phi0,
                k1_scaled,
                k3_scaled,
            } => -potentials::clementi_dihedral_derivative(phi, phi0, k1_scaled, k3_scaled),
            Self::Cosine {
                phi0,
                half_nk,
                double_n,
                ..
            } => -potentials::cosine_dihedral_derivative(phi, phi0, half_nk, double_n),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clementi { .. } => "ClementiDihedral",
            Self::Cosine { .. } => "Cosine",
        }
    }
}
